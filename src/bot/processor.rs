/* Conversation driver.
 * Maps one inbound message and the sender's prior state to the next state, the replies
 * to send and, when the last step succeeds, the completed transaction. The caller
 * sends the replies and persists the state.
 */

use std::sync::Arc;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use teloxide::types::{ChatId, Message};

use super::{
    constants::{
        commands::{COMMAND_RESET, COMMAND_START},
        messages::{
            DATA_SAVED_MESSAGE, DATE_TODAY, FILE_SAVED_MESSAGE, FILE_SAVE_ERROR_MESSAGE,
            FLOW_INCOME, FLOW_OUTCOME, LEDGER_SAVE_ERROR_MESSAGE, RESET_MESSAGE,
        },
    },
    services::{Attachment, CompletedTransaction, FileVault, Ledger, OptionSource, ServiceError},
    state::UserState,
    steps::{transaction_steps, StepDefinition},
    utils::{
        amounts::signed_amount,
        format::attachment_file_name,
        time::{format_date, format_timestamp},
    },
};

#[derive(Debug, Clone, PartialEq)]
pub struct InboundMessage {
    pub chat_id: ChatId,
    pub user_id: String,
    pub username: Option<String>,
    pub text: Option<String>,
    pub attachment: Option<Attachment>,
}

impl InboundMessage {
    // None for service messages without a sender
    pub fn from_message(msg: &Message) -> Option<InboundMessage> {
        let user = msg.from()?;

        let attachment = match msg.document() {
            Some(document) => Some(Attachment::Document {
                file_id: document.file.id.clone(),
                file_name: document.file_name.clone(),
                mime_type: document.mime_type.as_ref().map(|mime| mime.to_string()),
            }),
            // Telegram lists photo sizes ascending, the last one is the original
            None => msg
                .photo()
                .and_then(|photos| photos.last())
                .map(|photo| Attachment::Photo {
                    file_id: photo.file.id.clone(),
                }),
        };

        Some(InboundMessage {
            chat_id: msg.chat.id,
            user_id: user.id.0.to_string(),
            username: user.username.clone(),
            text: msg.text().map(|text| text.to_string()),
            attachment,
        })
    }

    // Username when set, user id otherwise
    pub fn sender_name(&self) -> &str {
        self.username.as_deref().unwrap_or(&self.user_id)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Text(String),
    Menu { text: String, options: Vec<String> },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: UserState,
    pub replies: Vec<Reply>,
    pub completed: Option<CompletedTransaction>,
}

impl Transition {
    fn silent(state: UserState) -> Transition {
        Transition {
            state,
            replies: vec![],
            completed: None,
        }
    }

    fn reply(state: UserState, reply: Reply) -> Transition {
        Transition {
            state,
            replies: vec![reply],
            completed: None,
        }
    }
}

pub fn is_reset_command(text: &str) -> bool {
    text == COMMAND_START || text == COMMAND_RESET
}

pub struct Conversation {
    steps: Vec<StepDefinition>,
    options: Arc<dyn OptionSource>,
    vault: Arc<dyn FileVault>,
    ledger: Arc<dyn Ledger>,
    time_zone: Tz,
}

impl Conversation {
    pub fn new(
        options: Arc<dyn OptionSource>,
        vault: Arc<dyn FileVault>,
        ledger: Arc<dyn Ledger>,
        time_zone: Tz,
    ) -> Conversation {
        Conversation {
            steps: transaction_steps(),
            options,
            vault,
            ledger,
            time_zone,
        }
    }

    /* Advances the conversation by one inbound message.
     * An error means the option menu or the type lookup could not be read before the
     * state moved forward; the caller should keep the previously stored state.
     */
    pub async fn advance(
        &self,
        msg: &InboundMessage,
        state: UserState,
        now: DateTime<Utc>,
    ) -> Result<Transition, ServiceError> {
        if msg.text.as_deref().map_or(false, is_reset_command) {
            log::info!("User {} reset the conversation", msg.user_id);
            return Ok(Transition::reply(
                UserState::default(),
                Reply::Menu {
                    text: RESET_MESSAGE.to_string(),
                    options: vec![FLOW_INCOME.to_string(), FLOW_OUTCOME.to_string()],
                },
            ));
        }

        let current = state.step();
        let step = match self.steps.get(current) {
            Some(step) => step,
            None => {
                log::debug!("User {} is idle at step {}", msg.user_id, current);
                return Ok(Transition::silent(state));
            }
        };

        let is_last_step = current == self.steps.len() - 1;
        if is_last_step {
            return self.finish(msg, state, now).await;
        }

        let text = match &msg.text {
            Some(text) => text.clone(),
            None => return Ok(Transition::silent(state)),
        };

        let mut state = state;
        state.set_answer(step.answer_key, text);
        state.current_step = Some(current + 1);

        let next = &self.steps[current + 1];
        let reply = match &next.options {
            None => Reply::Text(next.prompt.to_string()),
            Some(source) => {
                let range = source.resolve(&state);
                let options = self.options.options(range).await?;
                Reply::Menu {
                    text: next.prompt.to_string(),
                    options,
                }
            }
        };

        Ok(Transition::reply(state, reply))
    }

    // Terminal step: store the attachment, then commit the transaction. A failed upload
    // or ledger append keeps the state, so the user can resend the attachment.
    async fn finish(
        &self,
        msg: &InboundMessage,
        state: UserState,
        now: DateTime<Utc>,
    ) -> Result<Transition, ServiceError> {
        let attachment = match &msg.attachment {
            Some(attachment) => attachment,
            None => {
                log::debug!("User {} has not attached a file yet", msg.user_id);
                return Ok(Transition::silent(state));
            }
        };

        let file_name = attachment_file_name(attachment, msg.sender_name(), now, self.time_zone);
        // Classify before uploading, a failed lookup must not leave a stray file behind
        let transaction = self.complete(msg, &state, file_name, now).await?;

        let file_exists = match self.vault.store(attachment, &transaction.file_name).await {
            Ok(()) => true,
            Err(err) => {
                log::error!(
                    "User {} failed to store attachment {}: {}",
                    msg.user_id,
                    transaction.file_name,
                    err
                );
                false
            }
        };

        if !file_exists {
            return Ok(Transition::reply(
                state,
                Reply::Text(FILE_SAVE_ERROR_MESSAGE.to_string()),
            ));
        }

        if let Err(err) = self.ledger.append(&transaction).await {
            log::error!(
                "User {} failed to append {} to the ledger: {}",
                msg.user_id,
                transaction.file_name,
                err
            );
            return Ok(Transition {
                state,
                replies: vec![
                    Reply::Text(FILE_SAVED_MESSAGE.to_string()),
                    Reply::Text(LEDGER_SAVE_ERROR_MESSAGE.to_string()),
                ],
                completed: None,
            });
        }

        log::info!(
            "User {} recorded {} {} {}",
            msg.user_id,
            transaction.flow,
            transaction.amount,
            transaction.currency
        );

        Ok(Transition {
            state: UserState::default(),
            replies: vec![
                Reply::Text(FILE_SAVED_MESSAGE.to_string()),
                Reply::Text(DATA_SAVED_MESSAGE.to_string()),
            ],
            completed: Some(transaction),
        })
    }

    async fn complete(
        &self,
        msg: &InboundMessage,
        state: &UserState,
        file_name: String,
        now: DateTime<Utc>,
    ) -> Result<CompletedTransaction, ServiceError> {
        let field = |value: &Option<String>| value.clone().unwrap_or_default();

        let date = match state.transaction_date.as_deref() {
            Some(DATE_TODAY) => format_date(now, self.time_zone),
            other => other.unwrap_or_default().to_string(),
        };

        let transaction_type = field(&state.transaction_type);
        let classification = if transaction_type.is_empty() {
            String::new()
        } else {
            self.options.lookup(&transaction_type).await?
        };
        if classification.is_empty() {
            log::warn!(
                "Transaction type '{}' has no classification, keeping the amount as entered",
                transaction_type
            );
        }
        let is_outcome = classification == FLOW_OUTCOME;

        Ok(CompletedTransaction {
            timestamp: format_timestamp(now, self.time_zone),
            username: msg.username.clone().unwrap_or_default(),
            date,
            flow: field(&state.transaction_flow),
            transaction_type,
            currency: field(&state.transaction_currency),
            wallet: field(&state.transaction_wallet),
            amount: signed_amount(&field(&state.transaction_sum), is_outcome),
            purpose: field(&state.transaction_purpose),
            file_name,
        })
    }
}
