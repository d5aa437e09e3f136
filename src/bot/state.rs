use serde::{Deserialize, Serialize};

use super::steps::AnswerKey;

/* Per-user conversation record.
 * Stored as JSON; unanswered fields are omitted, so a fresh state is `{}`.
 */
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_step: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_flow: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_wallet: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_sum: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_purpose: Option<String>,
}

impl UserState {
    pub fn step(&self) -> usize {
        self.current_step.unwrap_or(0)
    }

    pub fn answer(&self, key: AnswerKey) -> Option<&str> {
        let field = match key {
            AnswerKey::Flow => &self.transaction_flow,
            AnswerKey::Type => &self.transaction_type,
            AnswerKey::Currency => &self.transaction_currency,
            AnswerKey::Wallet => &self.transaction_wallet,
            AnswerKey::Date => &self.transaction_date,
            AnswerKey::Sum => &self.transaction_sum,
            AnswerKey::Purpose => &self.transaction_purpose,
            AnswerKey::Attachment => return None,
        };
        field.as_deref()
    }

    // Records an answer. The attachment is never kept in the state.
    pub fn set_answer(&mut self, key: AnswerKey, value: String) {
        let field = match key {
            AnswerKey::Flow => &mut self.transaction_flow,
            AnswerKey::Type => &mut self.transaction_type,
            AnswerKey::Currency => &mut self.transaction_currency,
            AnswerKey::Wallet => &mut self.transaction_wallet,
            AnswerKey::Date => &mut self.transaction_date,
            AnswerKey::Sum => &mut self.transaction_sum,
            AnswerKey::Purpose => &mut self.transaction_purpose,
            AnswerKey::Attachment => return,
        };
        *field = Some(value);
    }

    pub fn is_empty(&self) -> bool {
        *self == UserState::default()
    }
}
