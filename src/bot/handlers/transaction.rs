use std::{future::Future, sync::Arc};

use chrono::{DateTime, Utc};
use teloxide::prelude::*;

use crate::bot::{
    constants::messages::UNKNOWN_ERROR_MESSAGE,
    dispatcher::BotContext,
    processor::{Conversation, InboundMessage, Reply},
    redis::StateStore,
    utils::{bot_actions::send_replies, HandlerResult},
};

/* Transaction message.
 * Every message goes through the conversation driver. Updates of one chat are handled
 * sequentially by the dispatcher, so there is a single writer per user.
 */
pub async fn handle_message(bot: Bot, msg: Message, context: Arc<BotContext>) -> HandlerResult {
    // Service messages have no sender
    let inbound = match InboundMessage::from_message(&msg) {
        Some(inbound) => inbound,
        None => return Ok(()),
    };

    let chat_id = inbound.chat_id;
    process_message(
        &context.conversation,
        &context.store,
        &inbound,
        Utc::now(),
        |replies| async move { send_replies(&bot, chat_id, &replies).await },
    )
    .await
}

/* Reads the state, advances it, delivers the replies and writes the state back once.
 * When the driver fails the stored state is left alone so the user can send the same
 * answer again.
 */
pub async fn process_message<S, F, Fut>(
    conversation: &Conversation,
    store: &S,
    inbound: &InboundMessage,
    now: DateTime<Utc>,
    deliver: F,
) -> HandlerResult
where
    S: StateStore + ?Sized,
    F: FnOnce(Vec<Reply>) -> Fut,
    Fut: Future<Output = HandlerResult>,
{
    let state = store.get_or_create_user_state(&inbound.user_id)?;

    let transition = match conversation.advance(inbound, state, now).await {
        Ok(transition) => transition,
        Err(err) => {
            log::error!(
                "User {} failed to advance in chat {}: {}",
                inbound.user_id,
                inbound.chat_id,
                err
            );
            return deliver(vec![Reply::Text(UNKNOWN_ERROR_MESSAGE.to_string())]).await;
        }
    };

    if let Err(err) = deliver(transition.replies).await {
        log::error!(
            "Failed to reply to user {} in chat {}: {}",
            inbound.user_id,
            inbound.chat_id,
            err
        );
    }

    store.save_user_state(&inbound.user_id, &transition.state)?;
    Ok(())
}
