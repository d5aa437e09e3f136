/* Common utilites for handlers. */

use teloxide::{prelude::*, types::ChatId, Bot};

use crate::bot::processor::Reply;

use super::{format::make_keyboard, BotError};

// Sends a plain text message.
pub async fn send_text(bot: &Bot, chat_id: ChatId, text: &str) -> Result<(), BotError> {
    bot.send_message(chat_id, text).await?;
    Ok(())
}

// Sends a message together with a one-time menu of options.
pub async fn send_menu(
    bot: &Bot,
    chat_id: ChatId,
    text: &str,
    options: &[String],
) -> Result<(), BotError> {
    bot.send_message(chat_id, text)
        .reply_markup(make_keyboard(options))
        .await?;
    Ok(())
}

// Delivers the replies of a transition in order.
pub async fn send_replies(bot: &Bot, chat_id: ChatId, replies: &[Reply]) -> Result<(), BotError> {
    for reply in replies {
        match reply {
            Reply::Text(text) => send_text(bot, chat_id, text).await?,
            Reply::Menu { text, options } => send_menu(bot, chat_id, text, options).await?,
        }
    }
    Ok(())
}
