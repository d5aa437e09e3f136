use std::sync::Arc;

use teloxide::{
    dispatching::{update_listeners::webhooks, UpdateFilterExt, UpdateHandler},
    prelude::*,
    utils::command::BotCommands,
};

use super::{
    config::Config, drive::DriveVault, handlers::handle_message, processor::Conversation,
    redis::UserStateStore, sheets::SheetsClient, utils::BotError,
};

/* Commands. Both reset the conversation and ask for the direction of funds. */
#[derive(BotCommands, Clone)]
#[command(rename_rule = "lowercase", description = "These commands are supported:")]
pub enum Command {
    #[command(description = "Start recording a transaction.")]
    Start,
    #[command(description = "Discard the current answers and start over.")]
    Reset,
}

// Shared by all handlers
pub struct BotContext {
    pub conversation: Conversation,
    pub store: UserStateStore,
}

pub async fn run_dispatcher(bot: Bot, config: Config) {
    let store = match UserStateStore::new(&config.redis_url) {
        Ok(store) => store,
        Err(err) => {
            log::error!("Failed to open user state store: {}", err);
            return;
        }
    };

    let http = reqwest::Client::new();
    let sheets = Arc::new(SheetsClient::new(
        http.clone(),
        config.sheets.clone(),
        config.google_access_token.clone(),
    ));
    let vault = Arc::new(DriveVault::new(
        bot.clone(),
        http,
        config.drive_folder_id.clone(),
        config.google_access_token.clone(),
    ));
    let conversation = Conversation::new(sheets.clone(), vault, sheets, config.time_zone);
    let context = Arc::new(BotContext {
        conversation,
        store,
    });

    if let Err(err) = bot.set_my_commands(Command::bot_commands()).await {
        log::warn!("Failed to register bot commands: {}", err);
    }

    let mut dispatcher = Dispatcher::builder(bot.clone(), schema())
        .dependencies(dptree::deps![context])
        .enable_ctrlc_handler()
        .build();

    match config.webhook {
        Some(webhook) => {
            let url = match webhook.url.parse() {
                Ok(url) => url,
                Err(err) => {
                    log::error!("Invalid webhook URL {}: {}", webhook.url, err);
                    return;
                }
            };

            // Registers the webhook with Telegram and serves it on the given address
            let options = webhooks::Options::new(webhook.address, url);
            match webhooks::axum(bot, options).await {
                Ok(listener) => {
                    log::info!("Listening for updates on {}", webhook.address);
                    dispatcher
                        .dispatch_with_listener(
                            listener,
                            LoggingErrorHandler::with_custom_text(
                                "An error from the update listener",
                            ),
                        )
                        .await
                }
                Err(err) => log::error!("Failed to set up webhook: {}", err),
            }
        }
        None => {
            log::info!("Polling for updates");
            dispatcher.dispatch().await
        }
    }
}

pub fn schema() -> UpdateHandler<BotError> {
    Update::filter_message().endpoint(handle_message)
}
