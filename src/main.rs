use ledgerbot::bot::{run_dispatcher, Config};

#[tokio::main]
pub async fn main() {
    pretty_env_logger::init();
    dotenv::dotenv().ok();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            log::error!("Failed to load configuration: {}", err);
            std::process::exit(1);
        }
    };

    let bot = teloxide::Bot::from_env();

    run_dispatcher(bot, config).await;
}
