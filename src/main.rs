use std::sync::Arc;
use std::time::Duration;

use teloxide::prelude::*;
use tokio::time;

use shop_bot::alerts::Alerter;
use shop_bot::bot_state::BotState;
use shop_bot::config::Config;
use shop_bot::handlers::{callback_handler, command_handler, message_handler, Command};
use shop_bot::moltin::MoltinClient;
use shop_bot::session::{PgSessionStore, SessionStore};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Загружаем .env и инициализируем логирование
    dotenvy::dotenv().ok();
    env_logger::init();
    log::info!("Starting shop bot...");

    let config = Config::from_env()?;

    // Инициализация хранилища состояний
    let store = PgSessionStore::new(&config.database_url).await?;
    store.init().await?;
    log::info!("✅ Session store initialized");

    let store: Arc<dyn SessionStore> = Arc::new(store);
    let moltin = Arc::new(MoltinClient::new(&config, store.clone())?);

    // Первый обмен токена: без доступа к магазину не стартуем
    moltin.prime_token().await?;
    log::info!("✅ Moltin access token obtained");

    let alerts = Alerter::from_config(&config);
    let state = BotState::new(store, moltin, alerts);

    // Фоновая очистка замков чатов
    let state_clone = state.clone();
    tokio::spawn(async move {
        let mut interval = time::interval(Duration::from_secs(600));
        loop {
            interval.tick().await;
            state_clone.cleanup_turn_locks().await;
        }
    });

    let bot = Bot::new(config.bot_token.clone());

    let handler = dptree::entry()
        .branch(
            Update::filter_message()
                .filter_command::<Command>()
                .endpoint(command_handler),
        )
        .branch(Update::filter_callback_query().endpoint(callback_handler))
        .branch(Update::filter_message().endpoint(message_handler));

    log::info!("🚀 Starting dispatcher...");

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![state])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}
