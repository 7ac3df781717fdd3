use std::env;
use std::time::Duration;

use anyhow::Context;
use teloxide::types::ChatId;

const DEFAULT_API_BASE: &str = "https://api.moltin.com";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Настройки процесса, читаются один раз при старте
#[derive(Debug, Clone)]
pub struct Config {
    pub bot_token: String,
    pub database_url: String,
    pub moltin_client_id: String,
    pub moltin_client_secret: String,
    /// База API без хвостового слэша
    pub moltin_api_base: String,
    pub logger_bot_token: Option<String>,
    pub developer_chat_id: Option<ChatId>,
    pub request_timeout: Duration,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let bot_token =
            env::var("TELEGRAM_BOT_TOKEN").context("TELEGRAM_BOT_TOKEN must be set")?;
        let database_url = env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
        let moltin_client_id =
            env::var("MOLTIN_CLIENT_ID").context("MOLTIN_CLIENT_ID must be set")?;
        let moltin_client_secret =
            env::var("MOLTIN_CLIENT_SECRET").context("MOLTIN_CLIENT_SECRET must be set")?;

        let moltin_api_base = env::var("MOLTIN_API_BASE")
            .unwrap_or_else(|_| DEFAULT_API_BASE.to_string())
            .trim_end_matches('/')
            .to_string();

        // Канал оповещений разработчика не обязателен
        let logger_bot_token = env::var("TELEGRAM_LOGGER_BOT_TOKEN").ok();
        let developer_chat_id = match env::var("TELEGRAM_DEVELOPER_USER_ID") {
            Ok(raw) => Some(ChatId(raw.parse().context(
                "TELEGRAM_DEVELOPER_USER_ID must be an integer chat id",
            )?)),
            Err(_) => None,
        };

        let request_timeout = match env::var("REQUEST_TIMEOUT_SECS") {
            Ok(raw) => Duration::from_secs(
                raw.parse()
                    .context("REQUEST_TIMEOUT_SECS must be an integer")?,
            ),
            Err(_) => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        Ok(Config {
            bot_token,
            database_url,
            moltin_client_id,
            moltin_client_secret,
            moltin_api_base,
            logger_bot_token,
            developer_chat_id,
            request_timeout,
        })
    }
}
