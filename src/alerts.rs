use teloxide::prelude::*;

use crate::config::Config;

/// Оповещения разработчика: отдельный бот пишет в личный чат про ошибки,
/// до которых пользователь сам не дотянется.
#[derive(Clone)]
pub struct Alerter {
    channel: Option<(Bot, ChatId)>,
}

impl Alerter {
    pub fn from_config(config: &Config) -> Self {
        match (&config.logger_bot_token, config.developer_chat_id) {
            (Some(token), Some(chat_id)) => Alerter {
                channel: Some((Bot::new(token.clone()), chat_id)),
            },
            _ => {
                log::warn!(
                    "⚠️ Operator alerts disabled: set TELEGRAM_LOGGER_BOT_TOKEN and TELEGRAM_DEVELOPER_USER_ID to enable them"
                );
                Alerter { channel: None }
            }
        }
    }

    pub fn disabled() -> Self {
        Alerter { channel: None }
    }

    /// Отправка без гарантий: сбой канала оповещений не должен ронять
    /// обработку апдейта
    pub async fn notify(&self, text: &str) {
        let Some((bot, chat_id)) = &self.channel else {
            return;
        };

        if let Err(e) = bot.send_message(*chat_id, text).await {
            log::warn!("⚠️ Failed to deliver operator alert: {}", e);
        }
    }
}
