use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{CallbackQueryId, InlineKeyboardMarkup, InputFile, MessageId};
use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("telegram request failed: {0}")]
    Telegram(#[from] teloxide::RequestError),
}

/// Исходящие действия движка в чате. В бою за трейтом стоит Telegram,
/// в тестах запись вызовов.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send_text(
        &self,
        chat_id: ChatId,
        text: &str,
        keyboard: Option<InlineKeyboardMarkup>,
    ) -> Result<MessageId, TransportError>;

    async fn send_photo(
        &self,
        chat_id: ChatId,
        photo_url: Url,
        caption: &str,
        keyboard: Option<InlineKeyboardMarkup>,
    ) -> Result<MessageId, TransportError>;

    async fn delete_message(
        &self,
        chat_id: ChatId,
        message_id: MessageId,
    ) -> Result<(), TransportError>;

    async fn answer_callback(&self, callback_id: CallbackQueryId) -> Result<(), TransportError>;
}

pub struct TelegramTransport {
    bot: Bot,
}

impl TelegramTransport {
    pub fn new(bot: Bot) -> Self {
        TelegramTransport { bot }
    }
}

#[async_trait]
impl Transport for TelegramTransport {
    async fn send_text(
        &self,
        chat_id: ChatId,
        text: &str,
        keyboard: Option<InlineKeyboardMarkup>,
    ) -> Result<MessageId, TransportError> {
        let mut request = self.bot.send_message(chat_id, text);
        if let Some(keyboard) = keyboard {
            request = request.reply_markup(keyboard);
        }

        let message = request.await?;
        Ok(message.id)
    }

    async fn send_photo(
        &self,
        chat_id: ChatId,
        photo_url: Url,
        caption: &str,
        keyboard: Option<InlineKeyboardMarkup>,
    ) -> Result<MessageId, TransportError> {
        let mut request = self
            .bot
            .send_photo(chat_id, InputFile::url(photo_url))
            .caption(caption);
        if let Some(keyboard) = keyboard {
            request = request.reply_markup(keyboard);
        }

        let message = request.await?;
        Ok(message.id)
    }

    async fn delete_message(
        &self,
        chat_id: ChatId,
        message_id: MessageId,
    ) -> Result<(), TransportError> {
        self.bot.delete_message(chat_id, message_id).await?;
        Ok(())
    }

    async fn answer_callback(&self, callback_id: CallbackQueryId) -> Result<(), TransportError> {
        self.bot.answer_callback_query(callback_id).await?;
        Ok(())
    }
}
