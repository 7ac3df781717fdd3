use teloxide::types::{CallbackQueryId, ChatId, MessageId};

/// Входящее событие пользователя, приведённое к общему виду. Дальше
/// диалоговому движку всё равно, из какого апдейта оно собрано.
#[derive(Debug, Clone)]
pub struct UserReply {
    pub chat_id: ChatId,
    pub kind: ReplyKind,
}

#[derive(Debug, Clone)]
pub enum ReplyKind {
    /// Команда /start
    Start,
    /// Обычное текстовое сообщение
    Text(String),
    /// Нажатие inline-кнопки
    Button {
        payload: String,
        /// Сообщение, на котором была клавиатура
        message_id: MessageId,
        /// Идентификатор callback-запроса для подтверждения
        callback_id: CallbackQueryId,
    },
}
