use std::error::Error;
use teloxide::prelude::*;

use crate::bot_state::BotState;
use crate::handlers::handle_user_reply;
use crate::models::{ReplyKind, UserReply};
use crate::transport::TelegramTransport;

pub async fn callback_handler(
    bot: Bot,
    q: CallbackQuery,
    state: BotState,
) -> Result<(), Box<dyn Error + Send + Sync>> {
    let Some(payload) = q.data.as_deref() else {
        return Ok(());
    };

    // Без исходного сообщения нажатие некуда привязать, такое бывает
    // у совсем старых клавиатур
    let Some(message) = q.message.as_ref() else {
        log::warn!("⚠️ Callback query without source message, skipping");
        return Ok(());
    };

    let transport = TelegramTransport::new(bot);
    let reply = UserReply {
        chat_id: message.chat().id,
        kind: ReplyKind::Button {
            payload: payload.to_string(),
            message_id: message.id(),
            callback_id: q.id.clone(),
        },
    };

    handle_user_reply(&transport, &state, reply).await;

    Ok(())
}
