use std::error::Error;
use teloxide::prelude::*;

use crate::bot_state::BotState;
use crate::handlers::handle_user_reply;
use crate::models::{ReplyKind, UserReply};
use crate::transport::TelegramTransport;

pub async fn message_handler(
    bot: Bot,
    msg: Message,
    state: BotState,
) -> Result<(), Box<dyn Error + Send + Sync>> {
    let Some(text) = msg.text() else {
        // Стикеры, фото и прочее без текста движку не нужны
        return Ok(());
    };

    // Команды уже разобраны в command_handler
    if text.starts_with('/') {
        return Ok(());
    }

    let transport = TelegramTransport::new(bot);
    let reply = UserReply {
        chat_id: msg.chat.id,
        kind: ReplyKind::Text(text.to_string()),
    };

    handle_user_reply(&transport, &state, reply).await;

    Ok(())
}
