use std::error::Error;
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;

use crate::bot_state::BotState;
use crate::handlers::handle_user_reply;
use crate::models::{ReplyKind, UserReply};
use crate::transport::TelegramTransport;

#[derive(BotCommands, Clone)]
#[command(rename_rule = "lowercase", description = "Доступные команды:")]
pub enum Command {
    #[command(description = "начать покупки")]
    Start,
}

pub async fn command_handler(
    bot: Bot,
    msg: Message,
    cmd: Command,
    state: BotState,
) -> Result<(), Box<dyn Error + Send + Sync>> {
    match cmd {
        Command::Start => {
            log::info!("▶️ /start from chat {}", msg.chat.id);

            let transport = TelegramTransport::new(bot);
            let reply = UserReply {
                chat_id: msg.chat.id,
                kind: ReplyKind::Start,
            };

            handle_user_reply(&transport, &state, reply).await;
        }
    }

    Ok(())
}
