use teloxide::types::{ChatId, MessageId};

use crate::bot_state::BotState;
use crate::handlers::utils::main_menu_keyboard;
use crate::handlers::{cart, delete_replaced, description, BotError};
use crate::models::{ButtonIntent, ConversationState, ReplyKind, UserReply};
use crate::transport::Transport;

/// Показывает список товаров. Старое сообщение экрана удаляется только
/// после того, как новое реально ушло.
pub async fn display_main_menu<T: Transport>(
    transport: &T,
    app: &BotState,
    chat_id: ChatId,
    replacing: Option<MessageId>,
) -> Result<ConversationState, BotError> {
    let products = app.moltin.products().await?;
    let keyboard = main_menu_keyboard(&products);

    match transport.send_text(chat_id, "В наличии:", Some(keyboard)).await {
        Ok(_) => delete_replaced(transport, chat_id, replacing).await,
        Err(e) => log::warn!("⚠️ Failed to send main menu to chat {}: {}", chat_id, e),
    }

    Ok(ConversationState::HandleMainMenu)
}

pub async fn handle_main_menu<T: Transport>(
    transport: &T,
    app: &BotState,
    reply: &UserReply,
) -> Result<ConversationState, BotError> {
    let ReplyKind::Button {
        payload,
        message_id,
        ..
    } = &reply.kind
    else {
        return Err(BotError::UnexpectedInput {
            state: ConversationState::HandleMainMenu,
            details: "expected a button press".to_string(),
        });
    };

    match ButtonIntent::parse(payload, ConversationState::HandleMainMenu) {
        ButtonIntent::Cart => {
            cart::display_cart(transport, app, reply.chat_id, Some(*message_id)).await
        }
        ButtonIntent::SelectProduct(product_id) => {
            description::display_description(
                transport,
                app,
                reply.chat_id,
                &product_id,
                Some(*message_id),
            )
            .await
        }
        other => Err(BotError::UnexpectedInput {
            state: ConversationState::HandleMainMenu,
            details: format!("unsupported intent {:?}", other),
        }),
    }
}
