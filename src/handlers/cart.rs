use teloxide::types::{ChatId, MessageId};

use crate::bot_state::BotState;
use crate::handlers::utils::{cart_keyboard, format_cart};
use crate::handlers::{customer, delete_replaced, menu, BotError};
use crate::models::{ButtonIntent, ConversationState, ReplyKind, UserReply};
use crate::transport::Transport;

/// Содержимое корзины с итогом и кнопками удаления позиций
pub async fn display_cart<T: Transport>(
    transport: &T,
    app: &BotState,
    chat_id: ChatId,
    replacing: Option<MessageId>,
) -> Result<ConversationState, BotError> {
    let cart = app.moltin.cart(chat_id).await?;
    let items = app.moltin.cart_items(chat_id).await?;

    let text = format_cart(&cart, &items);
    let keyboard = cart_keyboard(&items);

    match transport.send_text(chat_id, &text, Some(keyboard)).await {
        Ok(_) => delete_replaced(transport, chat_id, replacing).await,
        Err(e) => log::warn!("⚠️ Failed to send cart to chat {}: {}", chat_id, e),
    }

    Ok(ConversationState::HandleCart)
}

pub async fn handle_cart<T: Transport>(
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
            state: ConversationState::HandleCart,
            details: "expected a button press".to_string(),
        });
    };

    match ButtonIntent::parse(payload, ConversationState::HandleCart) {
        ButtonIntent::MainMenu => {
            menu::display_main_menu(transport, app, reply.chat_id, Some(*message_id)).await
        }
        ButtonIntent::Cart => display_cart(transport, app, reply.chat_id, Some(*message_id)).await,
        // Сообщение с корзиной остаётся на экране рядом с запросом почты
        ButtonIntent::Checkout => customer::request_customer_info(transport, reply.chat_id).await,
        ButtonIntent::RemoveCartItem(item_id) => {
            app.moltin.remove_cart_item(reply.chat_id, &item_id).await?;
            log::info!("🗑️ Chat {} removed cart item {}", reply.chat_id, item_id);

            display_cart(transport, app, reply.chat_id, Some(*message_id)).await
        }
        other => Err(BotError::UnexpectedInput {
            state: ConversationState::HandleCart,
            details: format!("unsupported intent {:?}", other),
        }),
    }
}
