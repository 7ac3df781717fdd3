use teloxide::types::ChatId;

use crate::bot_state::BotState;
use crate::handlers::{menu, BotError};
use crate::models::{ConversationState, ReplyKind, UserReply};
use crate::transport::Transport;

const EMAIL_PROMPT: &str =
    "Введите вашу почту. Мы свяжимся по ней с вами для подтверждения покупки товара.";

/// Просит почту для оформления заказа
pub async fn request_customer_info<T: Transport>(
    transport: &T,
    chat_id: ChatId,
) -> Result<ConversationState, BotError> {
    if let Err(e) = transport.send_text(chat_id, EMAIL_PROMPT, None).await {
        log::warn!("⚠️ Failed to send email prompt to chat {}: {}", chat_id, e);
    }

    Ok(ConversationState::HandleCustomerInfo)
}

/// Заводит покупателя по присланной почте и возвращает в главное меню.
/// Почта не проверяется на вид, пригодность адреса решает магазин.
pub async fn handle_customer_info<T: Transport>(
    transport: &T,
    app: &BotState,
    reply: &UserReply,
) -> Result<ConversationState, BotError> {
    let ReplyKind::Text(email) = &reply.kind else {
        return Err(BotError::UnexpectedInput {
            state: ConversationState::HandleCustomerInfo,
            details: "expected a text message with an email".to_string(),
        });
    };

    let customer = app.moltin.create_customer(email).await?;
    log::info!(
        "✅ Created customer {} for chat {}",
        customer.id,
        reply.chat_id
    );

    let confirmation = format!("Вы указали: {}. Напишем вам в течение 24 часов.", email);
    if let Err(e) = transport.send_text(reply.chat_id, &confirmation, None).await {
        log::warn!(
            "⚠️ Failed to send checkout confirmation to chat {}: {}",
            reply.chat_id,
            e
        );
    }

    menu::display_main_menu(transport, app, reply.chat_id, None).await
}
