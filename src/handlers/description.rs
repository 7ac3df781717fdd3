use teloxide::types::{ChatId, MessageId};

use crate::bot_state::BotState;
use crate::handlers::utils::{description_keyboard, format_description};
use crate::handlers::{cart, delete_replaced, menu, BotError};
use crate::models::{ButtonIntent, ConversationState, ReplyKind, UserReply};
use crate::transport::Transport;

/// Карточка товара: фото с подписью и кнопками количества
pub async fn display_description<T: Transport>(
    transport: &T,
    app: &BotState,
    chat_id: ChatId,
    product_id: &str,
    replacing: Option<MessageId>,
) -> Result<ConversationState, BotError> {
    let product = app.moltin.product(product_id).await?;
    let image_url = app
        .moltin
        .file_url(&product.relationships.main_image.data.id)
        .await?;

    let caption = format_description(&product);
    let keyboard = description_keyboard(&product.id);

    match transport
        .send_photo(chat_id, image_url, &caption, Some(keyboard))
        .await
    {
        Ok(_) => delete_replaced(transport, chat_id, replacing).await,
        Err(e) => log::warn!("⚠️ Failed to send product card to chat {}: {}", chat_id, e),
    }

    Ok(ConversationState::HandleDescription)
}

pub async fn handle_description<T: Transport>(
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
            state: ConversationState::HandleDescription,
            details: "expected a button press".to_string(),
        });
    };

    match ButtonIntent::parse(payload, ConversationState::HandleDescription) {
        ButtonIntent::MainMenu => {
            menu::display_main_menu(transport, app, reply.chat_id, Some(*message_id)).await
        }
        ButtonIntent::Cart => {
            cart::display_cart(transport, app, reply.chat_id, Some(*message_id)).await
        }
        ButtonIntent::AddToCart {
            product_id,
            quantity,
        } => {
            // Карточка остаётся на экране, можно добавлять ещё
            app.moltin
                .add_cart_item(reply.chat_id, &product_id, quantity)
                .await?;
            log::info!(
                "🛒 Chat {} added {} x {} to cart",
                reply.chat_id,
                quantity,
                product_id
            );

            Ok(ConversationState::HandleDescription)
        }
        other => Err(BotError::UnexpectedInput {
            state: ConversationState::HandleDescription,
            details: format!("unsupported intent {:?}", other),
        }),
    }
}
