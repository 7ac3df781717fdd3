pub mod callbacks;
pub mod cart;
pub mod commands;
pub mod customer;
pub mod description;
pub mod menu;
pub mod messages;
pub mod utils;

pub use callbacks::callback_handler;
pub use commands::{command_handler, Command};
pub use messages::message_handler;

use teloxide::types::{ChatId, MessageId};
use thiserror::Error;

use crate::bot_state::BotState;
use crate::models::{ConversationState, ReplyKind, UserReply};
use crate::moltin::CommerceError;
use crate::session::SessionError;
use crate::transport::Transport;

/// Что видит пользователь, когда магазин недоступен
const COMMERCE_FAILURE_TEXT: &str = "⚠️ Что-то пошло не так. Попробуйте еще раз.";

#[derive(Debug, Error)]
pub enum BotError {
    #[error(transparent)]
    Commerce(#[from] CommerceError),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error("unknown conversation state '{0}' in store")]
    UnknownState(String),
    #[error("unexpected input in state {state}: {details}")]
    UnexpectedInput {
        state: ConversationState,
        details: String,
    },
}

/// Точка входа диалогового движка. Определяет, где пользователь находится,
/// зовёт обработчик этого положения и записывает следующее. Ошибки хода
/// гасятся здесь же, наружу в диспетчер они не выходят.
pub async fn handle_user_reply<T: Transport>(transport: &T, app: &BotState, reply: UserReply) {
    let chat_id = reply.chat_id;

    // Ходы одного чата строго по очереди
    let lock = app.turn_lock(chat_id).await;
    let _turn = lock.lock().await;

    let outcome = run_turn(transport, app, &reply).await;

    // Подтверждаем нажатие в любом исходе, иначе у кнопки зависнут часики
    if let ReplyKind::Button { callback_id, .. } = &reply.kind {
        if let Err(e) = transport.answer_callback(callback_id.clone()).await {
            log::debug!("Failed to answer callback query: {}", e);
        }
    }

    match outcome {
        Ok(next_state) => {
            if let Err(e) = app.store.set_state(chat_id, next_state).await {
                log::error!(
                    "❌ Failed to save state {} for chat {}: {}",
                    next_state,
                    chat_id,
                    e
                );
                app.alerts
                    .notify(&format!(
                        "❗ Не сохранилось состояние {} для чата {}: {}",
                        next_state, chat_id, e
                    ))
                    .await;
            }
        }
        Err(BotError::UnknownState(label)) => {
            log::error!(
                "❌ Unknown state '{}' stored for chat {}, resetting dialog",
                label,
                chat_id
            );
            app.alerts
                .notify(&format!(
                    "❗ Неизвестное состояние '{}' у чата {}, диалог сброшен",
                    label, chat_id
                ))
                .await;

            if let Err(e) = app
                .store
                .set_state(chat_id, ConversationState::DisplayMainMenu)
                .await
            {
                log::error!("❌ Failed to reset state for chat {}: {}", chat_id, e);
            }
        }
        Err(e) => {
            log::error!("❌ Error handling update for chat {}: {}", chat_id, e);
            app.alerts
                .notify(&format!("❗ Ошибка у чата {}: {}", chat_id, e))
                .await;

            // Про недоступный магазин пользователю сообщаем, положение
            // диалога при этом не трогаем
            if matches!(e, BotError::Commerce(_)) {
                if let Err(send_err) = transport
                    .send_text(chat_id, COMMERCE_FAILURE_TEXT, None)
                    .await
                {
                    log::warn!(
                        "⚠️ Failed to send failure notice to chat {}: {}",
                        chat_id,
                        send_err
                    );
                }
            }
        }
    }
}

async fn run_turn<T: Transport>(
    transport: &T,
    app: &BotState,
    reply: &UserReply,
) -> Result<ConversationState, BotError> {
    let current = current_state(app, reply).await?;
    log::debug!("🎯 Chat {} is in state {}", reply.chat_id, current);

    dispatch(transport, app, current, reply).await
}

/// Команда /start всегда начинает диалог заново. Чат без записи в
/// хранилище тоже начинает с главного меню.
async fn current_state(app: &BotState, reply: &UserReply) -> Result<ConversationState, BotError> {
    if matches!(reply.kind, ReplyKind::Start) {
        return Ok(ConversationState::DisplayMainMenu);
    }

    match app.store.state(reply.chat_id).await? {
        Some(label) => ConversationState::from_label(&label).ok_or(BotError::UnknownState(label)),
        None => Ok(ConversationState::DisplayMainMenu),
    }
}

async fn dispatch<T: Transport>(
    transport: &T,
    app: &BotState,
    current: ConversationState,
    reply: &UserReply,
) -> Result<ConversationState, BotError> {
    match current {
        ConversationState::DisplayMainMenu => {
            menu::display_main_menu(transport, app, reply.chat_id, None).await
        }
        ConversationState::HandleMainMenu => menu::handle_main_menu(transport, app, reply).await,
        ConversationState::DisplayDescription => match &reply.kind {
            ReplyKind::Button { payload, .. } => {
                description::display_description(transport, app, reply.chat_id, payload, None)
                    .await
            }
            _ => Err(BotError::UnexpectedInput {
                state: current,
                details: "expected a product button".to_string(),
            }),
        },
        ConversationState::HandleDescription => {
            description::handle_description(transport, app, reply).await
        }
        ConversationState::DisplayCart => {
            cart::display_cart(transport, app, reply.chat_id, None).await
        }
        ConversationState::HandleCart => cart::handle_cart(transport, app, reply).await,
        ConversationState::RequestCustomerInfo => {
            customer::request_customer_info(transport, reply.chat_id).await
        }
        ConversationState::HandleCustomerInfo => {
            customer::handle_customer_info(transport, app, reply).await
        }
    }
}

/// Удаление заменённого экрана. Сбой здесь не ломает ход: новое сообщение
/// уже у пользователя, старое просто остаётся висеть.
pub(crate) async fn delete_replaced<T: Transport>(
    transport: &T,
    chat_id: ChatId,
    replacing: Option<MessageId>,
) {
    let Some(message_id) = replacing else {
        return;
    };

    if let Err(e) = transport.delete_message(chat_id, message_id).await {
        log::warn!(
            "⚠️ Failed to delete message {} in chat {}: {}",
            message_id.0,
            chat_id,
            e
        );
    }
}
