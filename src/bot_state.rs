use std::collections::HashMap;
use std::sync::Arc;

use teloxide::types::ChatId;
use tokio::sync::Mutex;

use crate::alerts::Alerter;
use crate::moltin::MoltinClient;
use crate::session::SessionStore;

type TurnLocks = Arc<Mutex<HashMap<ChatId, Arc<Mutex<()>>>>>;

/// Общие зависимости бота, раздаются обработчикам через dptree
#[derive(Clone)]
pub struct BotState {
    pub store: Arc<dyn SessionStore>,
    pub moltin: Arc<MoltinClient>,
    pub alerts: Alerter,
    turn_locks: TurnLocks,
}

impl BotState {
    pub fn new(store: Arc<dyn SessionStore>, moltin: Arc<MoltinClient>, alerts: Alerter) -> Self {
        BotState {
            store,
            moltin,
            alerts,
            turn_locks: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Замок чата: апдейты одного пользователя обрабатываются строго по
    /// очереди, разные чаты друг друга не ждут
    pub async fn turn_lock(&self, chat_id: ChatId) -> Arc<Mutex<()>> {
        let mut locks = self.turn_locks.lock().await;
        locks
            .entry(chat_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Выкидывает замки, которые сейчас никто не держит
    pub async fn cleanup_turn_locks(&self) {
        let mut locks = self.turn_locks.lock().await;
        let previous_count = locks.len();

        locks.retain(|_, lock| Arc::strong_count(lock) > 1);

        let current_count = locks.len();
        log::debug!(
            "🧹 Turn locks cleaned: {} -> {} entries",
            previous_count,
            current_count
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::session::InMemorySessionStore;
    use std::time::Duration;

    fn state() -> BotState {
        let store: Arc<dyn SessionStore> = Arc::new(InMemorySessionStore::new());
        let config = Config {
            bot_token: "000:TEST".to_string(),
            database_url: String::new(),
            moltin_client_id: "client-id".to_string(),
            moltin_client_secret: "client-secret".to_string(),
            moltin_api_base: "http://127.0.0.1:9".to_string(),
            logger_bot_token: None,
            developer_chat_id: None,
            request_timeout: Duration::from_secs(5),
        };
        let moltin = Arc::new(MoltinClient::new(&config, store.clone()).unwrap());

        BotState::new(store, moltin, Alerter::disabled())
    }

    #[tokio::test]
    async fn same_chat_gets_same_lock() {
        let state = state();

        let first = state.turn_lock(ChatId(1)).await;
        let second = state.turn_lock(ChatId(1)).await;
        assert!(Arc::ptr_eq(&first, &second));

        let other = state.turn_lock(ChatId(2)).await;
        assert!(!Arc::ptr_eq(&first, &other));
    }

    #[tokio::test]
    async fn cleanup_keeps_only_held_locks() {
        let state = state();

        let held = state.turn_lock(ChatId(1)).await;
        {
            let _dropped = state.turn_lock(ChatId(2)).await;
        }

        state.cleanup_turn_locks().await;

        let held_again = state.turn_lock(ChatId(1)).await;
        assert!(Arc::ptr_eq(&held, &held_again));

        // Замок второго чата пересоздан заново
        let fresh = state.turn_lock(ChatId(2)).await;
        assert_eq!(Arc::strong_count(&fresh), 2);
    }
}
