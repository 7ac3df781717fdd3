use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::Row;
use teloxide::types::ChatId;
use thiserror::Error;
use tokio::sync::RwLock;

use crate::models::ConversationState;
use crate::moltin::token::AccessToken;

/// Имя общего слота, в котором лежит токен Moltin
const TOKEN_SLOT: &str = "moltin_access_token";

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("stored value is not valid JSON: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Хранилище положений диалогов и общих слотов. Бот сам по себе ничего
/// не помнит, после перезапуска всё восстанавливается отсюда.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Сырая метка состояния чата, если чат уже встречался
    async fn state(&self, chat_id: ChatId) -> Result<Option<String>, SessionError>;

    async fn set_state(
        &self,
        chat_id: ChatId,
        state: ConversationState,
    ) -> Result<(), SessionError>;

    /// Общий для всех чатов токен Moltin
    async fn shared_token(&self) -> Result<Option<AccessToken>, SessionError>;

    async fn set_shared_token(&self, token: &AccessToken) -> Result<(), SessionError>;
}

pub struct PgSessionStore {
    pool: PgPool,
}

impl PgSessionStore {
    pub async fn new(database_url: &str) -> Result<Self, SessionError> {
        let pool = PgPoolOptions::new()
            .max_connections(20)
            .min_connections(5)
            .acquire_timeout(Duration::from_secs(30))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(1800))
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        Ok(PgSessionStore { pool })
    }

    /// Создаёт таблицы, если их ещё нет
    pub async fn init(&self) -> Result<(), SessionError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS conversation_states (
                chat_id BIGINT PRIMARY KEY,
                state TEXT NOT NULL,
                created_at TIMESTAMP WITH TIME ZONE DEFAULT NOW(),
                updated_at TIMESTAMP WITH TIME ZONE DEFAULT NOW()
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS shared_slots (
                name TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at TIMESTAMP WITH TIME ZONE DEFAULT NOW()
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_conversation_states_updated_at
            ON conversation_states (updated_at)
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

#[async_trait]
impl SessionStore for PgSessionStore {
    async fn state(&self, chat_id: ChatId) -> Result<Option<String>, SessionError> {
        let row = sqlx::query("SELECT state FROM conversation_states WHERE chat_id = $1")
            .bind(chat_id.0)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|row| row.get("state")))
    }

    async fn set_state(
        &self,
        chat_id: ChatId,
        state: ConversationState,
    ) -> Result<(), SessionError> {
        sqlx::query(
            r#"
            INSERT INTO conversation_states (chat_id, state, updated_at)
            VALUES ($1, $2, NOW())
            ON CONFLICT (chat_id)
            DO UPDATE SET state = EXCLUDED.state, updated_at = NOW()
            "#,
        )
        .bind(chat_id.0)
        .bind(state.label())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn shared_token(&self) -> Result<Option<AccessToken>, SessionError> {
        let row = sqlx::query("SELECT value FROM shared_slots WHERE name = $1")
            .bind(TOKEN_SLOT)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => {
                let value: String = row.get("value");
                Ok(Some(serde_json::from_str(&value)?))
            }
            None => Ok(None),
        }
    }

    async fn set_shared_token(&self, token: &AccessToken) -> Result<(), SessionError> {
        let value = serde_json::to_string(token)?;

        sqlx::query(
            r#"
            INSERT INTO shared_slots (name, value, updated_at)
            VALUES ($1, $2, NOW())
            ON CONFLICT (name)
            DO UPDATE SET value = EXCLUDED.value, updated_at = NOW()
            "#,
        )
        .bind(TOKEN_SLOT)
        .bind(value)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

/// Хранилище в памяти: для тестов и локального запуска без Postgres
#[derive(Default)]
pub struct InMemorySessionStore {
    states: RwLock<HashMap<ChatId, String>>,
    token: RwLock<Option<AccessToken>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn state(&self, chat_id: ChatId) -> Result<Option<String>, SessionError> {
        Ok(self.states.read().await.get(&chat_id).cloned())
    }

    async fn set_state(
        &self,
        chat_id: ChatId,
        state: ConversationState,
    ) -> Result<(), SessionError> {
        self.states
            .write()
            .await
            .insert(chat_id, state.label().to_string());
        Ok(())
    }

    async fn shared_token(&self) -> Result<Option<AccessToken>, SessionError> {
        Ok(self.token.read().await.clone())
    }

    async fn set_shared_token(&self, token: &AccessToken) -> Result<(), SessionError> {
        *self.token.write().await = Some(token.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unseen_chat_has_no_state() {
        let store = InMemorySessionStore::new();
        let state = store.state(ChatId(1)).await.unwrap();
        assert_eq!(state, None);
    }

    #[tokio::test]
    async fn set_state_overwrites_previous_value() {
        let store = InMemorySessionStore::new();
        store
            .set_state(ChatId(1), ConversationState::HandleMainMenu)
            .await
            .unwrap();
        store
            .set_state(ChatId(1), ConversationState::HandleCart)
            .await
            .unwrap();

        let state = store.state(ChatId(1)).await.unwrap();
        assert_eq!(state.as_deref(), Some("HANDLE_CART"));
    }

    #[tokio::test]
    async fn chats_do_not_share_state() {
        let store = InMemorySessionStore::new();
        store
            .set_state(ChatId(1), ConversationState::HandleCart)
            .await
            .unwrap();

        assert_eq!(store.state(ChatId(2)).await.unwrap(), None);
    }

    #[tokio::test]
    async fn shared_token_round_trips() {
        let store = InMemorySessionStore::new();
        assert!(store.shared_token().await.unwrap().is_none());

        let token = AccessToken {
            access_token: "abc".to_string(),
            expires: 4_102_444_800,
        };
        store.set_shared_token(&token).await.unwrap();

        assert_eq!(store.shared_token().await.unwrap(), Some(token));
    }
}
