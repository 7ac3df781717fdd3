use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use super::CommerceError;
use crate::session::SessionStore;

/// Токен Moltin. Поле expires приходит от API unix-временем истечения.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessToken {
    pub access_token: String,
    pub expires: i64,
}

impl AccessToken {
    pub fn is_fresh(&self) -> bool {
        Utc::now().timestamp() < self.expires
    }
}

/// Выдаёт действующий bearer. Порядок поиска: своя ячейка, общий слот
/// в хранилище, новый обмен client credentials. Свежий токен дописывается
/// обратно в слот, чтобы соседние процессы не ходили за своим.
pub struct TokenProvider {
    http: reqwest::Client,
    base_url: String,
    client_id: String,
    client_secret: String,
    store: Arc<dyn SessionStore>,
    cell: Mutex<Option<AccessToken>>,
}

impl TokenProvider {
    pub fn new(
        http: reqwest::Client,
        base_url: String,
        client_id: String,
        client_secret: String,
        store: Arc<dyn SessionStore>,
    ) -> Self {
        TokenProvider {
            http,
            base_url,
            client_id,
            client_secret,
            store,
            cell: Mutex::new(None),
        }
    }

    pub async fn bearer(&self) -> Result<String, CommerceError> {
        // Ячейка держится запертой на весь путь, чтобы параллельные вызовы
        // не устроили несколько обменов разом
        let mut cell = self.cell.lock().await;

        if let Some(token) = cell.as_ref() {
            if token.is_fresh() {
                return Ok(token.access_token.clone());
            }
        }

        match self.store.shared_token().await {
            Ok(Some(stored)) if stored.is_fresh() => {
                let bearer = stored.access_token.clone();
                *cell = Some(stored);
                return Ok(bearer);
            }
            Ok(_) => {}
            Err(e) => log::warn!("⚠️ Failed to read shared token slot: {}", e),
        }

        let fresh = self.exchange().await?;
        log::info!("🔑 Obtained new Moltin access token");

        if let Err(e) = self.store.set_shared_token(&fresh).await {
            log::warn!("⚠️ Failed to store token in shared slot: {}", e);
        }

        let bearer = fresh.access_token.clone();
        *cell = Some(fresh);

        Ok(bearer)
    }

    async fn exchange(&self) -> Result<AccessToken, CommerceError> {
        let params = [
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
            ("grant_type", "client_credentials"),
        ];

        let response = self
            .http
            .post(format!("{}/oauth/access_token", self.base_url))
            .form(&params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CommerceError::Auth { status, body });
        }

        Ok(response.json().await?)
    }
}
