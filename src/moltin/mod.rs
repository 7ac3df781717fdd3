pub mod models;
pub mod token;

use std::sync::Arc;

use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::json;
use teloxide::types::ChatId;
use thiserror::Error;
use url::Url;

use crate::config::Config;
use crate::session::SessionStore;
use models::{Cart, CartItem, Customer, Document, FileDescriptor, Product};
use token::TokenProvider;

#[derive(Debug, Error)]
pub enum CommerceError {
    #[error("Moltin authorization failed with HTTP {status}: {body}")]
    Auth { status: StatusCode, body: String },
    #[error("Moltin API returned HTTP {status}: {body}")]
    Api { status: StatusCode, body: String },
    #[error("cart quantity must be positive")]
    InvalidQuantity,
    #[error("file link is not a valid URL: {0}")]
    BadLink(#[from] url::ParseError),
    #[error("request to Moltin failed: {0}")]
    Request(#[from] reqwest::Error),
}

/// Клиент Moltin. Всё состояние магазина живёт на той стороне: товары,
/// корзины по id чата, покупатели. Токен подставляется провайдером
/// перед каждым вызовом.
pub struct MoltinClient {
    http: reqwest::Client,
    base_url: String,
    tokens: TokenProvider,
}

impl MoltinClient {
    pub fn new(config: &Config, store: Arc<dyn SessionStore>) -> Result<Self, CommerceError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        let tokens = TokenProvider::new(
            http.clone(),
            config.moltin_api_base.clone(),
            config.moltin_client_id.clone(),
            config.moltin_client_secret.clone(),
            store,
        );

        Ok(MoltinClient {
            http,
            base_url: config.moltin_api_base.clone(),
            tokens,
        })
    }

    /// Первый обмен client credentials. Зовётся на старте, чтобы процесс
    /// падал сразу, если доступ к магазину не настроен.
    pub async fn prime_token(&self) -> Result<(), CommerceError> {
        self.tokens.bearer().await?;
        Ok(())
    }

    /// Весь каталог товаров
    pub async fn products(&self) -> Result<Vec<Product>, CommerceError> {
        let bearer = self.tokens.bearer().await?;
        let response = self
            .http
            .get(format!("{}/v2/products", self.base_url))
            .bearer_auth(bearer)
            .send()
            .await?;

        let document: Document<Vec<Product>> = parse_document(response).await?;
        Ok(document.data)
    }

    pub async fn product(&self, product_id: &str) -> Result<Product, CommerceError> {
        let bearer = self.tokens.bearer().await?;
        let response = self
            .http
            .get(format!("{}/v2/products/{}", self.base_url, product_id))
            .bearer_auth(bearer)
            .send()
            .await?;

        let document: Document<Product> = parse_document(response).await?;
        Ok(document.data)
    }

    /// Прямая ссылка на файл, обычно картинку товара
    pub async fn file_url(&self, file_id: &str) -> Result<Url, CommerceError> {
        let bearer = self.tokens.bearer().await?;
        let response = self
            .http
            .get(format!("{}/v2/files/{}", self.base_url, file_id))
            .bearer_auth(bearer)
            .send()
            .await?;

        let document: Document<FileDescriptor> = parse_document(response).await?;
        Ok(Url::parse(&document.data.link.href)?)
    }

    /// Кладёт товар в корзину чата. Повторное добавление того же товара
    /// Moltin складывает в одну позицию. Возвращает содержимое корзины.
    pub async fn add_cart_item(
        &self,
        cart_id: ChatId,
        product_id: &str,
        quantity: u32,
    ) -> Result<Vec<CartItem>, CommerceError> {
        if quantity == 0 {
            return Err(CommerceError::InvalidQuantity);
        }

        let bearer = self.tokens.bearer().await?;
        let body = json!({
            "data": {
                "id": product_id,
                "type": "cart_item",
                "quantity": quantity,
            }
        });

        let response = self
            .http
            .post(format!("{}/v2/carts/{}/items", self.base_url, cart_id))
            .bearer_auth(bearer)
            .json(&body)
            .send()
            .await?;

        let document: Document<Vec<CartItem>> = parse_document(response).await?;
        Ok(document.data)
    }

    /// Корзина чата с посчитанным итогом. Для незнакомого чата Moltin
    /// отдаёт пустую корзину, отдельного шага создания нет.
    pub async fn cart(&self, cart_id: ChatId) -> Result<Cart, CommerceError> {
        let bearer = self.tokens.bearer().await?;
        let response = self
            .http
            .get(format!("{}/v2/carts/{}", self.base_url, cart_id))
            .bearer_auth(bearer)
            .send()
            .await?;

        let document: Document<Cart> = parse_document(response).await?;
        Ok(document.data)
    }

    pub async fn cart_items(&self, cart_id: ChatId) -> Result<Vec<CartItem>, CommerceError> {
        let bearer = self.tokens.bearer().await?;
        let response = self
            .http
            .get(format!("{}/v2/carts/{}/items", self.base_url, cart_id))
            .bearer_auth(bearer)
            .send()
            .await?;

        let document: Document<Vec<CartItem>> = parse_document(response).await?;
        Ok(document.data)
    }

    /// Убирает позицию из корзины, возвращает оставшееся содержимое
    pub async fn remove_cart_item(
        &self,
        cart_id: ChatId,
        item_id: &str,
    ) -> Result<Vec<CartItem>, CommerceError> {
        let bearer = self.tokens.bearer().await?;
        let response = self
            .http
            .delete(format!(
                "{}/v2/carts/{}/items/{}",
                self.base_url, cart_id, item_id
            ))
            .bearer_auth(bearer)
            .send()
            .await?;

        let document: Document<Vec<CartItem>> = parse_document(response).await?;
        Ok(document.data)
    }

    /// Заводит покупателя по почте. Имя берётся из локальной части адреса.
    pub async fn create_customer(&self, email: &str) -> Result<Customer, CommerceError> {
        let bearer = self.tokens.bearer().await?;
        let name = email.split_once('@').map_or(email, |(local, _)| local);
        let body = json!({
            "data": {
                "type": "customer",
                "name": name,
                "email": email,
            }
        });

        let response = self
            .http
            .post(format!("{}/v2/customers", self.base_url))
            .bearer_auth(bearer)
            .json(&body)
            .send()
            .await?;

        let document: Document<Customer> = parse_document(response).await?;
        Ok(document.data)
    }
}

/// Общий разбор ответа: не-2xx превращается в Api с телом как есть
async fn parse_document<T: DeserializeOwned>(
    response: Response,
) -> Result<Document<T>, CommerceError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(CommerceError::Api { status, body });
    }

    Ok(response.json().await?)
}
