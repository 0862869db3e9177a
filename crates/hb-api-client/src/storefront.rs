//! Storefront endpoints used by the customer pages.
//!
//! In dev mode a failed call is logged and answered from [`mock_data`], so the
//! pages work without a backend.

use crate::{ApiError, ClientConfig, HttpTransport, Method, RequestOptions, decode, send_json};
use hb_api_types::{CartItem, CheckoutRequest, Credentials, Favorite, MenuEntry, SignupRequest};
use serde_json::{Value, json};
use std::rc::Rc;
use tracing::warn;

/// Canned payload for `endpoint`; `{}` for anything not listed.
pub fn mock_data(endpoint: &str) -> Value {
    match endpoint {
        "/user/profile" => json!({ "name": "John Doe", "email": "john@example.com" }),
        "/menu" => json!([
            { "id": 1, "name": "Salad", "price": 10.99 },
            { "id": 2, "name": "Pasta", "price": 12.99 }
        ]),
        "/cart" | "/orders" => json!([]),
        _ => json!({}),
    }
}

#[derive(Clone)]
pub struct StorefrontClient {
    config: ClientConfig,
    transport: Rc<dyn HttpTransport>,
}

impl StorefrontClient {
    pub fn new(config: ClientConfig, transport: Rc<dyn HttpTransport>) -> Self {
        Self { config, transport }
    }

    pub async fn request(&self, endpoint: &str, options: RequestOptions) -> Result<Value, ApiError> {
        let headers = vec![("Content-Type".to_owned(), "application/json".to_owned())];
        match send_json(
            self.transport.as_ref(),
            self.config.url(endpoint),
            headers,
            options,
        )
        .await
        {
            Ok(value) => Ok(value),
            Err(err) if self.config.dev_mode => {
                warn!(endpoint, "dev mode: returning mock data for failed call ({err})");
                Ok(mock_data(endpoint))
            }
            Err(err) => Err(err),
        }
    }

    pub async fn login(&self, credentials: &Credentials) -> Result<Value, ApiError> {
        self.request(
            "/auth/login",
            RequestOptions::with_body(Method::Post, credentials)?,
        )
        .await
    }

    pub async fn signup(&self, user: &SignupRequest) -> Result<Value, ApiError> {
        self.request("/auth/signup", RequestOptions::with_body(Method::Post, user)?)
            .await
    }

    pub async fn menu(&self) -> Result<Vec<MenuEntry>, ApiError> {
        decode(self.request("/menu", RequestOptions::get()).await?)
    }

    pub async fn add_to_cart(&self, item: &CartItem) -> Result<Value, ApiError> {
        self.request("/cart", RequestOptions::with_body(Method::Post, item)?)
            .await
    }

    pub async fn cart(&self) -> Result<Vec<CartItem>, ApiError> {
        decode(self.request("/cart", RequestOptions::get()).await?)
    }

    pub async fn update_cart(&self, items: &[CartItem]) -> Result<Value, ApiError> {
        self.request("/cart", RequestOptions::with_body(Method::Put, items)?)
            .await
    }

    pub async fn checkout(&self, order: &CheckoutRequest) -> Result<Value, ApiError> {
        self.request("/orders", RequestOptions::with_body(Method::Post, order)?)
            .await
    }

    /// Left untyped: the dev-mode fallback for this endpoint is `{}`.
    pub async fn favorites(&self) -> Result<Value, ApiError> {
        self.request("/favorites", RequestOptions::get()).await
    }

    pub async fn add_favorite(&self, favorite: &Favorite) -> Result<Value, ApiError> {
        self.request(
            "/favorites",
            RequestOptions::with_body(Method::Post, favorite)?,
        )
        .await
    }

    pub async fn remove_favorite(&self, name: &str) -> Result<Value, ApiError> {
        let endpoint = format!("/favorites/{}", crate::encode_path_segment(name));
        self.request(&endpoint, RequestOptions::method(Method::Delete))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::StubTransport;
    use rust_decimal::Decimal;

    #[tokio::test]
    async fn dev_mode_falls_back_to_mock_menu() -> anyhow::Result<()> {
        let stub = Rc::new(StubTransport::default());
        stub.fail("connection refused");
        let client = StorefrontClient::new(ClientConfig::storefront(true), stub.clone());

        let menu = client.menu().await?;
        assert_eq!(menu.len(), 2);
        assert_eq!(menu[0].name, "Salad");
        assert_eq!(menu[0].price, Decimal::new(1099, 2));
        assert_eq!(stub.last().url, "http://localhost:3000/api/menu");
        Ok(())
    }

    #[tokio::test]
    async fn production_mode_propagates_failures() {
        let stub = Rc::new(StubTransport::default());
        stub.reply(503, "");
        let client = StorefrontClient::new(ClientConfig::storefront(false), stub.clone());

        assert!(matches!(
            client.cart().await,
            Err(ApiError::Status { status: 503, .. })
        ));
        assert_eq!(stub.last().url, "/api/cart");
    }

    #[tokio::test]
    async fn unknown_endpoints_mock_to_empty_object() -> anyhow::Result<()> {
        let stub = Rc::new(StubTransport::default());
        stub.reply(500, "");
        let client = StorefrontClient::new(ClientConfig::storefront(true), stub.clone());

        let value = client.remove_favorite("Green Smoothie").await?;
        assert_eq!(value, json!({}));
        let sent = stub.last();
        assert_eq!(sent.method, Method::Delete);
        assert!(sent.url.ends_with("/favorites/Green%20Smoothie"));
        Ok(())
    }

    #[tokio::test]
    async fn login_posts_credentials() -> anyhow::Result<()> {
        let stub = Rc::new(StubTransport::default());
        stub.reply(200, r#"{"token":"t"}"#);
        let client = StorefrontClient::new(ClientConfig::storefront(false), stub.clone());

        let reply = client
            .login(&Credentials {
                email: "a@b.c".into(),
                password: "pw".into(),
            })
            .await?;
        assert_eq!(reply["token"], "t");
        assert_eq!(
            stub.last().body.as_deref(),
            Some(r#"{"email":"a@b.c","password":"pw"}"#)
        );
        Ok(())
    }
}
