//! Admin dashboard endpoints.
//!
//! Every call carries `Authorization: Bearer <token>` with the token read
//! fresh from the store, so a login in another tab takes effect immediately.

use crate::{
    ApiError, ClientConfig, HttpTransport, Method, RequestOptions, decode, send_json,
};
use hb_api_types::{
    AdminOrder, DashboardStats, FormData, MenuCategory, MenuItem, OrderStatusUpdate, Promotion,
    PromotionToggle, Report,
};
use hb_storage::{JsonStore, keys};
use serde_json::Value;
use std::rc::Rc;

pub mod endpoints {
    pub const DASHBOARD_STATS: &str = "/admin/dashboard/stats";
    pub const ORDERS: &str = "/admin/orders";
    pub const ORDER_STATUS: &str = "/admin/orders/status";
    pub const MENU_ITEMS: &str = "/admin/menu/items";
    pub const MENU_CATEGORIES: &str = "/admin/menu/categories";
    pub const PROMOTIONS: &str = "/admin/promotions";
    pub const REPORTS: &str = "/admin/reports";
}

pub const DEFAULT_REPORT_PERIOD: &str = "monthly";

#[derive(Clone)]
pub struct AdminClient {
    config: ClientConfig,
    transport: Rc<dyn HttpTransport>,
    store: JsonStore,
}

impl AdminClient {
    pub fn new(config: ClientConfig, transport: Rc<dyn HttpTransport>, store: JsonStore) -> Self {
        Self {
            config,
            transport,
            store,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Raw request against `base_url + endpoint`.
    pub async fn api_request(
        &self,
        endpoint: &str,
        options: RequestOptions,
    ) -> Result<Value, ApiError> {
        let token = self.store.get_raw(keys::ADMIN_TOKEN).unwrap_or_default();
        let headers = vec![
            ("Content-Type".to_owned(), "application/json".to_owned()),
            ("Authorization".to_owned(), format!("Bearer {token}")),
        ];
        send_json(
            self.transport.as_ref(),
            self.config.url(endpoint),
            headers,
            options,
        )
        .await
    }

    pub async fn dashboard_stats(&self) -> Result<DashboardStats, ApiError> {
        decode(
            self.api_request(endpoints::DASHBOARD_STATS, RequestOptions::get())
                .await?,
        )
    }

    /// Orders matching `filters`, sent as a query string.
    pub async fn orders(&self, filters: &FormData) -> Result<Vec<AdminOrder>, ApiError> {
        let query = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(filters)
            .finish();
        let endpoint = if query.is_empty() {
            endpoints::ORDERS.to_owned()
        } else {
            format!("{}?{query}", endpoints::ORDERS)
        };
        decode(self.api_request(&endpoint, RequestOptions::get()).await?)
    }

    /// Orders still waiting on the kitchen: `pending` and `accepted`.
    pub async fn pending_orders(&self) -> Result<Vec<AdminOrder>, ApiError> {
        let endpoint = format!("{}?status=pending,accepted", endpoints::ORDERS);
        decode(self.api_request(&endpoint, RequestOptions::get()).await?)
    }

    pub async fn update_order_status(&self, update: &OrderStatusUpdate) -> Result<Value, ApiError> {
        self.api_request(
            endpoints::ORDER_STATUS,
            RequestOptions::with_body(Method::Put, update)?,
        )
        .await
    }

    /// Form submissions go out as the flat string map the form produced.
    pub async fn submit_status_form(&self, form: &FormData) -> Result<Value, ApiError> {
        self.api_request(
            endpoints::ORDER_STATUS,
            RequestOptions::with_body(Method::Put, form)?,
        )
        .await
    }

    pub async fn menu_items(&self) -> Result<Vec<MenuItem>, ApiError> {
        decode(
            self.api_request(endpoints::MENU_ITEMS, RequestOptions::get())
                .await?,
        )
    }

    pub async fn add_menu_item(&self, form: &FormData) -> Result<Value, ApiError> {
        self.api_request(
            endpoints::MENU_ITEMS,
            RequestOptions::with_body(Method::Post, form)?,
        )
        .await
    }

    pub async fn categories(&self) -> Result<Vec<MenuCategory>, ApiError> {
        decode(
            self.api_request(endpoints::MENU_CATEGORIES, RequestOptions::get())
                .await?,
        )
    }

    pub async fn add_category(&self, form: &FormData) -> Result<Value, ApiError> {
        self.api_request(
            endpoints::MENU_CATEGORIES,
            RequestOptions::with_body(Method::Post, form)?,
        )
        .await
    }

    pub async fn promotions(&self) -> Result<Vec<Promotion>, ApiError> {
        decode(
            self.api_request(endpoints::PROMOTIONS, RequestOptions::get())
                .await?,
        )
    }

    pub async fn add_promotion(&self, form: &FormData) -> Result<Value, ApiError> {
        self.api_request(
            endpoints::PROMOTIONS,
            RequestOptions::with_body(Method::Post, form)?,
        )
        .await
    }

    pub async fn set_promotion_enabled(&self, id: &str, enabled: bool) -> Result<Value, ApiError> {
        let endpoint = format!("{}/{}", endpoints::PROMOTIONS, crate::encode_path_segment(id));
        self.api_request(
            &endpoint,
            RequestOptions::with_body(Method::Patch, &PromotionToggle { enabled })?,
        )
        .await
    }

    pub async fn reports(&self, period: &str) -> Result<Report, ApiError> {
        let endpoint = format!(
            "{}?period={}",
            endpoints::REPORTS,
            crate::encode_path_segment(period)
        );
        decode(self.api_request(&endpoint, RequestOptions::get()).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::StubTransport;

    fn client(stub: Rc<StubTransport>) -> (AdminClient, JsonStore) {
        let store = JsonStore::in_memory();
        let client = AdminClient::new(ClientConfig::admin(), stub, store.clone());
        (client, store)
    }

    fn header<'a>(headers: &'a [(String, String)], name: &str) -> Option<&'a str> {
        headers
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    #[tokio::test]
    async fn token_is_read_on_every_call() -> anyhow::Result<()> {
        let stub = Rc::new(StubTransport::default());
        stub.reply(200, "{}").reply(200, "{}");
        let (client, store) = client(stub.clone());

        client.dashboard_stats().await?;
        let first = stub.last();
        assert_eq!(first.url, "http://localhost:3000/api/admin/dashboard/stats");
        assert_eq!(header(&first.headers, "Authorization"), Some("Bearer "));
        assert_eq!(
            header(&first.headers, "Content-Type"),
            Some("application/json")
        );

        store.set_raw(keys::ADMIN_TOKEN, "s3cret");
        client.dashboard_stats().await?;
        assert_eq!(
            header(&stub.last().headers, "Authorization"),
            Some("Bearer s3cret")
        );
        Ok(())
    }

    #[tokio::test]
    async fn order_filters_become_query_string() -> anyhow::Result<()> {
        let stub = Rc::new(StubTransport::default());
        stub.reply(200, r#"[{"id": 12, "customerName": "Sam", "items": "Soup", "total": 7.5, "status": "Pending", "date": "2025-12-01"}]"#);
        let (client, _) = client(stub.clone());

        let mut filters = FormData::new();
        filters.insert("status".into(), "pending".into());
        filters.insert("q".into(), "green bowl".into());
        let orders = client.orders(&filters).await?;

        assert_eq!(
            stub.last().url,
            "http://localhost:3000/api/admin/orders?q=green+bowl&status=pending"
        );
        assert_eq!(orders[0].id.0, "12");
        assert_eq!(orders[0].customer_name, "Sam");
        Ok(())
    }

    #[tokio::test]
    async fn promotion_toggle_patches_enabled_flag() -> anyhow::Result<()> {
        let stub = Rc::new(StubTransport::default());
        stub.reply(200, "");
        let (client, _) = client(stub.clone());

        client.set_promotion_enabled("7", false).await?;
        let sent = stub.last();
        assert_eq!(sent.method, Method::Patch);
        assert_eq!(sent.url, "http://localhost:3000/api/admin/promotions/7");
        assert_eq!(sent.body.as_deref(), Some(r#"{"enabled":false}"#));
        Ok(())
    }

    #[tokio::test]
    async fn failures_surface_as_errors() {
        let stub = Rc::new(StubTransport::default());
        stub.reply(401, "").fail("offline");
        let (client, _) = client(stub);

        assert!(matches!(
            client.menu_items().await,
            Err(ApiError::Status { status: 401, .. })
        ));
        assert!(matches!(
            client.categories().await,
            Err(ApiError::Transport { .. })
        ));
    }
}
