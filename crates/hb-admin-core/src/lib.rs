//! Admin dashboard logic: loads each resource through [`AdminClient`], keeps
//! the last successfully rendered tables, and reports outcomes through a
//! [`Notifier`].

pub mod commands;
pub mod views;

use hb_api_client::{AdminClient, ApiError, admin::DEFAULT_REPORT_PERIOD};
use hb_api_types::{FormData, OrderStatusUpdate};
use hb_shop_core::{Notifier, Severity};
use std::cell::{Ref, RefCell};
use std::rc::Rc;
use tracing::{debug, error};

pub use commands::{CommandRegistry, DispatchOutcome, FormCommand};
pub use views::{
    MenuRow, OrderRow, PendingRow, PendingTables, PromotionRow, ReportView, SelectOption,
    StatusBadge,
};

/// Everything currently drawn on the admin pages. `None` means never loaded.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct AdminTables {
    pub stats: Option<Vec<(String, String)>>,
    pub orders: Option<Vec<OrderRow>>,
    pub menu: Option<Vec<MenuRow>>,
    pub category_options: Option<Vec<SelectOption>>,
    pub promotions: Option<Vec<PromotionRow>>,
    pub report: Option<ReportView>,
    pub pending: Option<PendingTables>,
}

/// Page sections whose presence triggers an initial load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminSection {
    DashboardStats,
    OrdersTable,
    MenuItemsTable,
    StatusUpdate,
    PromotionsTable,
    SalesReport,
}

/// What the page should do with a status select after a change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusChange {
    /// Saved. The pending tables should be reloaded once the badge animation
    /// has played when `refresh_pending` is set.
    Applied { refresh_pending: bool },
    /// Not saved; the select shows `select_value` again.
    Reverted { select_value: String },
}

#[derive(Clone)]
pub struct AdminDashboard {
    client: AdminClient,
    notifier: Rc<dyn Notifier>,
    tables: Rc<RefCell<AdminTables>>,
}

impl AdminDashboard {
    pub fn new(client: AdminClient, notifier: Rc<dyn Notifier>) -> Self {
        Self {
            client,
            notifier,
            tables: Rc::new(RefCell::new(AdminTables::default())),
        }
    }

    pub fn tables(&self) -> Ref<'_, AdminTables> {
        self.tables.borrow()
    }

    pub fn client(&self) -> &AdminClient {
        &self.client
    }

    fn notify(&self, message: &str, severity: Severity) {
        self.notifier.notify(message, severity);
    }

    /// Initial loads for the sections present on the page.
    pub async fn init(&self, sections: &[AdminSection]) {
        for section in sections {
            match section {
                AdminSection::DashboardStats => self.load_dashboard_stats().await,
                AdminSection::OrdersTable => self.load_orders(&FormData::new()).await,
                AdminSection::MenuItemsTable => {
                    self.load_menu_items().await;
                    self.load_categories("").await;
                }
                AdminSection::StatusUpdate => self.load_pending_orders().await,
                AdminSection::PromotionsTable => self.load_promotions().await,
                AdminSection::SalesReport => self.load_reports(DEFAULT_REPORT_PERIOD).await,
            }
        }
    }

    pub async fn load_dashboard_stats(&self) {
        match self.client.dashboard_stats().await {
            Ok(stats) => self.tables.borrow_mut().stats = Some(views::stat_cards(&stats)),
            Err(err) => {
                self.notify("Failed to load dashboard stats", Severity::Error);
                error!("dashboard stats error: {err}");
            }
        }
    }

    pub async fn load_orders(&self, filters: &FormData) {
        match self.client.orders(filters).await {
            Ok(orders) => self.tables.borrow_mut().orders = Some(views::order_rows(&orders)),
            Err(err) => {
                self.notify("Failed to load orders", Severity::Error);
                error!("load orders error: {err}");
            }
        }
    }

    pub async fn filter_orders(&self, filters: &FormData) {
        self.load_orders(filters).await;
    }

    /// Submit of the status update form.
    pub async fn update_order_status(&self, form: &FormData) -> Result<(), ApiError> {
        let result = self.client.submit_status_form(form).await;
        self.after_status_update(result).await
    }

    async fn put_status(&self, update: &OrderStatusUpdate) -> Result<(), ApiError> {
        let result = self.client.update_order_status(update).await;
        self.after_status_update(result).await
    }

    async fn after_status_update(
        &self,
        result: Result<serde_json::Value, ApiError>,
    ) -> Result<(), ApiError> {
        match result {
            Ok(_) => {
                self.notify("Order status updated successfully", Severity::Success);
                self.load_orders(&FormData::new()).await;
                Ok(())
            }
            Err(err) => {
                self.notify("Failed to update order status", Severity::Error);
                Err(err)
            }
        }
    }

    pub async fn load_menu_items(&self) {
        match self.client.menu_items().await {
            Ok(items) => self.tables.borrow_mut().menu = Some(views::menu_rows(&items)),
            Err(err) => {
                self.notify("Failed to load menu items", Severity::Error);
                error!("load menu items error: {err}");
            }
        }
    }

    pub async fn add_menu_item(&self, form: &FormData) -> Result<(), ApiError> {
        if let Err(err) = self.client.add_menu_item(form).await {
            self.notify("Failed to add menu item", Severity::Error);
            return Err(err);
        }
        self.notify("Menu item added successfully", Severity::Success);
        self.load_menu_items().await;
        Ok(())
    }

    /// Refresh the category select, keeping `current` selected. Failures are
    /// only logged.
    pub async fn load_categories(&self, current: &str) {
        match self.client.categories().await {
            Ok(categories) => {
                self.tables.borrow_mut().category_options =
                    Some(views::category_options(&categories, current));
            }
            Err(err) => error!("load categories error: {err}"),
        }
    }

    pub async fn add_category(&self, form: &FormData) -> Result<(), ApiError> {
        if let Err(err) = self.client.add_category(form).await {
            self.notify("Failed to add category", Severity::Error);
            return Err(err);
        }
        self.notify("Category added successfully", Severity::Success);
        let current = self.selected_category();
        self.load_categories(&current).await;
        Ok(())
    }

    fn selected_category(&self) -> String {
        self.tables
            .borrow()
            .category_options
            .as_ref()
            .and_then(|options| options.iter().find(|o| o.selected))
            .map(|o| o.value.clone())
            .unwrap_or_default()
    }

    pub async fn load_promotions(&self) {
        match self.client.promotions().await {
            Ok(promos) => {
                self.tables.borrow_mut().promotions = Some(views::promotion_rows(&promos))
            }
            Err(err) => {
                self.notify("Failed to load promotions", Severity::Error);
                error!("load promotions error: {err}");
            }
        }
    }

    pub async fn add_promotion(&self, form: &FormData) -> Result<(), ApiError> {
        if let Err(err) = self.client.add_promotion(form).await {
            self.notify("Failed to add promotion", Severity::Error);
            return Err(err);
        }
        self.notify("Promotion added successfully", Severity::Success);
        self.load_promotions().await;
        Ok(())
    }

    pub async fn toggle_promotion(&self, id: &str, enabled: bool) -> Result<(), ApiError> {
        if let Err(err) = self.client.set_promotion_enabled(id, enabled).await {
            self.notify("Failed to update promotion status", Severity::Error);
            return Err(err);
        }
        if let Some(rows) = self.tables.borrow_mut().promotions.as_mut() {
            if let Some(row) = rows.iter_mut().find(|row| row.id == id) {
                row.enabled = enabled;
            }
        }
        let state = if enabled { "enabled" } else { "disabled" };
        self.notify(
            &format!("Promotion {state} successfully"),
            Severity::Success,
        );
        Ok(())
    }

    pub async fn load_reports(&self, period: &str) {
        match self.client.reports(period).await {
            Ok(report) => {
                let view = views::report_view(&report);
                if view.charts.is_some() {
                    debug!("report carries chart data; charts are not rendered");
                }
                self.tables.borrow_mut().report = Some(view);
            }
            Err(err) => {
                self.notify("Failed to load reports", Severity::Error);
                error!("load reports error: {err}");
            }
        }
    }

    pub async fn load_pending_orders(&self) {
        match self.client.pending_orders().await {
            Ok(orders) => self.tables.borrow_mut().pending = Some(views::pending_tables(&orders)),
            Err(err) => {
                self.notify("Failed to load pending orders", Severity::Error);
                error!("load pending orders error: {err}");
            }
        }
    }

    /// A status select on the order status page changed to `new_status`.
    ///
    /// The select moves at once; the badge follows only when the backend
    /// accepts the change, otherwise the select falls back to the badge.
    /// `shown_badge` is the label the page currently shows for the row; it is
    /// used when the row is not part of a loaded table.
    pub async fn change_order_status(
        &self,
        order_id: &str,
        new_status: &str,
        shown_badge: &str,
    ) -> StatusChange {
        self.with_pending_row(order_id, |row| row.select(new_status));

        let update = OrderStatusUpdate {
            order_id: order_id.to_owned(),
            status: new_status.to_owned(),
        };
        match self.put_status(&update).await {
            Ok(()) => {
                self.with_pending_row(order_id, |row| row.badge = StatusBadge::new(new_status));
                StatusChange::Applied {
                    refresh_pending: matches!(new_status, "accepted" | "delivered"),
                }
            }
            Err(err) => {
                error!(order_id, "status change failed: {err}");
                let select_value = self
                    .with_pending_row(order_id, |row| {
                        let current = row.badge.label.to_lowercase();
                        row.select(&current);
                        current
                    })
                    .unwrap_or_else(|| shown_badge.trim().to_lowercase());
                StatusChange::Reverted { select_value }
            }
        }
    }

    fn with_pending_row<T>(&self, order_id: &str, f: impl FnOnce(&mut PendingRow) -> T) -> Option<T> {
        let mut tables = self.tables.borrow_mut();
        tables.pending.as_mut()?.row_mut(order_id).map(f)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use async_trait::async_trait;
    use hb_api_client::{ApiRequest, ApiResponse, HttpTransport};
    use std::cell::RefCell;
    use std::collections::VecDeque;

    /// Serves queued `(status, body)` pairs; an empty queue refuses the
    /// connection.
    #[derive(Default)]
    pub struct ScriptedBackend {
        replies: RefCell<VecDeque<(u16, String)>>,
        pub requests: RefCell<Vec<ApiRequest>>,
    }

    impl ScriptedBackend {
        pub fn push(&self, status: u16, body: &str) {
            self.replies
                .borrow_mut()
                .push_back((status, body.to_owned()));
        }
    }

    #[async_trait(?Send)]
    impl HttpTransport for ScriptedBackend {
        async fn send(&self, request: ApiRequest) -> anyhow::Result<ApiResponse> {
            self.requests.borrow_mut().push(request);
            let (status, body) = self
                .replies
                .borrow_mut()
                .pop_front()
                .ok_or_else(|| anyhow::anyhow!("connection refused"))?;
            Ok(ApiResponse { status, body })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::ScriptedBackend;
    use super::*;
    use hb_api_client::{ClientConfig, Method};
    use hb_shop_core::RecordingNotifier;
    use hb_storage::JsonStore;

    fn dashboard() -> (AdminDashboard, Rc<ScriptedBackend>, Rc<RecordingNotifier>) {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
        let backend = Rc::new(ScriptedBackend::default());
        let notifier = Rc::new(RecordingNotifier::default());
        let client = AdminClient::new(ClientConfig::admin(), backend.clone(), JsonStore::in_memory());
        (AdminDashboard::new(client, notifier.clone()), backend, notifier)
    }

    const ORDERS: &str = r#"[{"id": 1, "customerName": "Ana", "items": "Salad", "total": 10.99, "status": "Delivered", "date": "2025-12-01"}]"#;

    #[tokio::test]
    async fn failed_load_keeps_previous_table() {
        let (dash, backend, notifier) = dashboard();
        backend.push(200, ORDERS);
        dash.load_orders(&FormData::new()).await;
        let before = dash.tables().orders.clone();
        assert_eq!(before.as_ref().map(Vec::len), Some(1));

        backend.push(500, "");
        dash.load_orders(&FormData::new()).await;

        assert_eq!(dash.tables().orders, before);
        assert_eq!(
            notifier.last(),
            Some(("Failed to load orders".to_owned(), Severity::Error))
        );
    }

    #[tokio::test]
    async fn category_failure_is_silent() {
        let (dash, _backend, notifier) = dashboard();
        dash.load_categories("").await;
        assert!(notifier.entries().is_empty());
        assert!(dash.tables().category_options.is_none());
    }

    #[tokio::test]
    async fn adding_a_dish_reloads_the_menu() -> anyhow::Result<()> {
        let (dash, backend, notifier) = dashboard();
        backend.push(201, r#"{"id": 9}"#);
        backend.push(200, r#"[{"id": 9, "name": "Poke", "category": "Bowls", "price": 11, "description": "", "image": "poke.png"}]"#);

        let mut form = FormData::new();
        form.insert("name".into(), "Poke".into());
        dash.add_menu_item(&form).await?;

        assert_eq!(dash.tables().menu.as_ref().unwrap()[0].price, "$11");
        assert_eq!(
            notifier.entries()[0],
            ("Menu item added successfully".to_owned(), Severity::Success)
        );
        let requests = backend.requests.borrow();
        assert_eq!(requests[0].method, Method::Post);
        assert_eq!(requests[0].body.as_deref(), Some(r#"{"name":"Poke"}"#));
        Ok(())
    }

    #[tokio::test]
    async fn rejected_status_change_reverts_select() {
        let (dash, backend, notifier) = dashboard();
        backend.push(200, r#"[{"id": 4, "customerName": "Bo", "items": "Wrap", "total": 9, "status": "pending", "date": ""}]"#);
        dash.load_pending_orders().await;

        backend.push(500, "");
        let outcome = dash.change_order_status("4", "accepted", "Pending").await;

        assert_eq!(
            outcome,
            StatusChange::Reverted {
                select_value: "pending".into()
            }
        );
        let tables = dash.tables();
        let row = &tables.pending.as_ref().unwrap().pending[0];
        assert_eq!(row.selected(), Some("pending"));
        assert_eq!(row.badge.label, "Pending");
        assert_eq!(notifier.count(Severity::Error), 1);
    }

    #[tokio::test]
    async fn rejected_change_on_unloaded_row_keeps_shown_status() {
        let (dash, backend, notifier) = dashboard();

        backend.push(500, "");
        let outcome = dash.change_order_status("4", "accepted", " Pending ").await;

        assert_eq!(
            outcome,
            StatusChange::Reverted {
                select_value: "pending".into()
            }
        );
        assert!(dash.tables().pending.is_none());
        assert_eq!(notifier.count(Severity::Error), 1);
    }

    #[tokio::test]
    async fn accepted_status_change_updates_badge() {
        let (dash, backend, notifier) = dashboard();
        backend.push(200, r#"[{"id": 4, "customerName": "Bo", "items": "Wrap", "total": 9, "status": "pending", "date": ""}]"#);
        dash.load_pending_orders().await;

        backend.push(200, "{}");
        backend.push(200, ORDERS);
        let outcome = dash.change_order_status("4", "accepted", "Pending").await;

        assert_eq!(outcome, StatusChange::Applied { refresh_pending: true });
        let tables = dash.tables();
        let row = &tables.pending.as_ref().unwrap().pending[0];
        assert_eq!(row.badge, StatusBadge::new("accepted"));
        assert_eq!(row.selected(), Some("accepted"));
        assert_eq!(notifier.count(Severity::Success), 1);
        assert_eq!(
            backend.requests.borrow()[1].body.as_deref(),
            Some(r#"{"orderId":"4","status":"accepted"}"#)
        );
    }

    #[tokio::test]
    async fn toggling_a_promotion_updates_its_row() -> anyhow::Result<()> {
        let (dash, backend, notifier) = dashboard();
        backend.push(200, r#"[{"id": "p1", "name": "Winter", "description": "", "discount": 10, "expiryDate": "2026-01-01", "enabled": true}]"#);
        dash.load_promotions().await;

        backend.push(200, "");
        dash.toggle_promotion("p1", false).await?;

        let tables = dash.tables();
        let row = &tables.promotions.as_ref().unwrap()[0];
        assert_eq!(row.status_label(), "Disabled");
        assert_eq!(row.discount, "10%");
        assert_eq!(
            notifier.last(),
            Some((
                "Promotion disabled successfully".to_owned(),
                Severity::Success
            ))
        );
        Ok(())
    }

    #[tokio::test]
    async fn init_loads_menu_and_categories() {
        let (dash, backend, _) = dashboard();
        backend.push(200, "[]");
        backend.push(200, r#"[{"id": 1, "name": "Bowls"}]"#);
        dash.init(&[AdminSection::MenuItemsTable]).await;

        let tables = dash.tables();
        assert_eq!(tables.menu, Some(vec![]));
        assert_eq!(tables.category_options.as_ref().map(Vec::len), Some(2));
    }
}
