//! Admin form dispatch: one [`FormCommand`] per form id.

use crate::AdminDashboard;
use anyhow::Result;
use async_trait::async_trait;
use hb_api_types::FormData;
use hb_shop_core::{Notifier, Severity};
use std::collections::HashMap;
use std::rc::Rc;
use tracing::warn;

pub const ADD_CATEGORY_FORM: &str = "add-category-form";
pub const ADD_DISH_FORM: &str = "add-dish-form";
pub const STATUS_UPDATE_FORM: &str = "status-update-form";
pub const ADD_PROMOTION_FORM: &str = "add-promotion-form";
pub const SEARCH_FILTER_FORM: &str = "search-filter-form";

#[async_trait(?Send)]
pub trait FormCommand {
    fn form_id(&self) -> &str;
    async fn submit(&self, dashboard: &AdminDashboard, form: FormData) -> Result<()>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    Handled,
    Unknown,
    Failed(String),
}

#[derive(Default)]
pub struct CommandRegistry {
    commands: HashMap<String, Rc<dyn FormCommand>>,
}

impl CommandRegistry {
    /// Registry with a handler for every admin form.
    pub fn with_admin_forms() -> Self {
        let mut registry = Self::default();
        registry.register(Rc::new(AddCategory));
        registry.register(Rc::new(AddDish));
        registry.register(Rc::new(StatusUpdate));
        registry.register(Rc::new(AddPromotion));
        registry.register(Rc::new(SearchFilter));
        registry
    }

    pub fn register(&mut self, command: Rc<dyn FormCommand>) {
        self.commands.insert(command.form_id().to_owned(), command);
    }

    pub fn command(&self, form_id: &str) -> Option<Rc<dyn FormCommand>> {
        self.commands.get(form_id).cloned()
    }

    /// Run the handler for `form_id`, notifying unknown forms and failures.
    pub async fn dispatch(
        &self,
        dashboard: &AdminDashboard,
        form_id: &str,
        form: FormData,
    ) -> DispatchOutcome {
        let Some(command) = self.command(form_id) else {
            warn!(form_id, "no handler for form");
            dashboard.notifier.notify("Form submission not implemented yet", Severity::Warning);
            return DispatchOutcome::Unknown;
        };
        match command.submit(dashboard, form).await {
            Ok(()) => DispatchOutcome::Handled,
            Err(err) => {
                let message = err.to_string();
                dashboard
                    .notifier
                    .notify(&format!("Error: {message}"), Severity::Error);
                DispatchOutcome::Failed(message)
            }
        }
    }
}

struct AddCategory;
struct AddDish;
struct StatusUpdate;
struct AddPromotion;
struct SearchFilter;

#[async_trait(?Send)]
impl FormCommand for AddCategory {
    fn form_id(&self) -> &str {
        ADD_CATEGORY_FORM
    }

    async fn submit(&self, dashboard: &AdminDashboard, form: FormData) -> Result<()> {
        Ok(dashboard.add_category(&form).await?)
    }
}

#[async_trait(?Send)]
impl FormCommand for AddDish {
    fn form_id(&self) -> &str {
        ADD_DISH_FORM
    }

    async fn submit(&self, dashboard: &AdminDashboard, form: FormData) -> Result<()> {
        Ok(dashboard.add_menu_item(&form).await?)
    }
}

#[async_trait(?Send)]
impl FormCommand for StatusUpdate {
    fn form_id(&self) -> &str {
        STATUS_UPDATE_FORM
    }

    async fn submit(&self, dashboard: &AdminDashboard, form: FormData) -> Result<()> {
        Ok(dashboard.update_order_status(&form).await?)
    }
}

#[async_trait(?Send)]
impl FormCommand for AddPromotion {
    fn form_id(&self) -> &str {
        ADD_PROMOTION_FORM
    }

    async fn submit(&self, dashboard: &AdminDashboard, form: FormData) -> Result<()> {
        Ok(dashboard.add_promotion(&form).await?)
    }
}

#[async_trait(?Send)]
impl FormCommand for SearchFilter {
    fn form_id(&self) -> &str {
        SEARCH_FILTER_FORM
    }

    async fn submit(&self, dashboard: &AdminDashboard, form: FormData) -> Result<()> {
        dashboard.filter_orders(&form).await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedBackend;
    use hb_api_client::{AdminClient, ClientConfig};
    use hb_shop_core::RecordingNotifier;
    use hb_storage::JsonStore;

    fn setup() -> (AdminDashboard, Rc<ScriptedBackend>, Rc<RecordingNotifier>) {
        let backend = Rc::new(ScriptedBackend::default());
        let notifier = Rc::new(RecordingNotifier::default());
        let client = AdminClient::new(ClientConfig::admin(), backend.clone(), JsonStore::in_memory());
        (AdminDashboard::new(client, notifier.clone()), backend, notifier)
    }

    #[tokio::test]
    async fn unknown_form_warns() {
        let (dash, _, notifier) = setup();
        let registry = CommandRegistry::with_admin_forms();

        let outcome = registry.dispatch(&dash, "newsletter-form", FormData::new()).await;

        assert_eq!(outcome, DispatchOutcome::Unknown);
        assert_eq!(
            notifier.last(),
            Some((
                "Form submission not implemented yet".to_owned(),
                Severity::Warning
            ))
        );
    }

    #[tokio::test]
    async fn handler_failure_is_reported_twice() {
        let (dash, backend, notifier) = setup();
        backend.push(500, "");
        let registry = CommandRegistry::with_admin_forms();

        let outcome = registry.dispatch(&dash, ADD_CATEGORY_FORM, FormData::new()).await;

        assert_eq!(
            outcome,
            DispatchOutcome::Failed("HTTP error! status: 500".into())
        );
        assert_eq!(
            notifier.entries(),
            vec![
                ("Failed to add category".to_owned(), Severity::Error),
                ("Error: HTTP error! status: 500".to_owned(), Severity::Error),
            ]
        );
    }

    #[tokio::test]
    async fn search_filter_reloads_orders_with_query() {
        let (dash, backend, _) = setup();
        backend.push(200, "[]");
        let registry = CommandRegistry::with_admin_forms();

        let mut form = FormData::new();
        form.insert("status".into(), "delivered".into());
        let outcome = registry.dispatch(&dash, SEARCH_FILTER_FORM, form).await;

        assert_eq!(outcome, DispatchOutcome::Handled);
        assert!(backend.requests.borrow()[0].url.ends_with("/admin/orders?status=delivered"));
        assert_eq!(dash.tables().orders, Some(vec![]));
    }
}
