//! Table rows and widgets of the admin pages, built from API payloads.

use hb_api_types::{
    AdminOrder, DashboardStats, MenuCategory, MenuItem, Promotion, Report, display_value,
};

pub const ENABLED_COLOR: &str = "#66bb6a";
pub const DISABLED_COLOR: &str = "#ef5350";

/// Text for every `[data-api-target]` card the stats payload knows about.
pub fn stat_cards(stats: &DashboardStats) -> Vec<(String, String)> {
    stats
        .iter()
        .map(|(target, value)| (target.clone(), display_value(value)))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusBadge {
    pub label: String,
    pub class: String,
}

impl StatusBadge {
    pub fn new(status: &str) -> Self {
        Self {
            label: status.to_owned(),
            class: status.to_lowercase(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRow {
    pub id: String,
    pub customer_name: String,
    pub items: String,
    pub total: String,
    pub badge: StatusBadge,
    pub date: String,
}

pub fn order_rows(orders: &[AdminOrder]) -> Vec<OrderRow> {
    orders
        .iter()
        .map(|order| OrderRow {
            id: order.id.to_string(),
            customer_name: order.customer_name.clone(),
            items: order.items.clone(),
            total: format!("${}", order.total),
            badge: StatusBadge::new(&order.status),
            date: order.date.clone(),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuRow {
    pub image: String,
    pub name: String,
    pub category: String,
    pub price: String,
    pub description: String,
}

pub fn menu_rows(items: &[MenuItem]) -> Vec<MenuRow> {
    items
        .iter()
        .map(|item| MenuRow {
            image: item.image.clone(),
            name: item.name.clone(),
            category: item.category.clone(),
            price: format!("${}", item.price),
            description: item.description.clone(),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

impl SelectOption {
    fn new(value: &str, label: &str, selected: bool) -> Self {
        Self {
            value: value.to_owned(),
            label: label.to_owned(),
            selected,
        }
    }
}

/// Options for the dish category select. `current` stays selected if it is
/// still offered.
pub fn category_options(categories: &[MenuCategory], current: &str) -> Vec<SelectOption> {
    std::iter::once(SelectOption::new("", "Select Category", false))
        .chain(categories.iter().map(|cat| {
            let id = cat.id.to_string();
            let selected = id == current;
            SelectOption::new(&id, &cat.name, selected)
        }))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromotionRow {
    pub id: String,
    pub name: String,
    pub description: String,
    pub discount: String,
    pub expiry_date: String,
    pub enabled: bool,
}

impl PromotionRow {
    pub fn status_label(&self) -> &'static str {
        if self.enabled { "Enabled" } else { "Disabled" }
    }

    pub fn status_color(&self) -> &'static str {
        if self.enabled {
            ENABLED_COLOR
        } else {
            DISABLED_COLOR
        }
    }
}

pub fn promotion_rows(promotions: &[Promotion]) -> Vec<PromotionRow> {
    promotions
        .iter()
        .map(|promo| PromotionRow {
            id: promo.id.to_string(),
            name: promo.name.clone(),
            description: promo.description.clone(),
            discount: format!("{}%", promo.discount),
            expiry_date: promo.expiry_date.clone(),
            enabled: promo.enabled,
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopItemRow {
    pub rank: usize,
    pub name: String,
    pub category: String,
    pub orders: u64,
    pub revenue: String,
}

/// Sections of a report that were present in the payload. Absent sections
/// leave the page untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportView {
    pub summary: Option<Vec<(String, String)>>,
    pub charts: Option<serde_json::Value>,
    pub top_items: Option<Vec<TopItemRow>>,
}

pub fn report_view(report: &Report) -> ReportView {
    ReportView {
        summary: report.summary.as_ref().map(|summary| {
            summary
                .iter()
                .map(|(key, value)| (key.clone(), display_value(value)))
                .collect()
        }),
        charts: report.charts.clone(),
        top_items: report.top_items.as_ref().map(|items| {
            items
                .iter()
                .enumerate()
                .map(|(i, item)| TopItemRow {
                    rank: i + 1,
                    name: item.name.clone(),
                    category: item.category.clone(),
                    orders: item.orders,
                    revenue: format!("${}", item.revenue),
                })
                .collect()
        }),
    }
}

/// Row of the order status page with its status select.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRow {
    pub id: String,
    pub customer_name: String,
    pub items: String,
    pub total: String,
    pub badge: StatusBadge,
    pub options: Vec<SelectOption>,
}

impl PendingRow {
    fn new(order: &AdminOrder, badge: &str, options: Vec<SelectOption>) -> Self {
        Self {
            id: order.id.to_string(),
            customer_name: order.customer_name.clone(),
            items: order.items.clone(),
            total: format!("${}", order.total),
            badge: StatusBadge {
                label: badge.to_owned(),
                class: badge.to_lowercase(),
            },
            options,
        }
    }

    pub fn selected(&self) -> Option<&str> {
        self.options
            .iter()
            .find(|o| o.selected)
            .map(|o| o.value.as_str())
    }

    /// Move the selection to `value`; unknown values select nothing.
    pub fn select(&mut self, value: &str) {
        for option in &mut self.options {
            option.selected = option.value == value;
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingTables {
    pub pending: Vec<PendingRow>,
    pub accepted: Vec<PendingRow>,
}

impl PendingTables {
    pub fn row_mut(&mut self, order_id: &str) -> Option<&mut PendingRow> {
        self.pending
            .iter_mut()
            .chain(self.accepted.iter_mut())
            .find(|row| row.id == order_id)
    }
}

pub fn pending_tables(orders: &[AdminOrder]) -> PendingTables {
    let pending = orders
        .iter()
        .filter(|o| o.status == "pending")
        .map(|o| {
            PendingRow::new(
                o,
                "Pending",
                vec![
                    SelectOption::new("pending", "Pending", true),
                    SelectOption::new("accepted", "Accept", false),
                    SelectOption::new("rejected", "Reject", false),
                ],
            )
        })
        .collect();
    let accepted = orders
        .iter()
        .filter(|o| o.status == "accepted")
        .map(|o| {
            PendingRow::new(
                o,
                "Accepted",
                vec![
                    SelectOption::new("accepted", "Accepted", true),
                    SelectOption::new("delivered", "Mark as Delivered", false),
                ],
            )
        })
        .collect();
    PendingTables { pending, accepted }
}
