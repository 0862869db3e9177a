//! Admin pages: dashboard, orders, menu, order status, promotions, reports.
//!
//! Each page is recognised by the section it carries. Data flows through one
//! `AdminDashboard`; after every call the tables it holds are drawn again,
//! so a failed load leaves the last good table on screen.

use crate::api;
use crate::dom::{self, AdminElements, escape};
use crate::notify::ToastNotifier;
use crate::state;
use gloo_timers::future::TimeoutFuture;
use hb_admin_core::commands::CommandRegistry;
use hb_admin_core::views::{PendingRow, SelectOption};
use hb_admin_core::{AdminDashboard, AdminSection, AdminTables, StatusChange};
use hb_api_client::admin::DEFAULT_REPORT_PERIOD;
use hb_api_types::FormData;
use hb_storage::JsonStore;
use std::rc::Rc;
use tracing::{debug, info, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::Closure;
use web_sys::{Element, FileReader, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};

const MOBILE_BREAKPOINT: f64 = 768.0;
const PENDING_REFRESH_MS: u32 = 1_000;

const SPINNER_STYLE: &str = "position: absolute; top: 50%; left: 50%; \
     transform: translate(-50%, -50%); width: 20px; height: 20px; \
     border: 2px solid #f3f3f3; border-top: 2px solid #E94560; \
     border-radius: 50%; animation: spin 1s linear infinite;";

thread_local! {
    static DASHBOARD: AdminDashboard = AdminDashboard::new(
        api::admin(JsonStore::new(state::backend())),
        Rc::new(ToastNotifier),
    );
    static REGISTRY: Rc<CommandRegistry> = Rc::new(CommandRegistry::with_admin_forms());
}

pub fn dashboard() -> AdminDashboard {
    DASHBOARD.with(|d| d.clone())
}

fn registry() -> Rc<CommandRegistry> {
    REGISTRY.with(|r| r.clone())
}

/// Sections present on this page, in load order.
pub fn detect_sections() -> Vec<AdminSection> {
    [
        ("#dashboard-stats", AdminSection::DashboardStats),
        ("#orders-table", AdminSection::OrdersTable),
        ("#menu-items-table", AdminSection::MenuItemsTable),
        ("#status-update-section", AdminSection::StatusUpdate),
        ("#promotions-table", AdminSection::PromotionsTable),
        ("#sales-chart-container", AdminSection::SalesReport),
    ]
    .into_iter()
    .filter(|(selector, _)| dom::query(selector).is_some())
    .map(|(_, section)| section)
    .collect()
}

// ── Rendering ──

fn options_html(options: &[SelectOption]) -> String {
    options
        .iter()
        .map(|o| {
            format!(
                r#"<option value="{}"{}>{}</option>"#,
                escape(&o.value),
                if o.selected { " selected" } else { "" },
                escape(&o.label)
            )
        })
        .collect()
}

fn pending_rows_html(rows: &[PendingRow]) -> String {
    rows.iter()
        .map(|row| {
            format!(
                r#"<tr data-order-id="{id}">
    <td>{id}</td>
    <td>{customer}</td>
    <td>{items}</td>
    <td>{total}</td>
    <td><span class="status {class}">{label}</span></td>
    <td><select class="status-select" data-order-id="{id}">{options}</select></td>
</tr>"#,
                id = escape(&row.id),
                customer = escape(&row.customer_name),
                items = escape(&row.items),
                total = escape(&row.total),
                class = escape(&row.badge.class),
                label = escape(&row.badge.label),
                options = options_html(&row.options),
            )
        })
        .collect()
}

fn fill_tbody(selector: &str, html: &str) {
    if let Some(tbody) = dom::query(selector) {
        dom::set_inner_html(&tbody, html);
    }
}

/// Draw every table the dashboard has loaded.
pub fn render(tables: &AdminTables) {
    if let Some(stats) = &tables.stats {
        for el in dom::query_all("[data-api-target]") {
            let target = dom::data(&el, "api-target").unwrap_or_default();
            if let Some((_, value)) = stats.iter().find(|(key, _)| *key == target) {
                dom::set_text(&el, value);
            }
        }
    }

    if let Some(orders) = &tables.orders {
        let html: String = orders
            .iter()
            .map(|o| {
                format!(
                    r#"<tr>
    <td>{}</td><td>{}</td><td>{}</td><td>{}</td>
    <td><span class="status {}">{}</span></td>
    <td>{}</td>
    <td><button class="btn btn-secondary">View</button></td>
</tr>"#,
                    escape(&o.id),
                    escape(&o.customer_name),
                    escape(&o.items),
                    escape(&o.total),
                    escape(&o.badge.class),
                    escape(&o.badge.label),
                    escape(&o.date),
                )
            })
            .collect();
        fill_tbody("#orders-table tbody", &html);
    }

    if let Some(menu) = &tables.menu {
        let html: String = menu
            .iter()
            .map(|item| {
                format!(
                    r#"<tr>
    <td><img src="{image}" alt="{name}" style="width: 60px; height: 60px; object-fit: cover; border-radius: 8px;"></td>
    <td>{name}</td><td>{category}</td><td>{price}</td><td>{description}</td>
    <td>
        <button class="btn btn-secondary" style="margin-right: 5px;">Edit</button>
        <button class="btn" style="background-color: #ef5350;">Delete</button>
    </td>
</tr>"#,
                    image = escape(&item.image),
                    name = escape(&item.name),
                    category = escape(&item.category),
                    price = escape(&item.price),
                    description = escape(&item.description),
                )
            })
            .collect();
        fill_tbody("#menu-items-table tbody", &html);
    }

    if let Some(options) = &tables.category_options {
        for select in dom::query_all("#dish-category") {
            dom::set_inner_html(&select, &options_html(options));
        }
    }

    if let Some(promotions) = &tables.promotions {
        let html: String = promotions
            .iter()
            .map(|p| {
                format!(
                    r#"<tr>
    <td>{name}</td><td>{description}</td><td>{discount}</td><td>{expiry}</td>
    <td><span class="promo-status" style="color: {color};">{status}</span></td>
    <td>
        <label style="display: flex; align-items: center; gap: 10px;">
            <input type="checkbox" class="promo-toggle"{checked} data-id="{id}">
            <button class="btn btn-secondary" style="margin-left: 10px;">Edit</button>
            <button class="btn" style="background-color: #ef5350;">Delete</button>
        </label>
    </td>
</tr>"#,
                    name = escape(&p.name),
                    description = escape(&p.description),
                    discount = escape(&p.discount),
                    expiry = escape(&p.expiry_date),
                    color = p.status_color(),
                    status = p.status_label(),
                    checked = if p.enabled { " checked" } else { "" },
                    id = escape(&p.id),
                )
            })
            .collect();
        fill_tbody("#promotions-table tbody", &html);
    }

    if let Some(report) = &tables.report {
        if let Some(summary) = &report.summary {
            for (key, value) in summary {
                if let Some(el) = dom::query(&format!(r#"[data-report-target="{key}"]"#)) {
                    dom::set_text(&el, value);
                }
            }
        }
        if report.charts.is_some() {
            debug!("chart data received; no chart renderer on this page");
        }
        if let Some(items) = &report.top_items {
            let html: String = items
                .iter()
                .map(|item| {
                    format!(
                        "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                        item.rank,
                        escape(&item.name),
                        escape(&item.category),
                        item.orders,
                        escape(&item.revenue)
                    )
                })
                .collect();
            fill_tbody("#top-items-table tbody", &html);
        }
    }

    if let Some(pending) = &tables.pending {
        fill_tbody(
            "#pending-orders-section table tbody",
            &pending_rows_html(&pending.pending),
        );
        fill_tbody(
            "#accepted-orders-table tbody",
            &pending_rows_html(&pending.accepted),
        );
    }
}

fn redraw(dashboard: &AdminDashboard) {
    render(&dashboard.tables());
}

// ── Loading indicator ──

fn show_loading(el: &Element, show: bool) {
    if show {
        dom::set_style(el, "opacity", "0.6");
        dom::set_style(el, "pointer-events", "none");
        dom::set_style(el, "position", "relative");
        if let Some(spinner) = dom::create_element("div") {
            dom::set_attr(&spinner, "class", "loading-spinner");
            dom::set_attr(&spinner, "style", SPINNER_STYLE);
            let _ = el.append_child(&spinner);
        }
    } else {
        dom::set_style(el, "opacity", "1");
        dom::set_style(el, "pointer-events", "auto");
        if let Ok(Some(spinner)) = el.query_selector(".loading-spinner") {
            spinner.remove();
        }
    }
}

// ── Forms ──

/// Named fields of a form, as the browser's `FormData` would collect them.
/// Unchecked checkboxes and radios are left out.
fn collect_form(form: &Element) -> FormData {
    let mut data = FormData::new();
    for field in dom::query_all_within(form, "[name]") {
        let Some(name) = field.get_attribute("name").filter(|n| !n.is_empty()) else {
            continue;
        };
        let value = if let Some(input) = field.dyn_ref::<HtmlInputElement>() {
            let kind = input.type_();
            if matches!(kind.as_str(), "checkbox" | "radio") && !input.checked() {
                continue;
            }
            if matches!(kind.as_str(), "submit" | "button" | "file") {
                continue;
            }
            input.value()
        } else if let Some(select) = field.dyn_ref::<HtmlSelectElement>() {
            select.value()
        } else if let Some(area) = field.dyn_ref::<HtmlTextAreaElement>() {
            area.value()
        } else {
            continue;
        };
        data.insert(name, value);
    }
    data
}

pub async fn on_form_submit(form: Element) {
    let form_id = form.id();
    let data = collect_form(&form);
    let dashboard = dashboard();

    show_loading(&form, true);
    let outcome = registry().dispatch(&dashboard, &form_id, data).await;
    show_loading(&form, false);

    debug!(form = %form_id, ?outcome, "form handled");
    redraw(&dashboard);
}

// ── Table controls ──

pub async fn on_status_change(select: HtmlSelectElement) {
    let Some(order_id) = select.get_attribute("data-order-id") else {
        return;
    };
    let new_status = select.value();
    let row = select.closest("tr").ok().flatten();
    let shown_badge = row
        .as_ref()
        .and_then(|row| row.query_selector(".status").ok().flatten())
        .and_then(|badge| badge.text_content())
        .or_else(|| {
            select
                .query_selector("option[selected]")
                .ok()
                .flatten()
                .and_then(|option| option.get_attribute("value"))
        })
        .unwrap_or_default();
    let dashboard = dashboard();

    if let Some(row) = &row {
        show_loading(row, true);
    }
    let change = dashboard.change_order_status(&order_id, &new_status, &shown_badge).await;
    if let Some(row) = &row {
        show_loading(row, false);
    }

    match change {
        StatusChange::Applied { refresh_pending } => {
            redraw(&dashboard);
            if refresh_pending {
                TimeoutFuture::new(PENDING_REFRESH_MS).await;
                dashboard.load_pending_orders().await;
                redraw(&dashboard);
            }
        }
        StatusChange::Reverted { select_value } => {
            dom::set_select_value(&select, &select_value);
        }
    }
}

pub async fn on_promo_toggle(input: HtmlInputElement) {
    let Some(id) = input.get_attribute("data-id") else {
        return;
    };
    let enabled = input.checked();
    let dashboard = dashboard();
    if dashboard.toggle_promotion(&id, enabled).await.is_err() {
        input.set_checked(!enabled);
    }
    redraw(&dashboard);
}

/// Only image data URLs are shown in a dish preview.
fn preview_source(result: Option<String>) -> Option<String> {
    result.filter(|url| url.starts_with("data:image/"))
}

/// Show the picked dish image in the `<img class="image-preview">` that
/// follows the file input.
pub fn on_image_input(input: &HtmlInputElement) {
    let Some(file) = input.files().and_then(|files| files.get(0)) else {
        return;
    };
    let Some(preview) = input
        .next_element_sibling()
        .filter(|el| dom::has_class(el, "image-preview"))
    else {
        debug!("image input has no preview slot");
        return;
    };
    let reader = match FileReader::new() {
        Ok(reader) => reader,
        Err(err) => {
            warn!("file reader unavailable: {err:?}");
            return;
        }
    };

    let loaded = reader.clone();
    let onload = Closure::once_into_js(move |_: web_sys::Event| {
        let result = loaded.result().ok().and_then(|value| value.as_string());
        match preview_source(result) {
            Some(url) => {
                dom::set_attr(&preview, "src", &url);
                dom::set_style(&preview, "display", "block");
            }
            None => debug!("selected file is not an image"),
        }
    });
    reader.set_onload(Some(onload.unchecked_ref()));
    if let Err(err) = reader.read_as_data_url(&file) {
        warn!(file = %file.name(), "could not read image: {err:?}");
    }
}

pub async fn on_generate_report(els: AdminElements) {
    let period = els
        .report_period
        .as_ref()
        .map(dom::get_select_value)
        .unwrap_or_else(|| DEFAULT_REPORT_PERIOD.to_owned());
    let dashboard = dashboard();
    dashboard.load_reports(&period).await;
    redraw(&dashboard);
}

// ── Chrome ──

pub fn on_hamburger(els: &AdminElements) {
    let width = dom::window()
        .inner_width()
        .ok()
        .and_then(|w| w.as_f64())
        .unwrap_or(0.0);
    if width > MOBILE_BREAKPOINT {
        let hidden = dom::has_class(&els.container, "sidebar-hidden");
        dom::toggle_class(&els.container, "sidebar-hidden", !hidden);
    } else if let Some(sidebar) = &els.sidebar {
        let open = dom::has_class(sidebar, "open");
        dom::toggle_class(sidebar, "open", !open);
    }
}

/// Close the mobile sidebar on a click outside it.
pub fn on_document_click(els: &AdminElements, target: &Element) {
    let (Some(sidebar), Some(hamburger)) = (&els.sidebar, &els.hamburger) else {
        return;
    };
    let inside = sidebar.contains(Some(target)) || hamburger.contains(Some(target));
    if !inside {
        dom::remove_class(sidebar, "open");
    }
}

pub fn on_nav_click(els: &AdminElements, link: &Element) {
    for other in &els.nav_links {
        dom::remove_class(other, "active");
    }
    dom::add_class(link, "active");
}

pub fn on_logout() {
    info!("logout requested");
    let _ = dom::window().alert_with_message("Logout functionality to be implemented");
}

/// Load whatever this page shows.
pub async fn init() {
    let sections = detect_sections();
    debug!(?sections, "admin page sections");
    let dashboard = dashboard();
    dashboard.init(&sections).await;
    redraw(&dashboard);
}

#[cfg(test)]
mod tests {
    use super::preview_source;

    #[test]
    fn previews_only_image_data_urls() {
        let png = "data:image/png;base64,iVBORw0KGgo=".to_owned();
        assert_eq!(preview_source(Some(png.clone())), Some(png));
        assert_eq!(preview_source(Some("data:text/plain;base64,aGk=".into())), None);
        assert_eq!(preview_source(None), None);
    }
}
