//! DOM helpers and per-page element bindings.
//!
//! Each page of the site binds its own struct; `bind()` fails when the page
//! does not carry that section, which is how a page is recognised.

use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlElement, HtmlInputElement, HtmlSelectElement};

// ── Helpers ──

pub fn document() -> Document {
    gloo_utils::document()
}

pub fn window() -> web_sys::Window {
    gloo_utils::window()
}

pub fn by_id(id: &str) -> Option<Element> {
    document().get_element_by_id(id)
}

pub fn by_id_typed<T: JsCast>(id: &str) -> Option<T> {
    by_id(id).and_then(|e| e.dyn_into::<T>().ok())
}

pub fn query(selector: &str) -> Option<Element> {
    document().query_selector(selector).ok()?
}

pub fn query_all(selector: &str) -> Vec<Element> {
    match document().query_selector_all(selector) {
        Ok(list) => collect(&list),
        Err(_) => Vec::new(),
    }
}

/// Query all matching elements within a parent element.
pub fn query_all_within(parent: &Element, selector: &str) -> Vec<Element> {
    match parent.query_selector_all(selector) {
        Ok(list) => collect(&list),
        Err(_) => Vec::new(),
    }
}

fn collect(list: &web_sys::NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

pub fn set_text(el: &Element, text: &str) {
    el.set_text_content(Some(text));
}

pub fn set_inner_html(el: &Element, html: &str) {
    el.set_inner_html(html);
}

pub fn add_class(el: &Element, cls: &str) {
    let _ = el.class_list().add_1(cls);
}

pub fn remove_class(el: &Element, cls: &str) {
    let _ = el.class_list().remove_1(cls);
}

pub fn toggle_class(el: &Element, cls: &str, force: bool) {
    let _ = el.class_list().toggle_with_force(cls, force);
}

pub fn has_class(el: &Element, cls: &str) -> bool {
    el.class_list().contains(cls)
}

pub fn set_attr(el: &Element, name: &str, value: &str) {
    let _ = el.set_attribute(name, value);
}

pub fn data(el: &Element, name: &str) -> Option<String> {
    el.get_attribute(&format!("data-{name}"))
}

pub fn set_style(el: &Element, property: &str, value: &str) {
    if let Some(html) = el.dyn_ref::<HtmlElement>() {
        let _ = html.style().set_property(property, value);
    }
}

pub fn set_display(el: &Element, visible: bool) {
    set_style(el, "display", if visible { "block" } else { "none" });
}

pub fn get_input_value(el: &HtmlInputElement) -> String {
    el.value().trim().to_string()
}

pub fn get_select_value(el: &HtmlSelectElement) -> String {
    el.value()
}

pub fn set_select_value(el: &HtmlSelectElement, val: &str) {
    el.set_value(val);
}

pub fn create_element(tag: &str) -> Option<Element> {
    document().create_element(tag).ok()
}

/// The element an event fired on, as an `Element`.
pub fn event_target(event: &web_sys::Event) -> Option<Element> {
    event.target()?.dyn_into::<Element>().ok()
}

/// Escape text for interpolation into `innerHTML` templates.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

macro_rules! get_el {
    ($id:expr) => {
        by_id($id).ok_or_else(|| JsValue::from_str(&format!("missing element #{}", $id)))?
    };
}

macro_rules! get_html {
    ($id:expr) => {
        by_id_typed::<HtmlElement>($id)
            .ok_or_else(|| JsValue::from_str(&format!("missing html element #{}", $id)))?
    };
}

macro_rules! get_query {
    ($selector:expr) => {
        query($selector).ok_or_else(|| JsValue::from_str(&format!("missing {}", $selector)))?
    };
}

// ── Shared chrome ──

/// Elements present on every page. All optional.
#[derive(Clone)]
pub struct ChromeElements {
    pub theme_toggle: Option<HtmlElement>,
    pub navbar: Option<Element>,
    pub toast: Option<Element>,
}

impl ChromeElements {
    pub fn bind() -> Self {
        Self {
            theme_toggle: by_id_typed::<HtmlElement>("theme-toggle"),
            navbar: query(".navbar"),
            toast: by_id("toast"),
        }
    }
}

// ── Cart page ──

#[derive(Clone)]
pub struct CartElements {
    pub items: Element,
    pub totals: Element,
    pub empty: Element,
    pub subtotal: Option<Element>,
    pub tax: Option<Element>,
    pub total: Option<Element>,
    pub checkout_btn: Option<Element>,
}

impl CartElements {
    pub fn bind() -> Result<Self, JsValue> {
        Ok(Self {
            items: get_el!("cart-items"),
            totals: get_el!("cart-total"),
            empty: get_el!("cart-empty"),
            subtotal: by_id("subtotal"),
            tax: by_id("tax"),
            total: by_id("total"),
            checkout_btn: query(".cart-checkout-btn"),
        })
    }
}

// ── Menu / landing page ──

#[derive(Clone)]
pub struct MenuElements {
    pub showcase: Element,
    pub category_links: Vec<Element>,
    pub dish_containers: Vec<Element>,
    pub volatile: Vec<Element>,
    pub add_buttons: Vec<Element>,
    pub favorite_buttons: Vec<Element>,
}

impl MenuElements {
    pub fn bind() -> Result<Self, JsValue> {
        Ok(Self {
            showcase: get_query!(".menu-showcase"),
            category_links: query_all(".category-link"),
            dish_containers: query_all(".dish-category"),
            volatile: query_all(".volatile-float"),
            add_buttons: query_all(".menu-add-btn"),
            favorite_buttons: query_all(".favorite-btn"),
        })
    }
}

// ── Profile page ──

#[derive(Clone)]
pub struct ProfileElements {
    pub card: Element,
    pub header_name: Element,
    pub name: Element,
    pub email: Element,
    pub phone: Element,
    pub addresses: Element,
    pub orders: Element,
    pub favorites: Element,
    pub details_modal: Element,
    pub details_content: Element,
    pub tracking_modal: Element,
    pub tracking_content: Element,
    pub edit_btn: HtmlElement,
    pub add_address_btn: HtmlElement,
}

impl ProfileElements {
    pub fn bind() -> Result<Self, JsValue> {
        Ok(Self {
            card: get_query!(".profile-card"),
            header_name: get_el!("profile-header-name"),
            name: get_el!("profile-name-display"),
            email: get_el!("profile-email-display"),
            phone: get_el!("profile-phone-display"),
            addresses: get_el!("addresses-list"),
            orders: get_el!("orders-list"),
            favorites: get_el!("favorites-grid"),
            details_modal: get_el!("order-details-modal"),
            details_content: get_el!("order-details-content"),
            tracking_modal: get_el!("tracking-modal"),
            tracking_content: get_el!("tracking-content"),
            edit_btn: get_html!("edit-profile-btn"),
            add_address_btn: get_html!("add-address-btn"),
        })
    }
}

// ── Admin pages ──

#[derive(Clone)]
pub struct AdminElements {
    pub container: Element,
    pub sidebar: Option<Element>,
    pub hamburger: Option<Element>,
    pub nav_links: Vec<Element>,
    pub logout_btn: Option<Element>,
    pub forms: Vec<Element>,
    pub report_period: Option<HtmlSelectElement>,
    pub generate_report_btn: Option<HtmlElement>,
}

impl AdminElements {
    pub fn bind() -> Result<Self, JsValue> {
        Ok(Self {
            container: get_query!(".admin-container"),
            sidebar: query(".sidebar"),
            hamburger: query(".hamburger"),
            nav_links: query_all(".sidebar a"),
            logout_btn: query(".logout-btn"),
            forms: query_all("form"),
            report_period: by_id_typed::<HtmlSelectElement>("report-period"),
            generate_report_btn: by_id_typed::<HtmlElement>("generate-report-btn"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::escape;

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape(r#"<b>"Fish" & 'Chips'</b>"#),
            "&lt;b&gt;&quot;Fish&quot; &amp; &#39;Chips&#39;&lt;/b&gt;"
        );
    }
}
