//! Event binding.
//!
//! Wires the listeners for whichever page sections are present. Async
//! handlers are spawned with `wasm_bindgen_futures::spawn_local`.

use crate::admin;
use crate::cart;
use crate::dom::{self, AdminElements, CartElements, ChromeElements, MenuElements, ProfileElements};
use crate::menu;
use crate::profile;
use crate::theme;
use tracing::warn;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Element, EventTarget, HtmlInputElement, HtmlSelectElement};

/// Helper: attach async click handler that receives a clone of `$els`.
macro_rules! on_click_async {
    ($el:expr, $els:expr, $handler:expr) => {{
        let els = $els.clone();
        let cb = Closure::wrap(Box::new(move |_: web_sys::MouseEvent| {
            let els2 = els.clone();
            wasm_bindgen_futures::spawn_local(async move {
                $handler(els2).await;
            });
        }) as Box<dyn FnMut(_)>);
        if let Err(err) = $el.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref()) {
            tracing::warn!("could not listen for click: {err:?}");
        }
        cb.forget();
    }};
}

/// Helper: attach sync click handler.
macro_rules! on_click {
    ($el:expr, $cb:expr) => {{
        let cb = Closure::wrap(Box::new($cb) as Box<dyn FnMut(web_sys::MouseEvent)>);
        if let Err(err) = $el.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref()) {
            tracing::warn!("could not listen for click: {err:?}");
        }
        cb.forget();
    }};
}

/// Attach a handler for any event type. The closure lives for the page.
fn listen(target: &EventTarget, event: &str, handler: impl FnMut(web_sys::Event) + 'static) {
    let cb = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web_sys::Event)>);
    if let Err(err) = target.add_event_listener_with_callback(event, cb.as_ref().unchecked_ref()) {
        warn!("could not listen for {event}: {err:?}");
    }
    cb.forget();
}

fn target_of(event: &web_sys::Event) -> Option<Element> {
    dom::event_target(event)
}

// ── Shared chrome ──

pub fn bind_chrome(chrome: &ChromeElements) {
    if let Some(btn) = &chrome.theme_toggle {
        let chrome2 = chrome.clone();
        on_click!(btn, move |_: web_sys::MouseEvent| theme::on_toggle(&chrome2));
    }

    let chrome2 = chrome.clone();
    listen(&dom::window(), "storage", move |event| {
        if let Some(event) = event.dyn_ref::<web_sys::StorageEvent>() {
            theme::on_storage(&chrome2, event);
        }
    });
}

// ── Cart page ──

pub fn bind_cart(els: &CartElements) {
    listen(&els.items, "click", |event| {
        if let Some(target) = target_of(&event) {
            cart::on_items_click(&target);
        }
    });

    if let Some(btn) = &els.checkout_btn {
        on_click!(btn, |_: web_sys::MouseEvent| cart::on_checkout());
    }
}

// ── Menu ──

pub fn bind_menu(els: &MenuElements) {
    for link in &els.category_links {
        let els2 = els.clone();
        let link2 = link.clone();
        on_click!(link, move |e: web_sys::MouseEvent| {
            e.prevent_default();
            menu::on_category_click(&els2, &link2);
        });
    }

    for btn in &els.add_buttons {
        let btn2 = btn.clone();
        on_click!(btn, move |_: web_sys::MouseEvent| menu::on_add_click(&btn2));
    }

    for btn in &els.favorite_buttons {
        let btn2 = btn.clone();
        on_click!(btn, move |_: web_sys::MouseEvent| menu::on_favorite_click(&btn2));
    }
}

// ── Profile page ──

pub fn bind_profile(els: &ProfileElements) {
    {
        let els2 = els.clone();
        on_click!(els.edit_btn, move |_: web_sys::MouseEvent| profile::on_edit_toggle(&els2));
    }
    {
        let els2 = els.clone();
        on_click!(els.add_address_btn, move |_: web_sys::MouseEvent| {
            profile::on_add_address(&els2)
        });
    }

    let els2 = els.clone();
    listen(&dom::document(), "click", move |event| {
        if let Some(target) = target_of(&event) {
            profile::on_document_click(&els2, &target);
        }
    });
}

// ── Admin pages ──

pub fn bind_admin(els: &AdminElements) {
    if let Some(hamburger) = &els.hamburger {
        let els2 = els.clone();
        on_click!(hamburger, move |_: web_sys::MouseEvent| admin::on_hamburger(&els2));
    }

    {
        let els2 = els.clone();
        listen(&dom::document(), "click", move |event| {
            if let Some(target) = target_of(&event) {
                admin::on_document_click(&els2, &target);
            }
        });
    }

    for link in &els.nav_links {
        let els2 = els.clone();
        let link2 = link.clone();
        on_click!(link, move |_: web_sys::MouseEvent| admin::on_nav_click(&els2, &link2));
    }

    if let Some(btn) = &els.logout_btn {
        on_click!(btn, |_: web_sys::MouseEvent| admin::on_logout());
    }

    for form in &els.forms {
        let form2 = form.clone();
        listen(form, "submit", move |event| {
            event.prevent_default();
            let form3 = form2.clone();
            wasm_bindgen_futures::spawn_local(admin::on_form_submit(form3));
        });
    }

    // Status selects and promotion toggles are redrawn with their tables,
    // so listen once on the document. Dish image inputs share the listener.
    listen(&dom::document(), "change", |event| {
        let Some(target) = target_of(&event) else {
            return;
        };
        if dom::has_class(&target, "status-select") {
            if let Ok(select) = target.dyn_into::<HtmlSelectElement>() {
                wasm_bindgen_futures::spawn_local(admin::on_status_change(select));
            }
        } else if dom::has_class(&target, "promo-toggle") {
            if let Ok(input) = target.dyn_into::<HtmlInputElement>() {
                wasm_bindgen_futures::spawn_local(admin::on_promo_toggle(input));
            }
        } else if dom::has_class(&target, "image-input") {
            if let Ok(input) = target.dyn_into::<HtmlInputElement>() {
                admin::on_image_input(&input);
            }
        }
    });

    if let (Some(btn), Some(_)) = (&els.generate_report_btn, &els.report_period) {
        on_click_async!(btn, els, admin::on_generate_report);
    }
}
