//! Cart page rendering.

use crate::api;
use crate::dom::{self, CartElements, escape};
use crate::state;
use hb_shop_core::CartView;
use tracing::debug;

/// Draw the cart cards and totals.
pub fn render(els: &CartElements, view: &CartView) {
    dom::set_inner_html(&els.items, "");

    if view.is_empty() {
        dom::set_display(&els.totals, false);
        dom::set_display(&els.empty, true);
        return;
    }
    dom::set_display(&els.empty, false);
    dom::set_display(&els.totals, true);

    let html: String = view
        .rows
        .iter()
        .map(|row| {
            format!(
                r#"<div class="cart-card">
    <button class="cart-delete-btn" data-index="{index}">🗑️</button>
    <div class="cart-img-wrapper"><img src="{image}" alt="{name}" class="cart-img"></div>
    <h3 class="cart-name">{name}</h3>
    <p class="cart-price">{line_total}</p>
    <div class="cart-qty-controls">
        <button class="cart-qty-btn" data-action="decrease" data-index="{index}">-</button>
        <span class="cart-qty-display">{quantity}</span>
        <button class="cart-qty-btn" data-action="increase" data-index="{index}">+</button>
    </div>
</div>"#,
                index = row.index,
                image = escape(&row.image),
                name = escape(&row.name),
                line_total = row.line_total,
                quantity = row.quantity,
            )
        })
        .collect();
    dom::set_inner_html(&els.items, &html);

    if let Some(el) = &els.subtotal {
        dom::set_text(el, &view.totals.subtotal_display());
    }
    if let Some(el) = &els.tax {
        dom::set_text(el, &view.totals.tax_display());
    }
    if let Some(el) = &els.total {
        dom::set_text(el, &view.totals.total_display());
    }
}

/// Install the renderer so every cart mutation redraws the page.
pub fn attach(els: &CartElements) {
    let els = els.clone();
    state::with_mut(|s| {
        s.cart
            .set_renderer(Box::new(move |view: &CartView| render(&els, view)))
    });
}

/// Delegated click on `#cart-items`.
pub fn on_items_click(target: &web_sys::Element) {
    let Some(index) = dom::data(target, "index").and_then(|i| i.parse::<usize>().ok()) else {
        return;
    };

    let result = if dom::has_class(target, "cart-delete-btn") {
        state::with_mut(|s| s.cart.remove_item(index).map(|_| ()))
    } else if dom::has_class(target, "cart-qty-btn") {
        match dom::data(target, "action").as_deref() {
            Some("increase") => state::with_mut(|s| s.cart.increase(index)),
            Some("decrease") => state::with_mut(|s| s.cart.decrease(index)),
            _ => Ok(()),
        }
    } else {
        Ok(())
    };

    if let Err(err) = result {
        debug!("stale cart control: {err}");
    }
}

/// Place the order locally, tell the backend, then go to the checkout page.
pub fn on_checkout() {
    let Some(order) = state::with_mut(|s| s.checkout()) else {
        return;
    };
    wasm_bindgen_futures::spawn_local(async move {
        api::sync_checkout(order).await;
        let _ = dom::window().location().set_href("checkout.html");
    });
}
