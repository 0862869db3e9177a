//! Profile page: details, addresses, order history, favorites and the two
//! order modals.

use crate::dom::{self, ProfileElements, escape};
use crate::state;
use hb_api_types::ProfileUpdate;
use hb_shop_core::profile::{FavoritesView, OrderDetailsView, TrackingView};
use tracing::debug;
use web_sys::{Element, HtmlInputElement};

// ── Rendering ──

pub fn render_profile(els: &ProfileElements) {
    let view = state::with(|s| s.profile.profile_view());
    dom::set_text(&els.header_name, &view.header_name);
    dom::set_text(&els.name, &view.name);
    dom::set_text(&els.email, &view.email);
    dom::set_text(&els.phone, &view.phone);

    let html: String = view
        .addresses
        .iter()
        .map(|row| {
            format!(
                r#"<div class="address-item">
    <div style="font-size:14px; color:var(--muted);">{text}</div>
    <div><button data-idx="{index}" class="btn btn-ghost remove-address">Remove</button></div>
</div>"#,
                text = escape(&row.text),
                index = row.index,
            )
        })
        .collect();
    dom::set_inner_html(&els.addresses, &html);
}

pub fn render_orders(els: &ProfileElements) {
    let rows = state::with(|s| s.profile.order_history());
    let html: String = rows
        .iter()
        .map(|row| {
            format!(
                r#"<div class="order-row">
    <div style="display:flex; flex-direction:column;">
        <div style="font-weight:700">{id}</div>
        <div style="font-size:13px; color:var(--muted)">{date}</div>
    </div>
    <div style="flex:1; padding-left:12px; color:var(--muted);">{items}</div>
    <div style="display:flex; gap:8px; align-items:center;">
        <div style="font-weight:700">{total}</div>
        <button class="btn btn-ghost view-order" data-id="{id}">View Details</button>
        <button class="btn btn-primary track-order" data-id="{id}">Track Order</button>
    </div>
</div>"#,
                id = escape(&row.id),
                date = escape(&row.date),
                items = escape(&row.items_text),
                total = row.total,
            )
        })
        .collect();
    dom::set_inner_html(&els.orders, &html);
}

pub fn render_favorites(els: &ProfileElements) {
    let html = match state::with(|s| s.profile.favorites_view()) {
        FavoritesView::Empty => format!(
            r#"<div style="color:var(--muted)">{}</div>"#,
            FavoritesView::EMPTY_MESSAGE
        ),
        FavoritesView::Cards(cards) => cards
            .iter()
            .map(|card| {
                format!(
                    r#"<div class="glass-card" style="padding:12px"><div class="menu-card">
    <div class="menu-img-wrapper"><img class="menu-img" src="{img}" alt="{name}" /></div>
    <h3>{name}</h3>
    <p style="color:var(--muted);">Delicious healthy choice</p>
    <div class="menu-price">{price}</div>
    <button class="menu-add-btn add-from-fav" data-id="{id}">Add</button>
    <button class="menu-add-btn remove-fav" data-id="{id}" style="margin-left:8px; background:#ddd; color:#333;">Remove</button>
</div></div>"#,
                    img = escape(&card.img),
                    name = escape(&card.name),
                    price = card.price,
                    id = escape(&card.id),
                )
            })
            .collect(),
    };
    dom::set_inner_html(&els.favorites, &html);
}

pub fn render_all(els: &ProfileElements) {
    render_profile(els);
    render_orders(els);
    render_favorites(els);
}

// ── Modals ──

fn show_modal(el: &Element) {
    dom::add_class(el, "show");
    dom::set_attr(el, "aria-hidden", "false");
}

fn hide_modal(el: &Element) {
    dom::remove_class(el, "show");
    dom::set_attr(el, "aria-hidden", "true");
}

pub fn open_order_details(els: &ProfileElements, order_id: &str) {
    let html = match state::with(|s| s.profile.order_details(order_id)) {
        OrderDetailsView::NotFound => {
            format!("<p>{}</p>", OrderDetailsView::NOT_FOUND_MESSAGE)
        }
        OrderDetailsView::Found {
            id,
            date,
            lines,
            total,
        } => {
            let lines: String = lines
                .iter()
                .map(|line| {
                    format!(
                        r#"<div style="display:flex; justify-content:space-between; padding:6px 0"><div>{}</div><div>{}</div></div>"#,
                        escape(&line.label),
                        line.amount
                    )
                })
                .collect();
            format!(
                r#"<div><h3>Order {id}</h3><div style="color:var(--muted); font-size:13px">{date}</div></div>
<div style="margin-top:8px">{lines}</div>
<div style="margin-top:12px; font-weight:700">Total: {total}</div>
<div style="margin-top:12px"><div style="display:flex; gap:8px; justify-content:flex-end;">
    <button class="btn btn-ghost" id="close-details">Close</button>
    <button class="btn btn-primary" id="track-from-details" data-id="{id}">Track Order</button>
</div></div>"#,
                id = escape(&id),
                date = escape(&date),
            )
        }
    };
    dom::set_inner_html(&els.details_content, &html);
    show_modal(&els.details_modal);
}

pub fn open_tracking(els: &ProfileElements, order_id: &str) {
    let html = match state::with(|s| s.profile.tracking(order_id)) {
        TrackingView::NotFound => format!("<p>{}</p>", TrackingView::NOT_FOUND_MESSAGE),
        TrackingView::Found {
            id,
            date,
            status,
            steps,
        } => {
            let steps: String = steps
                .iter()
                .map(|filled| {
                    format!(
                        r#"<div class="step {}" style="height:12px;"></div>"#,
                        if *filled { "filled" } else { "" }
                    )
                })
                .collect();
            format!(
                r#"<h3>Tracking • {id}</h3><div style="color:var(--muted); font-size:13px">{date}</div><div style="margin-top:12px;">
    <div class="progress-steps">{steps}</div>
    <div style="margin-top:10px; font-weight:600">Status: {status}</div>
    <div style="margin-top:12px; display:flex; justify-content:flex-end;"><button class="btn btn-ghost" id="close-tracking">Close</button></div>
</div>"#,
                id = escape(&id),
                date = escape(&date),
            )
        }
    };
    dom::set_inner_html(&els.tracking_content, &html);
    show_modal(&els.tracking_modal);
}

// ── Inline editing ──

const EDIT_INPUT_STYLE: &str =
    "width:100%; padding:8px; border-radius:6px; border:1px solid rgba(0,0,0,0.1);";

fn start_edit(els: &ProfileElements) {
    dom::add_class(&els.card, "editing");
    let profile = state::with(|s| s.profile.profile());
    let input = |id: &str, kind: &str, value: &str| {
        format!(
            r#"<input type="{kind}" id="{id}" value="{value}" style="{EDIT_INPUT_STYLE}">"#,
            value = escape(value)
        )
    };
    dom::set_inner_html(&els.name, &input("edit-name", "text", &profile.name));
    dom::set_inner_html(&els.email, &input("edit-email", "email", &profile.email));
    dom::set_inner_html(&els.phone, &input("edit-phone", "tel", &profile.phone));

    let _ = els.addresses.insert_adjacent_html(
        "afterend",
        r#"<div id="edit-buttons" style="margin-top:16px; display:flex; gap:8px; justify-content:flex-end;">
    <button id="cancel-edit" class="btn btn-ghost">Cancel</button>
    <button id="save-edit" class="btn btn-primary">Save</button>
</div>"#,
    );
}

fn cancel_edit(els: &ProfileElements) {
    dom::remove_class(&els.card, "editing");
    render_profile(els);
    if let Some(buttons) = dom::by_id("edit-buttons") {
        buttons.remove();
    }
}

fn save_edit(els: &ProfileElements) {
    let value = |id: &str| {
        dom::by_id_typed::<HtmlInputElement>(id).map(|input| dom::get_input_value(&input))
    };
    let update = ProfileUpdate {
        name: value("edit-name"),
        email: value("edit-email"),
        phone: value("edit-phone"),
        new_address: None,
    };
    state::with(|s| s.profile.update_profile(update));
    cancel_edit(els);
}

pub fn on_edit_toggle(els: &ProfileElements) {
    if dom::has_class(&els.card, "editing") {
        cancel_edit(els);
    } else {
        start_edit(els);
    }
}

pub fn on_add_address(els: &ProfileElements) {
    let Ok(Some(text)) = dom::window().prompt_with_message("Enter new address:") else {
        return;
    };
    if state::with(|s| s.profile.add_address(&text)) {
        render_profile(els);
    }
}

// ── Delegated clicks ──

/// One document-level click handler covers every button the renderers
/// above produce.
pub fn on_document_click(els: &ProfileElements, target: &Element) {
    let id = || dom::data(target, "id").unwrap_or_default();

    if dom::has_class(target, "remove-address") {
        let Some(index) = dom::data(target, "idx").and_then(|i| i.parse::<usize>().ok()) else {
            return;
        };
        if state::with(|s| s.profile.remove_address(index)) {
            render_profile(els);
        }
    } else if dom::has_class(target, "view-order") {
        open_order_details(els, &id());
    } else if dom::has_class(target, "track-order") {
        open_tracking(els, &id());
    } else if dom::has_class(target, "remove-fav") {
        state::with(|s| s.profile.remove_favorite(&id()));
        render_favorites(els);
    } else if dom::has_class(target, "add-from-fav") {
        let id = id();
        let Some(favorite) = state::with(|s| s.profile.favorite(&id)) else {
            debug!(favorite = %id, "favorite no longer stored");
            return;
        };
        state::with_mut(|s| s.cart.add_item(&favorite.name, favorite.price, &favorite.img));
    } else {
        match target.id().as_str() {
            "close-details" => hide_modal(&els.details_modal),
            "track-from-details" => {
                hide_modal(&els.details_modal);
                open_tracking(els, &id());
            }
            "close-tracking" => hide_modal(&els.tracking_modal),
            "save-edit" => save_edit(els),
            "cancel-edit" => cancel_edit(els),
            _ => {}
        }
    }
}

/// Seed sample content and draw the page.
pub fn init(els: &ProfileElements) {
    state::with(|s| s.profile.ensure_seeded());
    render_all(els);
    hide_modal(&els.details_modal);
    hide_modal(&els.tracking_modal);
    debug!("profile page ready");
}
