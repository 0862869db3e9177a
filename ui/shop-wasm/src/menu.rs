//! Landing page menu: category tabs, add-to-cart and favorite hearts.

use crate::dom::{self, MenuElements};
use crate::motion;
use crate::state;
use hb_shop_core::motion::{Category, CategoryTransition};
use rust_decimal::Decimal;
use std::str::FromStr;
use tracing::{debug, warn};
use web_sys::Element;

/// Show the active category's dishes and decorations, hide the rest.
fn apply(els: &MenuElements, transition: CategoryTransition) {
    let active = transition.active.as_str();

    for link in &els.category_links {
        let is_active = dom::data(link, "category").as_deref() == Some(active);
        dom::toggle_class(link, "active", is_active);
    }

    for container in &els.dish_containers {
        let visible = dom::data(container, "category")
            .is_some_and(|c| transition.is_visible(&c));
        dom::toggle_class(container, "active-category", visible);
        dom::set_attr(container, "aria-hidden", if visible { "false" } else { "true" });
    }

    for el in &els.volatile {
        let visible = dom::data(el, "category").is_some_and(|c| transition.is_visible(&c));
        dom::toggle_class(el, "hidden", !visible);
        dom::set_attr(el, "aria-hidden", if visible { "false" } else { "true" });
    }

    motion::start_category_scene(transition.active);
}

/// Switch to `category`; a no-op when it is already showing.
pub fn switch(els: &MenuElements, category: Category) {
    match state::with_mut(|s| s.menu.switch(category)) {
        Some(transition) => {
            debug!(category = %category, "switching menu category");
            apply(els, transition);
        }
        None => debug!(category = %category, "category already active"),
    }
}

pub fn on_category_click(els: &MenuElements, link: &Element) {
    let Some(category) = dom::data(link, "category").and_then(|c| Category::parse(&c)) else {
        warn!("category link without a known data-category");
        return;
    };
    switch(els, category);
}

fn parse_price(text: &str) -> Option<Decimal> {
    Decimal::from_str(text.trim().trim_start_matches('$').trim()).ok()
}

/// "Add to cart" on a `.menu-card`: name, price and image come from the card.
pub fn on_add_click(button: &Element) {
    let Some(card) = button.closest(".menu-card").ok().flatten() else {
        return;
    };
    let name = card
        .query_selector("h3")
        .ok()
        .flatten()
        .and_then(|h| h.text_content())
        .unwrap_or_default();
    let price = card
        .query_selector(".menu-price")
        .ok()
        .flatten()
        .and_then(|p| p.text_content())
        .and_then(|t| parse_price(&t));
    let image = card
        .query_selector(".menu-img")
        .ok()
        .flatten()
        .and_then(|img| img.get_attribute("src"))
        .unwrap_or_default();

    let Some(price) = price else {
        warn!(dish = %name, "menu card has no readable price");
        return;
    };
    state::with_mut(|s| s.cart.add_item(name.trim(), price, &image));
}

/// Heart button: the dish is described by its data attributes.
pub fn on_favorite_click(button: &Element) {
    let name = dom::data(button, "name").unwrap_or_default();
    let price = dom::data(button, "price").and_then(|p| parse_price(&p));
    let image = dom::data(button, "image").unwrap_or_default();
    let Some(price) = price.filter(|_| !name.is_empty()) else {
        warn!("favorite button without name or price");
        return;
    };

    let outcome = state::with(|s| s.profile.toggle_favorite(&name, price, &image));
    let added = matches!(outcome, hb_shop_core::profile::FavoriteToggle::Added(_));
    dom::toggle_class(button, "active", added);
}

#[cfg(test)]
mod tests {
    use super::parse_price;
    use rust_decimal::Decimal;

    #[test]
    fn reads_card_prices() {
        assert_eq!(parse_price("$12.99"), Some(Decimal::new(1299, 2)));
        assert_eq!(parse_price(" 8.5 "), Some(Decimal::new(85, 1)));
        assert_eq!(parse_price("free"), None);
    }
}
