//! Light/dark theme on `<body>` and the toggle button.

use crate::dom::{self, ChromeElements};
use crate::state;
use hb_shop_core::Theme;
use hb_shop_core::theme::theme_from_storage_event;

/// Apply `theme` to the page without persisting it.
pub fn apply(chrome: &ChromeElements, theme: Theme) {
    if let Some(body) = dom::document().body() {
        dom::toggle_class(&body, "dark-mode", theme.body_class().is_some());
    }
    if let Some(btn) = &chrome.theme_toggle {
        dom::set_text(btn, theme.icon());
    }
}

/// Restore the saved theme (light when none is stored).
pub fn restore(chrome: &ChromeElements) {
    let theme = state::with(|s| s.theme.current());
    apply(chrome, theme);
}

pub fn on_toggle(chrome: &ChromeElements) {
    let theme = state::with(|s| s.theme.toggle());
    apply(chrome, theme);
}

/// Another tab changed storage; follow it if it was the theme.
pub fn on_storage(chrome: &ChromeElements, event: &web_sys::StorageEvent) {
    let key = event.key();
    let value = event.new_value();
    if let Some(theme) = theme_from_storage_event(key.as_deref(), value.as_deref()) {
        apply(chrome, theme);
    }
}
