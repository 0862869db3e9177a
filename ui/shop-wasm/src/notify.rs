//! Toast banners.
//!
//! Pages with a `#toast` element reuse it; everywhere else a coloured
//! banner is appended to `<body>` and slides out after a few seconds.

use crate::dom;
use gloo_timers::callback::Timeout;
use hb_shop_core::{Notifier, Severity};
use tracing::warn;

const BANNER_MS: u32 = 5_000;
const SLIDE_OUT_MS: u32 = 300;
const TOAST_MS: u32 = 2_200;

const BANNER_STYLE: &str = "position: fixed; top: 20px; right: 20px; padding: 15px 20px; \
     border-radius: 8px; color: white; font-weight: 500; z-index: 1000; \
     animation: slideIn 0.3s ease-out; max-width: 400px;";

const BANNER_KEYFRAMES_ID: &str = "hb-notify-keyframes";
const BANNER_KEYFRAMES: &str = "@keyframes slideIn { from { transform: translateX(100%); opacity: 0; } \
     to { transform: translateX(0); opacity: 1; } } \
     @keyframes slideOut { from { transform: translateX(0); opacity: 1; } \
     to { transform: translateX(100%); opacity: 0; } }";

pub fn color(severity: Severity) -> &'static str {
    match severity {
        Severity::Success => "#66bb6a",
        Severity::Error => "#ef5350",
        Severity::Warning => "#ff9800",
        Severity::Info => "#2196f3",
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ToastNotifier;

impl Notifier for ToastNotifier {
    fn notify(&self, message: &str, severity: Severity) {
        match dom::by_id("toast") {
            Some(toast) => show_toast(&toast, message),
            None => show_banner(message, severity),
        }
    }
}

fn show_toast(toast: &web_sys::Element, message: &str) {
    dom::set_text(toast, message);
    dom::add_class(toast, "show");
    let toast = toast.clone();
    Timeout::new(TOAST_MS, move || dom::remove_class(&toast, "show")).forget();
}

/// Banners animate with `slideIn`/`slideOut`; define them once per page.
fn inject_keyframes() {
    if dom::by_id(BANNER_KEYFRAMES_ID).is_some() {
        return;
    }
    let (Some(head), Some(style)) = (dom::document().head(), dom::create_element("style")) else {
        return;
    };
    dom::set_attr(&style, "id", BANNER_KEYFRAMES_ID);
    dom::set_text(&style, BANNER_KEYFRAMES);
    if let Err(err) = head.append_child(&style) {
        warn!("could not add banner keyframes: {err:?}");
    }
}

fn show_banner(message: &str, severity: Severity) {
    inject_keyframes();
    let (Some(banner), Some(body)) = (dom::create_element("div"), dom::document().body()) else {
        return;
    };
    dom::set_attr(
        &banner,
        "class",
        &format!("notification {}", severity.as_str()),
    );
    dom::set_attr(&banner, "style", BANNER_STYLE);
    dom::set_style(&banner, "background-color", color(severity));
    dom::set_text(&banner, message);
    if body.append_child(&banner).is_err() {
        return;
    }

    Timeout::new(BANNER_MS, move || {
        dom::set_style(&banner, "animation", "slideOut 0.3s ease-in");
        Timeout::new(SLIDE_OUT_MS, move || banner.remove()).forget();
    })
    .forget();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn banner_animations_are_defined() {
        for name in ["slideIn", "slideOut"] {
            assert!(BANNER_KEYFRAMES.contains(&format!("@keyframes {name} ")));
        }
        assert!(BANNER_STYLE.contains("animation: slideIn"));
    }
}
