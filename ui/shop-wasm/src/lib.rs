//! Healthy Bites browser front end.
//!
//! One WASM module serves every page of the site. Each page is recognised by
//! the sections it carries (cart list, menu showcase, profile card, admin
//! container) and only those are bound.

pub mod admin;
pub mod api;
pub mod cart;
pub mod dom;
pub mod events;
pub mod logging;
pub mod menu;
pub mod motion;
pub mod notify;
pub mod profile;
pub mod state;
pub mod theme;

use hb_shop_core::motion::Category;
use tracing::{debug, info};
use wasm_bindgen::prelude::*;

/// WASM entry point – called automatically when the module is instantiated.
#[wasm_bindgen(start)]
pub async fn start() -> Result<(), JsValue> {
    // Improve panic messages in the browser console
    console_error_panic_hook::set_once();
    logging::init();

    init().await
}

/// Main initialisation sequence.
async fn init() -> Result<(), JsValue> {
    let chrome = dom::ChromeElements::bind();
    theme::restore(&chrome);
    events::bind_chrome(&chrome);

    if let Ok(els) = dom::CartElements::bind() {
        debug!("cart page");
        cart::attach(&els);
        events::bind_cart(&els);
    }

    if let Ok(els) = dom::MenuElements::bind() {
        debug!("menu page");
        events::bind_menu(&els);
        menu::switch(&els, Category::Main);
    }

    if dom::query(".hero-section").is_some() || dom::query(".todays-special").is_some() {
        motion::start_page_scene(chrome.navbar.clone());
    }

    if let Ok(els) = dom::ProfileElements::bind() {
        debug!("profile page");
        profile::init(&els);
        events::bind_profile(&els);
    }

    if let Ok(els) = dom::AdminElements::bind() {
        debug!("admin page");
        events::bind_admin(&els);
        admin::init().await;
    }

    info!("page ready");
    Ok(())
}
