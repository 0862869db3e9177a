//! Global application state.
//!
//! `RefCell`-wrapped `thread_local!` storage (WASM is single-threaded). The
//! state is built on first access, backed by `localStorage` when available.

use crate::notify::ToastNotifier;
use anyhow::anyhow;
use gloo_storage::{LocalStorage, Storage};
use hb_shop_core::ShopState;
use hb_storage::{KeyValueStore, NoopStore};
use std::cell::RefCell;
use std::rc::Rc;
use tracing::warn;

/// `window.localStorage` as a key-value backend.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalStorageStore;

impl KeyValueStore for LocalStorageStore {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        LocalStorage::raw()
            .get_item(key)
            .map_err(|e| anyhow!("localStorage.getItem({key}) failed: {e:?}"))
    }

    fn set(&self, key: &str, value: &str) -> anyhow::Result<()> {
        LocalStorage::raw()
            .set_item(key, value)
            .map_err(|e| anyhow!("localStorage.setItem({key}) failed: {e:?}"))
    }

    fn remove(&self, key: &str) -> anyhow::Result<()> {
        LocalStorage::raw()
            .remove_item(key)
            .map_err(|e| anyhow!("localStorage.removeItem({key}) failed: {e:?}"))
    }
}

/// `localStorage` when the browser grants it; otherwise nothing persists.
pub fn backend() -> Rc<dyn KeyValueStore> {
    match gloo_utils::window().local_storage() {
        Ok(Some(_)) => Rc::new(LocalStorageStore),
        _ => {
            warn!("localStorage unavailable; state will not persist");
            Rc::new(NoopStore)
        }
    }
}

// ── Thread-local singleton ──

thread_local! {
    static STATE: RefCell<ShopState> =
        RefCell::new(ShopState::new(backend(), Rc::new(ToastNotifier)));
}

/// Run a closure with shared read access to the state.
pub fn with<F, R>(f: F) -> R
where
    F: FnOnce(&ShopState) -> R,
{
    STATE.with(|s| f(&s.borrow()))
}

/// Run a closure with mutable access to the state.
///
/// Renderers and notifiers run inside this borrow, so they must only touch
/// the DOM.
pub fn with_mut<F, R>(f: F) -> R
where
    F: FnOnce(&mut ShopState) -> R,
{
    STATE.with(|s| f(&mut s.borrow_mut()))
}
