use anyhow::Result;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use tracing::{debug, warn};

/// Keys of the documents persisted in the per-origin store.
pub mod keys {
    pub const CART: &str = "healthy_cart";
    pub const USER: &str = "healthy_user";
    pub const PROFILE: &str = "profile";
    pub const ORDERS: &str = "orders";
    pub const FAVORITES: &str = "favorites";
    pub const THEME: &str = "theme";
    pub const ADMIN_TOKEN: &str = "adminToken";
}

/// Raw string key-value persistence (browser `localStorage` or a stand-in).
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

/// Forgets everything. Stands in when no persistent storage is reachable.
#[derive(Default)]
pub struct NoopStore;

impl KeyValueStore for NoopStore {
    fn get(&self, _key: &str) -> Result<Option<String>> {
        Ok(None)
    }

    fn set(&self, _key: &str, _value: &str) -> Result<()> {
        Ok(())
    }

    fn remove(&self, _key: &str) -> Result<()> {
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw value, bypassing JSON decoding. Handy for inspecting what was written.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }
}

impl KeyValueStore for InMemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .borrow_mut()
            .insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

/// JSON document adapter over a [`KeyValueStore`].
///
/// Failures never reach the caller: reads fall back to a default and
/// writes are logged and dropped.
#[derive(Clone)]
pub struct JsonStore {
    backend: Rc<dyn KeyValueStore>,
}

impl JsonStore {
    pub fn new(backend: Rc<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    pub fn in_memory() -> Self {
        Self::new(Rc::new(InMemoryStore::new()))
    }

    pub fn backend(&self) -> &Rc<dyn KeyValueStore> {
        &self.backend
    }

    /// Decoded document, or `None` when absent or unreadable.
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.backend.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(err) => {
                warn!("error reading {key} from storage: {err:#}");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(err) => {
                warn!("error decoding {key} from storage: {err}");
                None
            }
        }
    }

    pub fn get_or<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        self.load(key).unwrap_or(default)
    }

    /// Raw string value without JSON decoding (tokens, theme names).
    pub fn get_raw(&self, key: &str) -> Option<String> {
        match self.backend.get(key) {
            Ok(value) => value,
            Err(err) => {
                warn!("error reading {key} from storage: {err:#}");
                None
            }
        }
    }

    pub fn set_raw(&self, key: &str, value: &str) {
        if let Err(err) = self.backend.set(key, value) {
            warn!("error saving {key} to storage: {err:#}");
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        matches!(self.backend.get(key), Ok(Some(_)))
    }

    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        let json = match serde_json::to_string(value) {
            Ok(json) => json,
            Err(err) => {
                warn!("error encoding {key} for storage: {err}");
                return;
            }
        };
        debug!(key, bytes = json.len(), "persisting document");
        self.set_raw(key, &json);
    }

    pub fn remove(&self, key: &str) {
        if let Err(err) = self.backend.remove(key) {
            warn!("error removing {key} from storage: {err:#}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>> {
            Err(anyhow!("quota exceeded"))
        }

        fn set(&self, _key: &str, _value: &str) -> Result<()> {
            Err(anyhow!("quota exceeded"))
        }

        fn remove(&self, _key: &str) -> Result<()> {
            Err(anyhow!("quota exceeded"))
        }
    }

    fn init_tracing() {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    }

    #[test]
    fn json_roundtrip_and_remove() {
        let store = JsonStore::in_memory();
        store.set(keys::ORDERS, &vec!["HB-1", "HB-2"]);

        let loaded: Vec<String> = store.get_or(keys::ORDERS, Vec::new());
        assert_eq!(loaded, vec!["HB-1", "HB-2"]);
        assert!(store.contains(keys::ORDERS));

        store.remove(keys::ORDERS);
        assert!(!store.contains(keys::ORDERS));
    }

    #[test]
    fn corrupt_document_falls_back_to_default() {
        init_tracing();
        let backend = Rc::new(InMemoryStore::new());
        backend.set(keys::CART, "{not json").unwrap();
        let store = JsonStore::new(backend);

        let cart: Vec<String> = store.get_or(keys::CART, vec!["fallback".to_owned()]);
        assert_eq!(cart, vec!["fallback"]);
    }

    #[test]
    fn backend_failures_are_swallowed() {
        init_tracing();
        let store = JsonStore::new(Rc::new(BrokenStore));

        store.set(keys::THEME, "dark");
        store.remove(keys::THEME);
        assert_eq!(store.get_raw(keys::THEME), None);
        assert_eq!(store.get_or(keys::FAVORITES, 3_u32), 3);
        assert!(!store.contains(keys::FAVORITES));
    }

    #[test]
    fn raw_values_skip_json() {
        let backend = Rc::new(InMemoryStore::new());
        let store = JsonStore::new(backend.clone());
        store.set_raw(keys::ADMIN_TOKEN, "abc123");

        assert_eq!(backend.raw(keys::ADMIN_TOKEN).as_deref(), Some("abc123"));
        assert_eq!(store.get_raw(keys::ADMIN_TOKEN).as_deref(), Some("abc123"));
    }

    #[test]
    fn noop_store_keeps_nothing() {
        let store = JsonStore::new(Rc::new(NoopStore));
        store.set(keys::PROFILE, &vec!["x"]);

        assert!(!store.contains(keys::PROFILE));
        assert_eq!(store.get_or(keys::PROFILE, Vec::<String>::new()), Vec::<String>::new());
    }
}
