//! Storefront state for the Healthy Bites ordering site.
//!
//! Every collection is read from and written back to an injected
//! [`KeyValueStore`]; user-facing messages go through a [`Notifier`].
//! Rendering is a pure mapping from state to the view structs in each module.

pub mod cart;
pub mod money;
pub mod motion;
pub mod notify;
pub mod profile;
pub mod seed;
pub mod theme;

use hb_storage::{JsonStore, KeyValueStore};
use std::rc::Rc;

pub use cart::{CartError, CartManager, CartRow, CartView};
pub use money::{Totals, format_money};
pub use notify::{Notifier, RecordingNotifier, Severity, TracingNotifier};
pub use profile::ProfileBook;
pub use theme::{Theme, ThemeSettings};

/// Application state for one page: the cart, the profile collections, the
/// colour theme and the current menu category.
pub struct ShopState {
    pub cart: CartManager,
    pub profile: ProfileBook,
    pub theme: ThemeSettings,
    pub menu: motion::CategorySwitcher,
}

impl ShopState {
    pub fn new(backend: Rc<dyn KeyValueStore>, notifier: Rc<dyn Notifier>) -> Self {
        let store = JsonStore::new(backend);
        Self {
            cart: CartManager::load(store.clone(), notifier.clone()),
            profile: ProfileBook::new(store.clone(), notifier),
            theme: ThemeSettings::new(store),
            menu: motion::CategorySwitcher::default(),
        }
    }

    /// Place an order for the current cart contents.
    pub fn checkout(&mut self) -> Option<hb_api_types::Order> {
        self.profile.checkout(&mut self.cart)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hb_storage::InMemoryStore;
    use rust_decimal::Decimal;

    #[test]
    fn state_shares_one_store() {
        let backend = Rc::new(InMemoryStore::new());
        let notifier = Rc::new(RecordingNotifier::default());
        let mut state = ShopState::new(backend.clone(), notifier);

        state.cart.add_item("Salad", Decimal::new(1099, 2), "salad.png");
        let placed = state.checkout().expect("order placed");

        let reopened = ShopState::new(backend, Rc::new(RecordingNotifier::default()));
        assert_eq!(reopened.cart.item_count(), 0);
        assert!(reopened.profile.orders().iter().any(|o| o.id == placed.id));
    }
}
