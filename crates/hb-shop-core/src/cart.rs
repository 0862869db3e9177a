//! Shopping cart.
//!
//! One line per product name. Every mutation is written straight back to the
//! store under [`keys::CART`] and followed by a re-render.

use crate::money::{Totals, format_money};
use crate::notify::{Notifier, Severity};
use hb_api_types::CartItem;
use hb_storage::{JsonStore, keys};
use rust_decimal::Decimal;
use std::rc::Rc;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CartError {
    #[error("no cart line at index {index} (cart has {len})")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Called with the fresh view after every mutation.
pub type Renderer = Box<dyn Fn(&CartView)>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartRow {
    pub index: usize,
    pub name: String,
    pub image: String,
    pub quantity: u32,
    pub line_total: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartView {
    pub rows: Vec<CartRow>,
    pub totals: Totals,
}

impl CartView {
    /// The empty-cart message replaces the table and totals.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

pub struct CartManager {
    items: Vec<CartItem>,
    store: JsonStore,
    notifier: Rc<dyn Notifier>,
    renderer: Option<Renderer>,
}

impl CartManager {
    /// Restore the cart from the store. A missing or unreadable document
    /// starts an empty cart.
    pub fn load(store: JsonStore, notifier: Rc<dyn Notifier>) -> Self {
        let mut items: Vec<CartItem> = store.get_or(keys::CART, Vec::new());
        for item in &mut items {
            item.quantity = item.quantity.max(1);
            if item.price.is_sign_negative() {
                warn!(name = %item.name, "stored negative price {}, using 0", item.price);
                item.price = Decimal::ZERO;
            }
        }
        Self {
            items,
            store,
            notifier,
            renderer: None,
        }
    }

    /// Install the renderer and draw the current state once.
    pub fn set_renderer(&mut self, renderer: Renderer) {
        renderer(&self.view());
        self.renderer = Some(renderer);
    }

    pub fn add_item(&mut self, name: &str, price: Decimal, image: &str) {
        match self.items.iter_mut().find(|item| item.name == name) {
            Some(existing) => existing.quantity += 1,
            None => {
                let price = if price.is_sign_negative() {
                    warn!("negative price {price} for {name}, storing 0");
                    Decimal::ZERO
                } else {
                    price
                };
                self.items.push(CartItem {
                    name: name.to_owned(),
                    price,
                    image: image.to_owned(),
                    quantity: 1,
                });
            }
        }
        debug!(name, count = self.item_count(), "cart item added");
        self.save();
        self.notifier
            .notify(&format!("{name} added to cart!"), Severity::Success);
        self.render();
    }

    /// Set the quantity of the named line, never below 1. Unknown names are
    /// ignored.
    pub fn update_quantity(&mut self, name: &str, new_quantity: u32) {
        let Some(item) = self.items.iter_mut().find(|item| item.name == name) else {
            return;
        };
        item.quantity = new_quantity.max(1);
        self.save();
        self.render();
    }

    /// `+` control of a rendered row.
    pub fn increase(&mut self, index: usize) -> Result<(), CartError> {
        let (name, quantity) = self.line(index)?;
        self.update_quantity(&name, quantity.saturating_add(1));
        Ok(())
    }

    /// `-` control of a rendered row.
    pub fn decrease(&mut self, index: usize) -> Result<(), CartError> {
        let (name, quantity) = self.line(index)?;
        self.update_quantity(&name, quantity.saturating_sub(1).max(1));
        Ok(())
    }

    pub fn remove_item(&mut self, index: usize) -> Result<CartItem, CartError> {
        if index >= self.items.len() {
            return Err(CartError::IndexOutOfRange {
                index,
                len: self.items.len(),
            });
        }
        let removed = self.items.remove(index);
        self.save();
        self.notifier.notify(
            &format!("{} removed from cart!", removed.name),
            Severity::Success,
        );
        self.render();
        Ok(removed)
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.save();
        self.render();
    }

    /// Undiscounted sum of price × quantity.
    pub fn total(&self) -> Decimal {
        self.items
            .iter()
            .map(|item| item.price * Decimal::from(item.quantity))
            .sum()
    }

    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    pub fn items(&self) -> Vec<CartItem> {
        self.items.clone()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn view(&self) -> CartView {
        let rows = self
            .items
            .iter()
            .enumerate()
            .map(|(index, item)| CartRow {
                index,
                name: item.name.clone(),
                image: item.image.clone(),
                quantity: item.quantity,
                line_total: format_money(item.price * Decimal::from(item.quantity)),
            })
            .collect();

        CartView {
            rows,
            totals: Totals::from_subtotal(self.total()),
        }
    }

    fn line(&self, index: usize) -> Result<(String, u32), CartError> {
        self.items
            .get(index)
            .map(|item| (item.name.clone(), item.quantity))
            .ok_or(CartError::IndexOutOfRange {
                index,
                len: self.items.len(),
            })
    }

    fn save(&self) {
        self.store.set(keys::CART, &self.items);
    }

    fn render(&self) {
        if let Some(renderer) = &self.renderer {
            renderer(&self.view());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::RecordingNotifier;
    use std::cell::RefCell;

    fn cart() -> (CartManager, JsonStore, Rc<RecordingNotifier>) {
        let store = JsonStore::in_memory();
        let notifier = Rc::new(RecordingNotifier::default());
        let cart = CartManager::load(store.clone(), notifier.clone());
        (cart, store, notifier)
    }

    #[test]
    fn adding_same_name_increments_quantity() {
        let (mut cart, store, notifier) = cart();
        cart.add_item("Salad", Decimal::new(1099, 2), "salad.png");
        cart.add_item("Salad", Decimal::new(1099, 2), "salad.png");

        let items = cart.items();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].quantity, 2);

        let persisted: Vec<CartItem> = store.get_or(keys::CART, Vec::new());
        assert_eq!(persisted, items);
        assert_eq!(
            notifier.last(),
            Some(("Salad added to cart!".to_owned(), Severity::Success))
        );
    }

    #[test]
    fn decrease_stops_at_one() {
        let (mut cart, _, _) = cart();
        cart.add_item("Wrap", Decimal::new(9, 0), "");
        cart.decrease(0).unwrap();
        assert_eq!(cart.items()[0].quantity, 1);

        cart.update_quantity("Wrap", 0);
        assert_eq!(cart.items()[0].quantity, 1);
    }

    #[test]
    fn update_quantity_ignores_unknown_names() {
        let (mut cart, _, _) = cart();
        cart.add_item("Wrap", Decimal::new(9, 0), "");
        cart.update_quantity("Soup", 4);
        cart.increase(0).unwrap();
        assert_eq!(cart.item_count(), 2);
    }

    #[test]
    fn total_is_price_times_quantity() {
        let (mut cart, _, _) = cart();
        cart.add_item("Bowl", Decimal::new(5, 0), "");
        cart.add_item("Bowl", Decimal::new(5, 0), "");
        cart.add_item("Juice", Decimal::new(3, 0), "");

        assert_eq!(cart.total(), Decimal::new(13, 0));
        assert_eq!(cart.item_count(), 3);

        let view = cart.view();
        assert_eq!(view.rows[0].line_total, "$10.00");
        assert_eq!(view.totals.subtotal_display(), "$13.00");
        assert_eq!(view.totals.tax_display(), "$1.04");
        assert_eq!(view.totals.total_display(), "$14.04");
    }

    #[test]
    fn remove_out_of_range_leaves_cart_alone() {
        let (mut cart, _, notifier) = cart();
        cart.add_item("Toast", Decimal::new(6, 0), "");
        notifier.clear();

        assert_eq!(
            cart.remove_item(3),
            Err(CartError::IndexOutOfRange { index: 3, len: 1 })
        );
        assert_eq!(cart.item_count(), 1);
        assert!(notifier.entries().is_empty());

        let removed = cart.remove_item(0).unwrap();
        assert_eq!(removed.name, "Toast");
        assert!(cart.view().is_empty());
        assert_eq!(
            notifier.last(),
            Some(("Toast removed from cart!".to_owned(), Severity::Success))
        );
    }

    #[test]
    fn reload_restores_persisted_cart() {
        let (mut cart, store, notifier) = cart();
        cart.add_item("Chips", Decimal::new(3, 0), "chips.png");
        cart.add_item("Chips", Decimal::new(3, 0), "chips.png");

        let reloaded = CartManager::load(store, notifier);
        assert_eq!(reloaded.items(), cart.items());
    }

    #[test]
    fn renderer_sees_every_mutation() {
        let (mut cart, _, _) = cart();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        cart.set_renderer(Box::new(move |view: &CartView| {
            sink.borrow_mut().push(view.rows.len());
        }));

        cart.add_item("Soup", Decimal::new(7, 0), "");
        cart.clear();

        assert_eq!(*seen.borrow(), vec![0, 1, 0]);
    }

    #[test]
    fn load_clamps_corrupt_lines() {
        let store = JsonStore::in_memory();
        store.set_raw(
            keys::CART,
            r#"[{"name":"Soup","price":-4.5,"quantity":0},{"name":"Tea","price":2,"quantity":3}]"#,
        );
        let cart = CartManager::load(store, Rc::new(RecordingNotifier::default()));

        let items = cart.items();
        assert_eq!(items[0].price, Decimal::ZERO);
        assert_eq!(items[0].quantity, 1);
        assert_eq!(cart.total(), Decimal::new(6, 0));
    }
}
