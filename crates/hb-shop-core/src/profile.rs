//! Customer profile, order history and favorites.
//!
//! The three collections are independent JSON documents. Each one is seeded
//! with sample content the first time it is read and found absent, and every
//! operation re-reads the store so two views of the same page never disagree.

use crate::cart::CartManager;
use crate::money::{Totals, format_money, round_cents};
use crate::notify::{Notifier, Severity};
use crate::seed;
use chrono::{Local, NaiveDate};
use hb_api_types::{
    Favorite, Order, OrderLine, OrderStatus, Profile, ProfileUpdate, STATUS_SEQUENCE,
};
use hb_storage::{JsonStore, keys};
use rust_decimal::Decimal;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::rc::Rc;
use tracing::debug;
use uuid::Uuid;

/// Shown for profile fields that are empty.
pub const PLACEHOLDER: &str = "--";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressRow {
    pub index: usize,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileView {
    pub header_name: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub addresses: Vec<AddressRow>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRow {
    pub id: String,
    pub date: String,
    pub items_text: String,
    pub total: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailLine {
    pub label: String,
    pub amount: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderDetailsView {
    Found {
        id: String,
        date: String,
        lines: Vec<DetailLine>,
        total: String,
    },
    NotFound,
}

impl OrderDetailsView {
    pub const NOT_FOUND_MESSAGE: &'static str = "Order not found";
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackingView {
    Found {
        id: String,
        date: String,
        status: OrderStatus,
        /// One flag per entry of [`STATUS_SEQUENCE`]; filled up to the
        /// order's position.
        steps: [bool; STATUS_SEQUENCE.len()],
    },
    NotFound,
}

impl TrackingView {
    pub const NOT_FOUND_MESSAGE: &'static str = "Not found";

    pub fn filled_steps(&self) -> usize {
        match self {
            Self::Found { steps, .. } => steps.iter().filter(|s| **s).count(),
            Self::NotFound => 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FavoriteCard {
    pub id: String,
    pub name: String,
    pub img: String,
    pub price: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FavoritesView {
    Empty,
    Cards(Vec<FavoriteCard>),
}

impl FavoritesView {
    pub const EMPTY_MESSAGE: &'static str = "No favorite dishes yet.";
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FavoriteToggle {
    Added(Favorite),
    Removed(Favorite),
}

pub struct ProfileBook {
    store: JsonStore,
    notifier: Rc<dyn Notifier>,
}

impl ProfileBook {
    pub fn new(store: JsonStore, notifier: Rc<dyn Notifier>) -> Self {
        Self { store, notifier }
    }

    /// Seed all three collections that are still absent.
    pub fn ensure_seeded(&self) {
        self.seed_if_absent(keys::PROFILE, seed::profile);
        self.seed_if_absent(keys::ORDERS, seed::orders);
        self.seed_if_absent(keys::FAVORITES, seed::favorites);
    }

    fn seed_if_absent<T: Serialize>(&self, key: &str, seed: fn() -> T) {
        if !self.store.contains(key) {
            debug!(key, "seeding sample data");
            self.store.set(key, &seed());
        }
    }

    fn read<T: Serialize + DeserializeOwned + Default>(&self, key: &str, seed: fn() -> T) -> T {
        self.seed_if_absent(key, seed);
        self.store.get_or(key, T::default())
    }

    // ── Profile ──

    pub fn profile(&self) -> Profile {
        self.read(keys::PROFILE, seed::profile)
    }

    /// Shallow-merge the given fields; `new_address` is appended to the
    /// address list rather than stored.
    pub fn update_profile(&self, update: ProfileUpdate) -> Profile {
        let mut profile = self.profile();
        if let Some(name) = update.name {
            profile.name = name;
        }
        if let Some(email) = update.email {
            profile.email = email;
        }
        if let Some(phone) = update.phone {
            profile.phone = phone;
        }
        if let Some(address) = update.new_address.filter(|a| !a.is_empty()) {
            profile.addresses.push(address);
        }
        self.store.set(keys::PROFILE, &profile);
        self.notifier
            .notify("Profile Updated Successfully ✓", Severity::Success);
        profile
    }

    /// Append a trimmed address. Blank input is ignored.
    pub fn add_address(&self, text: &str) -> bool {
        let text = text.trim();
        if text.is_empty() {
            return false;
        }
        let mut profile = self.profile();
        profile.addresses.push(text.to_owned());
        self.store.set(keys::PROFILE, &profile);
        self.notifier.notify("Address added", Severity::Success);
        true
    }

    pub fn remove_address(&self, index: usize) -> bool {
        let mut profile = self.profile();
        if index >= profile.addresses.len() {
            return false;
        }
        profile.addresses.remove(index);
        self.store.set(keys::PROFILE, &profile);
        self.notifier.notify("Address removed", Severity::Success);
        true
    }

    pub fn profile_view(&self) -> ProfileView {
        let profile = self.profile();
        let or_placeholder = |s: &str| {
            if s.is_empty() {
                PLACEHOLDER.to_owned()
            } else {
                s.to_owned()
            }
        };
        ProfileView {
            header_name: or_placeholder(&profile.name),
            name: or_placeholder(&profile.name),
            email: or_placeholder(&profile.email),
            phone: or_placeholder(&profile.phone),
            addresses: profile
                .addresses
                .iter()
                .enumerate()
                .map(|(index, text)| AddressRow {
                    index,
                    text: text.clone(),
                })
                .collect(),
        }
    }

    // ── Orders ──

    pub fn orders(&self) -> Vec<Order> {
        self.read(keys::ORDERS, seed::orders)
    }

    pub fn order(&self, id: &str) -> Option<Order> {
        self.orders().into_iter().find(|o| o.id == id)
    }

    pub fn order_history(&self) -> Vec<OrderRow> {
        self.orders()
            .iter()
            .map(|order| OrderRow {
                id: order.id.clone(),
                date: order.date.clone(),
                items_text: order
                    .items
                    .iter()
                    .map(|line| format!("{} x{}", line.name, line.qty))
                    .collect::<Vec<_>>()
                    .join(", "),
                total: format_money(order.total),
            })
            .collect()
    }

    pub fn order_details(&self, id: &str) -> OrderDetailsView {
        let Some(order) = self.order(id) else {
            return OrderDetailsView::NotFound;
        };
        OrderDetailsView::Found {
            lines: order
                .items
                .iter()
                .map(|line| DetailLine {
                    label: format!("{} x{}", line.name, line.qty),
                    amount: format_money(line.price * Decimal::from(line.qty)),
                })
                .collect(),
            total: format_money(order.total),
            id: order.id,
            date: order.date,
        }
    }

    pub fn tracking(&self, id: &str) -> TrackingView {
        let Some(order) = self.order(id) else {
            return TrackingView::NotFound;
        };
        let mut steps = [false; STATUS_SEQUENCE.len()];
        if let Some(reached) = order.status.progress_index() {
            for step in steps.iter_mut().take(reached + 1) {
                *step = true;
            }
        }
        TrackingView::Found {
            id: order.id,
            date: order.date,
            status: order.status,
            steps,
        }
    }

    /// Turn the cart into a new `preparing` order dated today.
    pub fn checkout(&self, cart: &mut CartManager) -> Option<Order> {
        self.checkout_on(cart, Local::now().date_naive())
    }

    pub fn checkout_on(&self, cart: &mut CartManager, date: NaiveDate) -> Option<Order> {
        if cart.is_empty() {
            self.notifier.notify("Your cart is empty", Severity::Warning);
            return None;
        }

        let mut orders = self.orders();
        let order = Order {
            id: next_order_id(&orders),
            date: date.format("%Y-%m-%d").to_string(),
            items: cart
                .items()
                .into_iter()
                .map(|item| OrderLine {
                    name: item.name,
                    qty: item.quantity,
                    price: item.price,
                })
                .collect(),
            total: round_cents(Totals::from_subtotal(cart.total()).total),
            status: OrderStatus::Preparing,
        };
        orders.push(order.clone());
        self.store.set(keys::ORDERS, &orders);
        cart.clear();

        self.notifier
            .notify(&format!("Order {} placed", order.id), Severity::Success);
        Some(order)
    }

    // ── Favorites ──

    pub fn favorites(&self) -> Vec<Favorite> {
        self.read(keys::FAVORITES, seed::favorites)
    }

    pub fn favorite(&self, id: &str) -> Option<Favorite> {
        self.favorites().into_iter().find(|f| f.id == id)
    }

    pub fn remove_favorite(&self, id: &str) {
        let mut favorites = self.favorites();
        favorites.retain(|f| f.id != id);
        self.store.set(keys::FAVORITES, &favorites);
        self.notifier
            .notify("Removed from favorites", Severity::Success);
    }

    /// Heart button on a menu card: add the dish, or drop it if a favorite
    /// with the same name exists.
    pub fn toggle_favorite(&self, name: &str, price: Decimal, image: &str) -> FavoriteToggle {
        let mut favorites = self.favorites();
        let outcome = match favorites.iter().position(|f| f.name == name) {
            Some(index) => {
                let removed = favorites.remove(index);
                self.notifier.notify(
                    &format!("{name} removed from favorites"),
                    Severity::Info,
                );
                FavoriteToggle::Removed(removed)
            }
            None => {
                let added = Favorite {
                    id: Uuid::new_v4().to_string(),
                    name: name.to_owned(),
                    img: image.to_owned(),
                    price,
                };
                favorites.push(added.clone());
                self.notifier
                    .notify(&format!("{name} added to favorites"), Severity::Success);
                FavoriteToggle::Added(added)
            }
        };
        self.store.set(keys::FAVORITES, &favorites);
        outcome
    }

    pub fn favorites_view(&self) -> FavoritesView {
        let favorites = self.favorites();
        if favorites.is_empty() {
            return FavoritesView::Empty;
        }
        FavoritesView::Cards(
            favorites
                .into_iter()
                .map(|f| FavoriteCard {
                    price: format_money(f.price),
                    id: f.id,
                    name: f.name,
                    img: f.img,
                })
                .collect(),
        )
    }
}

fn next_order_id(orders: &[Order]) -> String {
    let highest = orders
        .iter()
        .filter_map(|o| o.id.strip_prefix("HB-")?.parse::<u64>().ok())
        .max()
        .unwrap_or(1000);
    match highest.checked_add(1) {
        Some(next) => format!("HB-{next}"),
        None => format!("HB-{}", Uuid::new_v4().simple()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::RecordingNotifier;

    fn book() -> (ProfileBook, JsonStore, Rc<RecordingNotifier>) {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
        let store = JsonStore::in_memory();
        let notifier = Rc::new(RecordingNotifier::default());
        (
            ProfileBook::new(store.clone(), notifier.clone()),
            store,
            notifier,
        )
    }

    #[test]
    fn first_read_seeds_each_collection() {
        let (book, store, _) = book();
        assert!(!store.contains(keys::ORDERS));

        assert_eq!(book.orders().len(), 3);
        assert!(store.contains(keys::ORDERS));
        assert!(!store.contains(keys::FAVORITES));

        book.ensure_seeded();
        assert!(store.contains(keys::PROFILE));
        assert!(store.contains(keys::FAVORITES));
    }

    #[test]
    fn existing_documents_are_not_reseeded() {
        let (book, store, _) = book();
        store.set(keys::FAVORITES, &Vec::<Favorite>::new());

        book.ensure_seeded();
        assert_eq!(book.favorites_view(), FavoritesView::Empty);
    }

    #[test]
    fn new_address_is_appended_not_stored() {
        let (book, store, notifier) = book();
        let before = book.profile();

        let after = book.update_profile(ProfileUpdate {
            new_address: Some("X".into()),
            ..Default::default()
        });

        assert_eq!(after.name, before.name);
        assert_eq!(after.email, before.email);
        assert_eq!(after.phone, before.phone);
        assert_eq!(after.addresses.last().map(String::as_str), Some("X"));
        assert_eq!(after.addresses.len(), before.addresses.len() + 1);

        let raw: serde_json::Value = store.get_or(keys::PROFILE, serde_json::Value::Null);
        assert!(raw.get("newAddress").is_none());
        assert_eq!(
            notifier.last().map(|(_, s)| s),
            Some(Severity::Success)
        );
    }

    #[test]
    fn update_merges_only_given_fields() {
        let (book, _, _) = book();
        let updated = book.update_profile(ProfileUpdate {
            phone: Some("+1 555-9999".into()),
            ..Default::default()
        });
        assert_eq!(updated.name, "Alex Morgan");
        assert_eq!(updated.phone, "+1 555-9999");
        assert_eq!(updated.addresses.len(), 2);
    }

    #[test]
    fn removing_only_address_round_trips_other_fields() {
        let (book, store, _) = book();
        let mut profile = seed::profile();
        profile.addresses = vec!["1 Main St".into()];
        profile
            .extra
            .insert("memberSince".into(), serde_json::json!("2024"));
        store.set(keys::PROFILE, &profile);

        assert!(book.remove_address(0));
        assert!(!book.remove_address(0));

        let reloaded = book.profile();
        assert!(reloaded.addresses.is_empty());
        assert_eq!(reloaded.name, profile.name);
        assert_eq!(reloaded.email, profile.email);
        assert_eq!(reloaded.phone, profile.phone);
        assert_eq!(reloaded.extra, profile.extra);
    }

    #[test]
    fn blank_address_is_ignored() {
        let (book, _, notifier) = book();
        assert!(!book.add_address("   "));
        assert!(notifier.entries().is_empty());
        assert!(book.add_address("  9 Pine Ave "));
        assert_eq!(book.profile().addresses.last().unwrap(), "9 Pine Ave");
    }

    #[test]
    fn empty_fields_render_placeholders() {
        let (book, store, _) = book();
        store.set(keys::PROFILE, &Profile::default());

        let view = book.profile_view();
        assert_eq!(view.name, PLACEHOLDER);
        assert_eq!(view.email, PLACEHOLDER);
        assert!(view.addresses.is_empty());
    }

    #[test]
    fn history_rows_list_items() {
        let (book, _, _) = book();
        let rows = book.order_history();
        assert_eq!(rows[0].items_text, "Quinoa Salad x1, Green Smoothie x2");
        assert_eq!(rows[0].total, "$16.50");
    }

    #[test]
    fn details_use_stored_total() {
        let (book, _, _) = book();
        match book.order_details("HB-1001") {
            OrderDetailsView::Found { lines, total, .. } => {
                assert_eq!(lines[1].label, "Green Smoothie x2");
                assert_eq!(lines[1].amount, "$8.00");
                assert_eq!(total, "$16.50");
            }
            OrderDetailsView::NotFound => panic!("seeded order missing"),
        }
        assert_eq!(book.order_details("HB-0"), OrderDetailsView::NotFound);
    }

    #[test]
    fn tracking_fills_steps_up_to_status() {
        let (book, _, _) = book();
        let on_the_way = book.tracking("HB-1009");
        assert_eq!(on_the_way.filled_steps(), 2);
        match on_the_way {
            TrackingView::Found { steps, status, .. } => {
                assert_eq!(steps, [true, true, false]);
                assert_eq!(status, OrderStatus::OnTheWay);
            }
            TrackingView::NotFound => panic!("seeded order missing"),
        }

        assert_eq!(book.tracking("HB-1015").filled_steps(), 1);
        assert_eq!(book.tracking("HB-1001").filled_steps(), 3);
        assert_eq!(book.tracking("nope"), TrackingView::NotFound);
    }

    #[test]
    fn unknown_status_tracks_nothing() {
        let (book, store, _) = book();
        let mut orders = seed::orders();
        orders[0].status = OrderStatus::Other("lost".into());
        store.set(keys::ORDERS, &orders);
        assert_eq!(book.tracking("HB-1001").filled_steps(), 0);
    }

    #[test]
    fn remove_favorite_filters_by_id() {
        let (book, _, notifier) = book();
        book.remove_favorite("f2");

        let ids: Vec<String> = book.favorites().into_iter().map(|f| f.id).collect();
        assert_eq!(ids, vec!["f1", "f3"]);
        assert_eq!(
            notifier.last(),
            Some(("Removed from favorites".to_owned(), Severity::Success))
        );
    }

    #[test]
    fn toggle_adds_then_removes() {
        let (book, _, _) = book();
        let added = book.toggle_favorite("Lentil Soup", Decimal::new(7, 0), "soup.png");
        let FavoriteToggle::Added(fav) = added else {
            panic!("expected add");
        };
        assert!(book.favorite(&fav.id).is_some());

        let removed = book.toggle_favorite("Lentil Soup", Decimal::new(7, 0), "soup.png");
        assert_eq!(removed, FavoriteToggle::Removed(fav));
        assert_eq!(book.favorites().len(), 3);
    }

    #[test]
    fn checkout_records_order_and_clears_cart() {
        let (book, store, notifier) = book();
        let mut cart = CartManager::load(store.clone(), notifier.clone());
        cart.add_item("Bowl", Decimal::new(5, 0), "");
        cart.add_item("Bowl", Decimal::new(5, 0), "");
        cart.add_item("Juice", Decimal::new(3, 0), "");

        let date = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
        let order = book.checkout_on(&mut cart, date).unwrap();

        assert_eq!(order.id, "HB-1016");
        assert_eq!(order.date, "2026-01-05");
        assert_eq!(order.total, Decimal::new(1404, 2));
        assert_eq!(order.status, OrderStatus::Preparing);
        assert!(cart.is_empty());
        assert_eq!(book.orders().len(), 4);

        assert!(book.checkout_on(&mut cart, date).is_none());
        assert_eq!(notifier.last().map(|(_, s)| s), Some(Severity::Warning));
    }

    #[test]
    fn checkout_keeps_foreign_statuses() {
        let (book, store, notifier) = book();
        let raw = r#"[{"id":"HB-2000","date":"2026-01-01","items":[],"total":4.5,"status":"cancelled"}]"#;
        store.set_raw(keys::ORDERS, raw);
        let mut cart = CartManager::load(store.clone(), notifier);
        cart.add_item("Bowl", Decimal::new(5, 0), "");

        let date = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
        let order = book.checkout_on(&mut cart, date).unwrap();
        assert_eq!(order.id, "HB-2001");

        let stored: serde_json::Value = store.get_or(keys::ORDERS, serde_json::Value::Null);
        assert_eq!(stored[0]["status"], "cancelled");
        assert_eq!(stored[1]["status"], "preparing");
        assert_eq!(book.tracking("HB-2000").filled_steps(), 0);
    }

    #[test]
    fn largest_order_id_does_not_overflow() {
        let (book, store, notifier) = book();
        let raw = r#"[{"id":"HB-18446744073709551615","date":"2026-01-01","items":[],"total":1,"status":"delivered"}]"#;
        store.set_raw(keys::ORDERS, raw);
        let mut cart = CartManager::load(store.clone(), notifier);
        cart.add_item("Bowl", Decimal::new(5, 0), "");

        let date = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
        let order = book.checkout_on(&mut cart, date).unwrap();
        assert!(order.id.starts_with("HB-"));
        assert_ne!(order.id, "HB-0");
        assert_ne!(order.id, "HB-18446744073709551615");
        assert_eq!(book.orders().len(), 2);
    }
}
