//! Sample content written the first time a collection is read and found
//! absent.

use hb_api_types::{Favorite, Order, OrderLine, OrderStatus, Profile};
use rust_decimal::Decimal;

pub fn profile() -> Profile {
    Profile {
        name: "Alex Morgan".into(),
        email: "alex@example.com".into(),
        phone: "+1 555-1234".into(),
        addresses: vec![
            "123 Greenway St, Springfield".into(),
            "Apartment 5B, 77 Elm Rd".into(),
        ],
        extra: Default::default(),
    }
}

fn line(name: &str, qty: u32, price: Decimal) -> OrderLine {
    OrderLine {
        name: name.into(),
        qty,
        price,
    }
}

pub fn orders() -> Vec<Order> {
    vec![
        Order {
            id: "HB-1001".into(),
            date: "2025-11-24".into(),
            items: vec![
                line("Quinoa Salad", 1, Decimal::new(85, 1)),
                line("Green Smoothie", 2, Decimal::new(4, 0)),
            ],
            total: Decimal::new(165, 1),
            status: OrderStatus::Delivered,
        },
        Order {
            id: "HB-1009".into(),
            date: "2025-11-28".into(),
            items: vec![
                line("Grilled Veg Wrap", 1, Decimal::new(9, 0)),
                line("Kale Chips", 1, Decimal::new(3, 0)),
            ],
            total: Decimal::new(12, 0),
            status: OrderStatus::OnTheWay,
        },
        Order {
            id: "HB-1015".into(),
            date: "2025-12-01".into(),
            items: vec![line("Avocado Toast", 2, Decimal::new(6, 0))],
            total: Decimal::new(12, 0),
            status: OrderStatus::Preparing,
        },
    ]
}

fn favorite(id: &str, name: &str, colour: &str, price: Decimal) -> Favorite {
    Favorite {
        id: id.into(),
        name: name.into(),
        img: format!(
            "https://via.placeholder.com/420x300/{colour}?text={}",
            name.replace(' ', "+")
        ),
        price,
    }
}

pub fn favorites() -> Vec<Favorite> {
    vec![
        favorite("f1", "Quinoa Salad", "adebad", Decimal::new(85, 1)),
        favorite("f2", "Green Smoothie", "9fe3d4", Decimal::new(4, 0)),
        favorite("f3", "Avocado Toast", "ffd8a8", Decimal::new(6, 0)),
    ]
}
