use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

// ── Storefront documents (persisted in the browser store) ──

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CartItem {
    pub name: String,
    pub price: Decimal,
    #[serde(default)]
    pub image: String,
    pub quantity: u32,
}

/// Where an order is. Statuses written by other clients are kept verbatim in
/// `Other` so they survive a read-modify-write of the order list.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OrderStatus {
    Preparing,
    OnTheWay,
    Delivered,
    Other(String),
}

/// Fixed progression an order moves through.
pub const STATUS_SEQUENCE: [OrderStatus; 3] = [
    OrderStatus::Preparing,
    OrderStatus::OnTheWay,
    OrderStatus::Delivered,
];

impl OrderStatus {
    pub fn parse(value: &str) -> Self {
        match value {
            "preparing" => Self::Preparing,
            "on the way" => Self::OnTheWay,
            "delivered" => Self::Delivered,
            other => Self::Other(other.to_owned()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Preparing => "preparing",
            Self::OnTheWay => "on the way",
            Self::Delivered => "delivered",
            Self::Other(raw) => raw,
        }
    }

    /// Position in [`STATUS_SEQUENCE`], `None` for statuses outside it.
    pub fn progress_index(&self) -> Option<usize> {
        STATUS_SEQUENCE.iter().position(|s| s == self)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for OrderStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for OrderStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse(&raw))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderLine {
    pub name: String,
    pub qty: u32,
    pub price: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Order {
    pub id: String,
    pub date: String,
    #[serde(default)]
    pub items: Vec<OrderLine>,
    pub total: Decimal,
    pub status: OrderStatus,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Profile {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub addresses: Vec<String>,
    /// Fields written by other pages; kept so a save does not drop them.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Partial profile update. `new_address` is appended to the address list
/// instead of being stored as a field.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub new_address: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Favorite {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub img: String,
    pub price: Decimal,
}

// ── Admin resources ──

/// Backend identifier; accepts either a JSON string or a number.
#[derive(Debug, Clone, Serialize, PartialEq, Eq, Hash, Default)]
pub struct ResourceId(pub String);

impl<'de> Deserialize<'de> for ResourceId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Int(i64),
        }
        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(s) => ResourceId(s),
            Raw::Int(n) => ResourceId(n.to_string()),
        })
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Dashboard counters keyed by the `data-api-target` of the stat card.
pub type DashboardStats = BTreeMap<String, serde_json::Value>;

/// Flat string map submitted by an admin form.
pub type FormData = BTreeMap<String, String>;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AdminOrder {
    pub id: ResourceId,
    #[serde(default)]
    pub customer_name: String,
    #[serde(default)]
    pub items: String,
    #[serde(default)]
    pub total: Decimal,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub date: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OrderStatusUpdate {
    pub order_id: String,
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MenuItem {
    #[serde(default)]
    pub id: Option<ResourceId>,
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub price: Decimal,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MenuCategory {
    pub id: ResourceId,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Promotion {
    pub id: ResourceId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub discount: Decimal,
    #[serde(default)]
    pub expiry_date: String,
    #[serde(default)]
    pub enabled: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PromotionToggle {
    pub enabled: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    #[serde(default)]
    pub summary: Option<BTreeMap<String, serde_json::Value>>,
    #[serde(default)]
    pub charts: Option<serde_json::Value>,
    #[serde(default)]
    pub top_items: Option<Vec<TopItem>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TopItem {
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub orders: u64,
    #[serde(default)]
    pub revenue: Decimal,
}

// ── Storefront API bodies ──

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MenuEntry {
    pub id: ResourceId,
    pub name: String,
    pub price: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CheckoutRequest {
    pub items: Vec<CartItem>,
    pub total: Decimal,
}

/// Render an arbitrary JSON scalar the way a text node would show it.
pub fn display_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_uses_spaced_wire_names() {
        let parsed: OrderStatus = serde_json::from_str("\"on the way\"").unwrap();
        assert_eq!(parsed, OrderStatus::OnTheWay);
        assert_eq!(parsed.progress_index(), Some(1));

        let odd: OrderStatus = serde_json::from_str("\"lost\"").unwrap();
        assert_eq!(odd, OrderStatus::Other("lost".into()));
        assert_eq!(odd.progress_index(), None);
    }

    #[test]
    fn foreign_status_round_trips_verbatim() {
        let status: OrderStatus = serde_json::from_str("\"cancelled\"").unwrap();
        assert_eq!(serde_json::to_string(&status).unwrap(), "\"cancelled\"");
        assert_eq!(status.to_string(), "cancelled");
    }

    #[test]
    fn resource_id_accepts_numbers() {
        let cat: MenuCategory = serde_json::from_str(r#"{"id": 7, "name": "Bowls"}"#).unwrap();
        assert_eq!(cat.id, ResourceId("7".into()));
    }

    #[test]
    fn profile_keeps_unknown_fields() {
        let raw = r#"{"name":"A","email":"a@x","phone":"1","addresses":[],"loyalty":3}"#;
        let profile: Profile = serde_json::from_str(raw).unwrap();
        assert_eq!(profile.extra.get("loyalty"), Some(&serde_json::json!(3)));

        let back = serde_json::to_value(&profile).unwrap();
        assert_eq!(back["loyalty"], serde_json::json!(3));
    }

    #[test]
    fn order_reads_float_prices() {
        let raw = r#"{"id":"HB-1","date":"2025-11-24","items":[{"name":"Smoothie","qty":2,"price":4}],"total":8.5,"status":"delivered"}"#;
        let order: Order = serde_json::from_str(raw).unwrap();
        assert_eq!(order.total, Decimal::new(85, 1));
        assert_eq!(order.items[0].price, Decimal::new(4, 0));
    }
}
