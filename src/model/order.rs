//! Order types and the order status state machine.

use crate::model::menu::{MenuItem, MenuItemId};
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// Customer name used when the cashier leaves the name blank.
pub const WALK_IN_CUSTOMER: &str = "Khách vãng lai";

/// Appended to the parent's customer name on an add-on order.
pub const ADDITION_SUFFIX: &str = " (Thêm)";

/// Length of the short code printed on tickets.
pub const ORDER_CODE_LEN: usize = 4;

const CODE_ALPHABET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Store-assigned key of an order. Independent of the short ticket code in [`Order::id`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct OrderKey(pub u32);

impl From<u32> for OrderKey {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for OrderKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "order_{}", self.0)
    }
}

/// Error returned when a string is not an `order_<n>` key.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid order key: {0}")]
pub struct ParseOrderKeyError(pub String);

impl FromStr for OrderKey {
    type Err = ParseOrderKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.strip_prefix("order_")
            .and_then(|n| n.parse().ok())
            .map(Self)
            .ok_or_else(|| ParseOrderKeyError(s.to_string()))
    }
}

impl TryFrom<String> for OrderKey {
    type Error = ParseOrderKeyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<OrderKey> for String {
    fn from(key: OrderKey) -> Self {
        key.to_string()
    }
}

/// Where an order sits in the kitchen flow.
///
/// `pending → preparing → completed`, with `pending → completed` allowed for orders that
/// need no preparation. Cancellation (deletion) is only open to `pending` orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Preparing,
    Completed,
}

impl OrderStatus {
    pub fn can_transition_to(self, next: OrderStatus) -> bool {
        use OrderStatus::*;
        matches!(
            (self, next),
            (Pending, Preparing) | (Preparing, Completed) | (Pending, Completed)
        )
    }

    pub fn is_cancellable(self) -> bool {
        self == OrderStatus::Pending
    }

    pub fn is_active(self) -> bool {
        self != OrderStatus::Completed
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Completed => "completed",
        }
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fulfilment mode. Decides the payment flag an order starts with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderType {
    DineIn,
    Takeaway,
}

impl OrderType {
    pub const ALL: [OrderType; 2] = [OrderType::DineIn, OrderType::Takeaway];

    /// Takeaway is paid at the counter on pickup; dine-in is settled later.
    pub fn default_paid(self) -> bool {
        matches!(self, OrderType::Takeaway)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OrderType::DineIn => "dine-in",
            OrderType::Takeaway => "takeaway",
        }
    }
}

impl Display for OrderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One line of a cart or order: a menu item, how many, and an optional note.
///
/// `(item.id, note)` identifies the line; the same drink with different notes is two lines.
/// An empty note means "no note".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    #[serde(flatten)]
    pub item: MenuItem,
    pub quantity: u32,
    #[serde(default)]
    pub note: String,
}

impl OrderItem {
    pub fn new(item: MenuItem, quantity: u32, note: impl Into<String>) -> Self {
        Self {
            item,
            quantity,
            note: note.into(),
        }
    }

    pub fn line_total(&self) -> u64 {
        self.item.price * u64::from(self.quantity)
    }

    pub fn line_key(&self) -> (MenuItemId, &str) {
        (self.item.id, self.note.as_str())
    }

    pub fn has_note(&self) -> bool {
        !self.note.is_empty()
    }
}

/// Sum of `price * quantity` over the lines.
pub fn items_total(items: &[OrderItem]) -> u64 {
    items.iter().map(OrderItem::line_total).sum()
}

/// Random ticket code, e.g. `"K3ZQ"`.
pub fn generate_order_code() -> String {
    let mut rng = rand::thread_rng();
    (0..ORDER_CODE_LEN)
        .map(|_| CODE_ALPHABET[rng.gen_range(0..CODE_ALPHABET.len())] as char)
        .collect()
}

/// A customer order as held by the order store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Store address; not part of the record body.
    #[serde(skip)]
    pub key: OrderKey,
    /// Short ticket code shown to staff and customers.
    pub id: String,
    pub items: Vec<OrderItem>,
    pub status: OrderStatus,
    #[serde(with = "iso_millis")]
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub customer_name: String,
    pub total: u64,
    pub order_type: OrderType,
    pub is_paid: bool,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        alias = "parentOrderId"
    )]
    pub parent_order_key: Option<OrderKey>,
}

impl Order {
    /// True for an add-on order waiting to be merged into its parent.
    pub fn is_addition(&self) -> bool {
        self.parent_order_key.is_some()
    }

    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }

    pub fn total_matches_items(&self) -> bool {
        self.total == items_total(&self.items)
    }
}

/// Payload for creating an order in the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub id: String,
    pub items: Vec<OrderItem>,
    pub customer_name: String,
    pub order_type: OrderType,
    pub placed_at: DateTime<Utc>,
    pub parent_order_key: Option<OrderKey>,
}

impl NewOrder {
    /// A fresh order from checkout. A blank name becomes [`WALK_IN_CUSTOMER`].
    pub fn new(
        items: Vec<OrderItem>,
        customer_name: &str,
        order_type: OrderType,
        placed_at: DateTime<Utc>,
    ) -> Self {
        let name = customer_name.trim();
        Self {
            id: generate_order_code(),
            items,
            customer_name: if name.is_empty() {
                WALK_IN_CUSTOMER.to_string()
            } else {
                name.to_string()
            },
            order_type,
            placed_at,
            parent_order_key: None,
        }
    }

    /// An add-on ticket for `parent`, merged back into it once completed.
    pub fn addition(parent: &Order, items: Vec<OrderItem>, placed_at: DateTime<Utc>) -> Self {
        Self {
            id: generate_order_code(),
            items,
            customer_name: format!("{}{}", parent.customer_name, ADDITION_SUFFIX),
            order_type: parent.order_type,
            placed_at,
            parent_order_key: Some(parent.key),
        }
    }

    pub fn total(&self) -> u64 {
        items_total(&self.items)
    }
}

/// Partial order update. `None` fields are left untouched by the store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderPatch {
    pub status: Option<OrderStatus>,
    pub items: Option<Vec<OrderItem>>,
    pub total: Option<u64>,
    pub is_paid: Option<bool>,
    pub customer_name: Option<String>,
}

impl OrderPatch {
    pub fn status(status: OrderStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    /// New lines together with their recomputed total and the status to keep.
    pub fn items(status: OrderStatus, items: Vec<OrderItem>) -> Self {
        Self {
            status: Some(status),
            total: Some(items_total(&items)),
            items: Some(items),
            ..Self::default()
        }
    }

    pub fn payment(status: OrderStatus, is_paid: bool) -> Self {
        Self {
            status: Some(status),
            is_paid: Some(is_paid),
            ..Self::default()
        }
    }

    pub fn customer_name(name: impl Into<String>) -> Self {
        Self {
            customer_name: Some(name.into()),
            ..Self::default()
        }
    }
}

/// RFC 3339 timestamps with millisecond precision, as the order records have always stored them.
mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|ts| ts.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
