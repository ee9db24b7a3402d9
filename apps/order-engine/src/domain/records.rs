//! Record types handled by the persistence layer.
//!
//! Field declaration order matters: the generic store derives column
//! order from it, and the first field is always the primary key. Ids
//! are backend-assigned; a zero id marks a record not yet persisted.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A client who can place orders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    /// Primary key (backend-assigned).
    pub id: i64,
    /// Full name.
    pub name: String,
    /// Postal address.
    pub address: String,
    /// Contact email address.
    pub email: String,
    /// Age in years. Must be within [7, 99].
    pub age: i64,
}

/// A product that can be ordered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Primary key (backend-assigned).
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Unit price. Must be within (0, 10000].
    pub price: Decimal,
    /// Quantity on hand.
    pub quantity: i64,
}

/// An order placed by a client for a product.
///
/// Orders are immutable once created; there is no update path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Primary key (backend-assigned).
    pub id: i64,
    /// Client placing the order.
    pub client_id: i64,
    /// Product being ordered.
    pub product_id: i64,
    /// Placement timestamp, captured at the moment of placement.
    pub order_date: DateTime<Utc>,
    /// Ordered quantity.
    pub quantity: i64,
}

/// An audit-log entry recording a completed purchase.
///
/// Bills are append-only: never mutated or deleted, independent of the
/// mutable Order/Product state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bill {
    /// Primary key (backend-assigned).
    pub id: i64,
    /// The order this bill records.
    pub order_id: i64,
    /// Client reference.
    pub client_id: i64,
    /// Product reference.
    pub product_id: i64,
    /// Purchased quantity.
    pub quantity: i64,
    /// Quantity times the unit price at order time.
    pub total_price: Decimal,
    /// Placement timestamp, equal to the order's.
    pub timestamp: DateTime<Utc>,
}
