//! Order entity model.

use chrono::{DateTime, NaiveDate, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::slot::DeliverySlot;
use super::status::OrderStatus;

/// A customer order.
///
/// `client_ip` and `user_agent` are request metadata captured at creation
/// and are never serialized into responses.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Order {
    /// Unique order identifier.
    pub id: Uuid,
    /// Subject id of the owning user (indexed).
    pub owner_subject: String,
    /// System-generated unique order number, assigned exactly once.
    pub order_number: String,
    /// Product name (one of the fixed catalog).
    pub product_name: String,
    /// Quantity in [1, 10].
    pub quantity: i32,
    /// Unit price in cents, resolved from the catalog at creation.
    pub unit_price_cents: i64,
    /// Total price in cents; always `unit_price_cents * quantity`.
    pub total_price_cents: i64,
    /// Requested delivery date.
    pub delivery_date: NaiveDate,
    /// Requested delivery window.
    pub delivery_slot: DeliverySlot,
    /// Delivery region name.
    pub delivery_region: String,
    /// Optional gift/instruction message.
    pub message: Option<String>,
    /// Current lifecycle status.
    pub status: OrderStatus,
    /// When the order was placed (immutable).
    pub created_at: DateTime<Utc>,
    /// When the order was last updated.
    pub updated_at: DateTime<Utc>,
    /// When the order was shipped, if it has been.
    pub shipped_at: Option<DateTime<Utc>>,
    /// When the order was delivered, if it has been.
    pub delivered_at: Option<DateTime<Utc>>,
    /// Client IP captured at creation. Never exposed.
    #[serde(skip_serializing)]
    pub client_ip: Option<String>,
    /// User-Agent captured at creation. Never exposed.
    #[serde(skip_serializing)]
    pub user_agent: Option<String>,
}

/// Validated data required to place a new order.
#[derive(Debug, Clone)]
pub struct NewOrder {
    /// Subject id of the owner.
    pub owner_subject: String,
    /// Catalog product name.
    pub product_name: String,
    /// Quantity in [1, 10].
    pub quantity: i32,
    /// Unit price in cents.
    pub unit_price_cents: i64,
    /// Delivery date.
    pub delivery_date: NaiveDate,
    /// Delivery window.
    pub delivery_slot: DeliverySlot,
    /// Delivery region.
    pub delivery_region: String,
    /// Optional message.
    pub message: Option<String>,
    /// Client IP of the creating request.
    pub client_ip: Option<String>,
    /// User-Agent of the creating request.
    pub user_agent: Option<String>,
}

impl Order {
    /// Build a new pending order from validated input.
    ///
    /// Assigns the order number and computes the total price.
    pub fn create(new: NewOrder) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            owner_subject: new.owner_subject,
            order_number: generate_order_number(),
            product_name: new.product_name,
            quantity: new.quantity,
            unit_price_cents: new.unit_price_cents,
            total_price_cents: new.unit_price_cents * new.quantity as i64,
            delivery_date: new.delivery_date,
            delivery_slot: new.delivery_slot,
            delivery_region: new.delivery_region,
            message: new.message,
            status: OrderStatus::Pending,
            created_at: now,
            updated_at: now,
            shipped_at: None,
            delivered_at: None,
            client_ip: new.client_ip,
            user_agent: new.user_agent,
        }
    }

    /// Recompute the total from the stored unit price and quantity.
    ///
    /// Called before every persist so the total is never trusted from
    /// client input.
    pub fn recompute_total(&mut self) {
        self.total_price_cents = self.unit_price_cents * self.quantity as i64;
    }
}

/// Generate a unique order number.
///
/// Millisecond timestamp plus a random six-digit suffix; collisions would
/// require two orders in the same millisecond drawing the same suffix.
/// The database additionally carries a unique index on the column.
pub fn generate_order_number() -> String {
    let millis = Utc::now().timestamp_millis();
    let suffix: u32 = rand::rng().random_range(0..1_000_000);
    format!("ORD-{millis}-{suffix:06}")
}
