//! Order status enumeration and transition guards.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle status of an order.
///
/// Orders start as `Pending` and move forward through fulfilment;
/// cancellation is a terminal side exit available early in the flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "order_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Placed, awaiting confirmation.
    Pending,
    /// Confirmed by the shop.
    Confirmed,
    /// Being prepared.
    Processing,
    /// Out for delivery.
    Shipped,
    /// Delivered to the customer.
    Delivered,
    /// Cancelled by the customer or the shop.
    Cancelled,
}

impl OrderStatus {
    /// Whether delivery fields (date, slot, region, message, quantity)
    /// may still be edited.
    pub fn is_editable(&self) -> bool {
        matches!(self, Self::Pending | Self::Confirmed)
    }

    /// Whether the order may still be cancelled.
    pub fn is_cancellable(&self) -> bool {
        matches!(self, Self::Pending | Self::Confirmed | Self::Processing)
    }

    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Processing => "processing",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }

    /// All statuses, in lifecycle order.
    pub fn all() -> [OrderStatus; 6] {
        [
            Self::Pending,
            Self::Confirmed,
            Self::Processing,
            Self::Shipped,
            Self::Delivered,
            Self::Cancelled,
        ]
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = cakeshop_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "processing" => Ok(Self::Processing),
            "shipped" => Ok(Self::Shipped),
            "delivered" => Ok(Self::Delivered),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(cakeshop_core::AppError::validation(format!(
                "Invalid order status: '{s}'. Expected one of: pending, confirmed, processing, shipped, delivered, cancelled"
            ))),
        }
    }
}
