//! Response DTOs.

use serde::{Deserialize, Serialize};

use cakeshop_database::store::StatusBucket;

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self { success: true, data }
    }
}

/// Simple message response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Message.
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status.
    pub status: String,
    /// Version.
    pub version: String,
}

/// Auth status for the current token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthStatusResponse {
    /// Always true when this response is reachable.
    pub authenticated: bool,
    /// Provider subject id.
    pub subject: String,
    /// Email claim, if present.
    pub email: Option<String>,
}

/// Aggregated order statistics for the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderStatsResponse {
    /// Total number of orders across all statuses.
    pub total_orders: i64,
    /// Total spend across all statuses, in cents.
    pub total_cents: i64,
    /// Per-status breakdown.
    pub by_status: Vec<StatusBucket>,
}

impl OrderStatsResponse {
    /// Aggregate per-status buckets into overall totals.
    pub fn from_buckets(mut by_status: Vec<StatusBucket>) -> Self {
        by_status.sort_by_key(|b| b.status.as_str());
        let total_orders = by_status.iter().map(|b| b.count).sum();
        let total_cents = by_status.iter().map(|b| b.total_cents).sum();
        Self {
            total_orders,
            total_cents,
            by_status,
        }
    }
}
