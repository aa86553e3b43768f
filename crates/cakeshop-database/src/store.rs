//! Store traits implemented by the PostgreSQL repositories and the
//! in-memory store.
//!
//! The service layer depends only on these traits, so validation and
//! business rules are testable without a live database.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use cakeshop_core::result::AppResult;
use cakeshop_core::types::pagination::{PageRequest, PageResponse};
use cakeshop_entity::order::{Order, OrderStatus};
use cakeshop_entity::user::User;

/// Per-status aggregate for the order stats endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct StatusBucket {
    /// The order status.
    pub status: OrderStatus,
    /// Number of orders in this status.
    pub count: i64,
    /// Sum of total prices in this status, in cents.
    pub total_cents: i64,
}

/// User profile storage.
#[async_trait]
pub trait UserStore: Send + Sync + 'static {
    /// Find a profile by external-provider subject id.
    async fn find_by_subject(&self, subject: &str) -> AppResult<Option<User>>;

    /// Find a profile by email (case-insensitive).
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Find a profile by username (case-insensitive).
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;

    /// Insert a new profile and return it.
    async fn insert(&self, user: &User) -> AppResult<User>;

    /// Update an existing profile and return the updated version.
    async fn update(&self, user: &User) -> AppResult<User>;
}

/// Order storage.
#[async_trait]
pub trait OrderStore: Send + Sync + 'static {
    /// Find an order by primary key.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Order>>;

    /// List a user's orders, newest first, optionally filtered by status.
    async fn list_by_owner(
        &self,
        owner_subject: &str,
        status: Option<OrderStatus>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Order>>;

    /// Insert a new order and return it.
    async fn insert(&self, order: &Order) -> AppResult<Order>;

    /// Update an existing order and return the updated version.
    async fn update(&self, order: &Order) -> AppResult<Order>;

    /// Aggregate a user's orders by status.
    async fn stats_by_owner(&self, owner_subject: &str) -> AppResult<Vec<StatusBucket>>;
}
