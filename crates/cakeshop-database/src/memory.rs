//! In-memory store implementations.
//!
//! Selected with `database.provider = "memory"`. Backs the integration
//! tests and demo deployments; enforces the same uniqueness rules the
//! PostgreSQL schema does.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use cakeshop_core::error::AppError;
use cakeshop_core::result::AppResult;
use cakeshop_core::types::pagination::{PageRequest, PageResponse};
use cakeshop_entity::order::{Order, OrderStatus};
use cakeshop_entity::user::User;

use crate::store::{OrderStore, StatusBucket, UserStore};

/// In-process user store.
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    users: RwLock<HashMap<Uuid, User>>,
}

impl MemoryUserStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_subject(&self, subject: &str) -> AppResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.subject == subject).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|u| u.username.eq_ignore_ascii_case(username))
            .cloned())
    }

    async fn insert(&self, user: &User) -> AppResult<User> {
        let mut users = self.users.write().await;
        let duplicate = users.values().any(|u| {
            u.subject == user.subject
                || u.email.eq_ignore_ascii_case(&user.email)
                || u.username.eq_ignore_ascii_case(&user.username)
        });
        if duplicate {
            return Err(AppError::conflict(
                "A user with this subject, email, or username already exists",
            ));
        }
        users.insert(user.id, user.clone());
        Ok(user.clone())
    }

    async fn update(&self, user: &User) -> AppResult<User> {
        let mut users = self.users.write().await;
        if !users.contains_key(&user.id) {
            return Err(AppError::not_found(format!("User {} not found", user.id)));
        }
        users.insert(user.id, user.clone());
        Ok(user.clone())
    }
}

/// In-process order store.
#[derive(Debug, Default)]
pub struct MemoryOrderStore {
    orders: RwLock<HashMap<Uuid, Order>>,
}

impl MemoryOrderStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OrderStore for MemoryOrderStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Order>> {
        let orders = self.orders.read().await;
        Ok(orders.get(&id).cloned())
    }

    async fn list_by_owner(
        &self,
        owner_subject: &str,
        status: Option<OrderStatus>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Order>> {
        let orders = self.orders.read().await;
        let mut matching: Vec<Order> = orders
            .values()
            .filter(|o| o.owner_subject == owner_subject)
            .filter(|o| status.is_none_or(|s| o.status == s))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let total = matching.len() as u64;
        let items: Vec<Order> = matching
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .collect();

        Ok(PageResponse::new(items, page.page, page.page_size, total))
    }

    async fn insert(&self, order: &Order) -> AppResult<Order> {
        let mut orders = self.orders.write().await;
        if orders
            .values()
            .any(|o| o.order_number == order.order_number)
        {
            return Err(AppError::conflict("Duplicate order number"));
        }
        orders.insert(order.id, order.clone());
        Ok(order.clone())
    }

    async fn update(&self, order: &Order) -> AppResult<Order> {
        let mut orders = self.orders.write().await;
        if !orders.contains_key(&order.id) {
            return Err(AppError::not_found(format!(
                "Order {} not found",
                order.id
            )));
        }
        orders.insert(order.id, order.clone());
        Ok(order.clone())
    }

    async fn stats_by_owner(&self, owner_subject: &str) -> AppResult<Vec<StatusBucket>> {
        let orders = self.orders.read().await;
        let mut buckets: HashMap<OrderStatus, StatusBucket> = HashMap::new();
        for order in orders.values().filter(|o| o.owner_subject == owner_subject) {
            let bucket = buckets.entry(order.status).or_insert(StatusBucket {
                status: order.status,
                count: 0,
                total_cents: 0,
            });
            bucket.count += 1;
            bucket.total_cents += order.total_price_cents;
        }
        Ok(buckets.into_values().collect())
    }
}
