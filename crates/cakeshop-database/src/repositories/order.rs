//! Order repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use cakeshop_core::error::{AppError, ErrorKind};
use cakeshop_core::result::AppResult;
use cakeshop_core::types::pagination::{PageRequest, PageResponse};
use cakeshop_entity::order::{Order, OrderStatus};

use crate::store::{OrderStore, StatusBucket};

/// PostgreSQL-backed order store.
#[derive(Debug, Clone)]
pub struct OrderRepository {
    pool: PgPool,
}

impl OrderRepository {
    /// Create a new order repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OrderStore for OrderRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Order>> {
        sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find order by id", e)
            })
    }

    async fn list_by_owner(
        &self,
        owner_subject: &str,
        status: Option<OrderStatus>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Order>> {
        let (total, orders) = match status {
            Some(status) => {
                let total: i64 = sqlx::query_scalar(
                    "SELECT COUNT(*) FROM orders WHERE owner_subject = $1 AND status = $2",
                )
                .bind(owner_subject)
                .bind(status)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to count orders", e)
                })?;

                let orders = sqlx::query_as::<_, Order>(
                    "SELECT * FROM orders WHERE owner_subject = $1 AND status = $2 \
                     ORDER BY created_at DESC LIMIT $3 OFFSET $4",
                )
                .bind(owner_subject)
                .bind(status)
                .bind(page.limit() as i64)
                .bind(page.offset() as i64)
                .fetch_all(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to list orders", e)
                })?;

                (total, orders)
            }
            None => {
                let total: i64 =
                    sqlx::query_scalar("SELECT COUNT(*) FROM orders WHERE owner_subject = $1")
                        .bind(owner_subject)
                        .fetch_one(&self.pool)
                        .await
                        .map_err(|e| {
                            AppError::with_source(ErrorKind::Database, "Failed to count orders", e)
                        })?;

                let orders = sqlx::query_as::<_, Order>(
                    "SELECT * FROM orders WHERE owner_subject = $1 \
                     ORDER BY created_at DESC LIMIT $2 OFFSET $3",
                )
                .bind(owner_subject)
                .bind(page.limit() as i64)
                .bind(page.offset() as i64)
                .fetch_all(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to list orders", e)
                })?;

                (total, orders)
            }
        };

        Ok(PageResponse::new(
            orders,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    async fn insert(&self, order: &Order) -> AppResult<Order> {
        sqlx::query_as::<_, Order>(
            "INSERT INTO orders (id, owner_subject, order_number, product_name, quantity, \
             unit_price_cents, total_price_cents, delivery_date, delivery_slot, \
             delivery_region, message, status, created_at, updated_at, shipped_at, \
             delivered_at, client_ip, user_agent) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, \
             $17, $18) RETURNING *",
        )
        .bind(order.id)
        .bind(&order.owner_subject)
        .bind(&order.order_number)
        .bind(&order.product_name)
        .bind(order.quantity)
        .bind(order.unit_price_cents)
        .bind(order.total_price_cents)
        .bind(order.delivery_date)
        .bind(order.delivery_slot)
        .bind(&order.delivery_region)
        .bind(&order.message)
        .bind(order.status)
        .bind(order.created_at)
        .bind(order.updated_at)
        .bind(order.shipped_at)
        .bind(order.delivered_at)
        .bind(&order.client_ip)
        .bind(&order.user_agent)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to insert order", e))
    }

    async fn update(&self, order: &Order) -> AppResult<Order> {
        // order_number, owner_subject, and created_at are immutable by design.
        sqlx::query_as::<_, Order>(
            "UPDATE orders SET quantity = $2, unit_price_cents = $3, total_price_cents = $4, \
             delivery_date = $5, delivery_slot = $6, delivery_region = $7, message = $8, \
             status = $9, updated_at = $10, shipped_at = $11, delivered_at = $12 \
             WHERE id = $1 RETURNING *",
        )
        .bind(order.id)
        .bind(order.quantity)
        .bind(order.unit_price_cents)
        .bind(order.total_price_cents)
        .bind(order.delivery_date)
        .bind(order.delivery_slot)
        .bind(&order.delivery_region)
        .bind(&order.message)
        .bind(order.status)
        .bind(order.updated_at)
        .bind(order.shipped_at)
        .bind(order.delivered_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update order", e))?
        .ok_or_else(|| AppError::not_found(format!("Order {} not found", order.id)))
    }

    async fn stats_by_owner(&self, owner_subject: &str) -> AppResult<Vec<StatusBucket>> {
        sqlx::query_as::<_, StatusBucket>(
            "SELECT status, COUNT(*) AS count, \
             CAST(COALESCE(SUM(total_price_cents), 0) AS BIGINT) AS total_cents \
             FROM orders WHERE owner_subject = $1 GROUP BY status",
        )
        .bind(owner_subject)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to aggregate orders", e))
    }
}
