//! Order lifecycle operations.

use std::str::FromStr;
use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use cakeshop_core::error::AppError;
use cakeshop_core::result::AppResult;
use cakeshop_core::types::pagination::{PageRequest, PageResponse};
use cakeshop_database::store::{OrderStore, StatusBucket};
use cakeshop_entity::order::{NewOrder, Order, OrderStatus};

use crate::context::RequestContext;

use super::validation::{self, OrderInput, OrderUpdateInput};

/// Order business logic over an injected store.
#[derive(Clone)]
pub struct OrderService {
    orders: Arc<dyn OrderStore>,
}

impl OrderService {
    pub fn new(orders: Arc<dyn OrderStore>) -> Self {
        Self { orders }
    }

    /// Place a new order for the caller.
    ///
    /// All fields are validated together, the unit price comes from the
    /// catalog, and the order starts out `pending` with a generated
    /// order number.
    pub async fn create(&self, ctx: &RequestContext, input: OrderInput) -> AppResult<Order> {
        let today = ctx.request_time.date_naive();
        let valid = validation::validate_order(&input, today)?;

        let order = Order::create(NewOrder {
            owner_subject: ctx.subject.clone(),
            product_name: valid.product.name.to_string(),
            quantity: valid.quantity,
            unit_price_cents: valid.product.price_cents,
            delivery_date: valid.delivery_date,
            delivery_slot: valid.delivery_slot,
            delivery_region: valid.delivery_region,
            message: valid.message,
            client_ip: Some(ctx.ip_address.clone()),
            user_agent: ctx.user_agent.clone(),
        });

        let saved = self.orders.insert(&order).await?;
        info!(
            order_number = %saved.order_number,
            product = %saved.product_name,
            total_cents = saved.total_price_cents,
            "Order placed"
        );
        Ok(saved)
    }

    /// Fetch one of the caller's orders.
    pub async fn get(&self, ctx: &RequestContext, id: Uuid) -> AppResult<Order> {
        self.load_owned(ctx, id).await
    }

    /// Modify an editable order. The product cannot change; place a new
    /// order instead. The total is recomputed from the stored unit price.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        input: OrderUpdateInput,
    ) -> AppResult<Order> {
        let mut order = self.load_owned(ctx, id).await?;

        if !order.status.is_editable() {
            return Err(AppError::conflict(format!(
                "Orders in status '{}' cannot be modified",
                order.status
            )));
        }

        let today = ctx.request_time.date_naive();
        let update = validation::validate_order_update(&input, today)?;

        if let Some(quantity) = update.quantity {
            order.quantity = quantity;
        }
        if let Some(date) = update.delivery_date {
            order.delivery_date = date;
        }
        if let Some(slot) = update.delivery_slot {
            order.delivery_slot = slot;
        }
        if let Some(region) = update.delivery_region {
            order.delivery_region = region;
        }
        if let Some(message) = update.message {
            order.message = message;
        }

        order.recompute_total();
        order.updated_at = Utc::now();

        self.orders.update(&order).await
    }

    /// Cancel an order that has not shipped yet.
    pub async fn cancel(&self, ctx: &RequestContext, id: Uuid) -> AppResult<Order> {
        let mut order = self.load_owned(ctx, id).await?;

        if !order.status.is_cancellable() {
            return Err(AppError::conflict(format!(
                "Orders in status '{}' cannot be cancelled",
                order.status
            )));
        }

        order.status = OrderStatus::Cancelled;
        order.updated_at = Utc::now();

        let saved = self.orders.update(&order).await?;
        info!(order_number = %saved.order_number, "Order cancelled");
        Ok(saved)
    }

    /// List the caller's orders, newest first, optionally filtered by
    /// status.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        status: Option<&str>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Order>> {
        let status = status
            .map(OrderStatus::from_str)
            .transpose()?;
        self.orders.list_by_owner(&ctx.subject, status, page).await
    }

    /// Per-status aggregates over the caller's orders.
    pub async fn stats(&self, ctx: &RequestContext) -> AppResult<Vec<StatusBucket>> {
        self.orders.stats_by_owner(&ctx.subject).await
    }

    /// Load an order, returning `NotFound` before the ownership check so
    /// missing and foreign orders are distinguishable to their owner only.
    async fn load_owned(&self, ctx: &RequestContext, id: Uuid) -> AppResult<Order> {
        let order = self
            .orders
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Order not found"))?;
        ctx.ensure_owner(&order.owner_subject)?;
        Ok(order)
    }
}
