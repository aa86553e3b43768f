//! Order field validation.
//!
//! All checks are pure functions over their inputs (the reference date
//! is a parameter, not a clock read) and every violation is collected,
//! so one response names everything wrong with the request.

use chrono::{Datelike, NaiveDate};

use cakeshop_core::error::AppError;
use cakeshop_core::result::AppResult;
use cakeshop_entity::order::DeliverySlot;
use cakeshop_entity::product::{self, Product, catalog};

use crate::sanitize::contains_script_pattern;

/// Maximum units of one product per order.
pub const MAX_QUANTITY: i32 = 10;
/// Maximum length of the optional order message.
pub const MAX_MESSAGE_LEN: usize = 500;

/// Raw create-order fields, as received from the API layer.
#[derive(Debug, Clone)]
pub struct OrderInput {
    pub product_name: String,
    pub quantity: i32,
    /// ISO date string (`YYYY-MM-DD`); parsed during validation so a
    /// bad date is reported alongside other violations.
    pub delivery_date: String,
    pub delivery_slot: String,
    pub delivery_region: String,
    pub message: Option<String>,
}

/// Raw update-order fields. Absent fields are left unchanged; a
/// provided blank message clears the stored one.
#[derive(Debug, Clone, Default)]
pub struct OrderUpdateInput {
    pub quantity: Option<i32>,
    pub delivery_date: Option<String>,
    pub delivery_slot: Option<String>,
    pub delivery_region: Option<String>,
    pub message: Option<String>,
}

/// Fully validated create-order fields.
#[derive(Debug, Clone)]
pub struct ValidOrder {
    pub product: &'static Product,
    pub quantity: i32,
    pub delivery_date: NaiveDate,
    pub delivery_slot: DeliverySlot,
    pub delivery_region: String,
    pub message: Option<String>,
}

/// Validated update fields; `None` means "keep the current value".
#[derive(Debug, Clone, Default)]
pub struct ValidOrderUpdate {
    pub quantity: Option<i32>,
    pub delivery_date: Option<NaiveDate>,
    pub delivery_slot: Option<DeliverySlot>,
    pub delivery_region: Option<String>,
    /// `Some(None)` clears the message (the caller sent a blank one).
    pub message: Option<Option<String>>,
}

/// Validate all fields of a new order against `today`.
pub fn validate_order(input: &OrderInput, today: NaiveDate) -> AppResult<ValidOrder> {
    let mut violations = Vec::new();

    let product = check_product(&input.product_name).map_err(|v| violations.push(v)).ok();
    let quantity = check_quantity(input.quantity).map_err(|v| violations.push(v)).ok();
    let date = check_delivery_date(&input.delivery_date, today)
        .map_err(|v| violations.push(v))
        .ok();
    let slot = check_slot(&input.delivery_slot).map_err(|v| violations.push(v)).ok();
    let region = check_region(&input.delivery_region).map_err(|v| violations.push(v)).ok();
    let message = check_message(input.message.as_deref())
        .map_err(|v| violations.push(v))
        .ok();

    if !violations.is_empty() {
        return Err(AppError::validation_failed(violations));
    }

    // All fields are Some once violations is empty.
    let (
        Some(product),
        Some(quantity),
        Some(delivery_date),
        Some(delivery_slot),
        Some(delivery_region),
        Some(message),
    ) = (product, quantity, date, slot, region, message)
    else {
        return Err(AppError::internal("Order validation lost a field"));
    };

    Ok(ValidOrder {
        product,
        quantity,
        delivery_date,
        delivery_slot,
        delivery_region,
        message,
    })
}

/// Validate the provided subset of fields for an order update.
pub fn validate_order_update(
    input: &OrderUpdateInput,
    today: NaiveDate,
) -> AppResult<ValidOrderUpdate> {
    let mut violations = Vec::new();
    let mut update = ValidOrderUpdate::default();

    if let Some(quantity) = input.quantity {
        match check_quantity(quantity) {
            Ok(q) => update.quantity = Some(q),
            Err(v) => violations.push(v),
        }
    }
    if let Some(date) = input.delivery_date.as_deref() {
        match check_delivery_date(date, today) {
            Ok(d) => update.delivery_date = Some(d),
            Err(v) => violations.push(v),
        }
    }
    if let Some(slot) = input.delivery_slot.as_deref() {
        match check_slot(slot) {
            Ok(s) => update.delivery_slot = Some(s),
            Err(v) => violations.push(v),
        }
    }
    if let Some(region) = input.delivery_region.as_deref() {
        match check_region(region) {
            Ok(r) => update.delivery_region = Some(r),
            Err(v) => violations.push(v),
        }
    }
    if let Some(message) = input.message.as_deref() {
        match check_message(Some(message)) {
            Ok(m) => update.message = Some(m),
            Err(v) => violations.push(v),
        }
    }

    if violations.is_empty() {
        Ok(update)
    } else {
        Err(AppError::validation_failed(violations))
    }
}

/// Resolve a product name against the fixed catalog.
pub fn check_product(name: &str) -> Result<&'static Product, String> {
    catalog::find_by_name(name)
        .ok_or_else(|| format!("Unknown product: {name}"))
}

/// Quantity must be between 1 and [`MAX_QUANTITY`].
pub fn check_quantity(quantity: i32) -> Result<i32, String> {
    if (1..=MAX_QUANTITY).contains(&quantity) {
        Ok(quantity)
    } else {
        Err(format!("Quantity must be between 1 and {MAX_QUANTITY}"))
    }
}

/// Delivery date must parse, be today or later, and avoid the excluded
/// weekday.
pub fn check_delivery_date(raw: &str, today: NaiveDate) -> Result<NaiveDate, String> {
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| format!("Invalid delivery date: {raw} (expected YYYY-MM-DD)"))?;
    if date < today {
        return Err("Delivery date cannot be in the past".to_string());
    }
    if date.weekday() == product::delivery::EXCLUDED_WEEKDAY {
        return Err("No deliveries on Sunday".to_string());
    }
    Ok(date)
}

/// Delivery slot must be one of the offered windows.
pub fn check_slot(raw: &str) -> Result<DeliverySlot, String> {
    raw.parse::<DeliverySlot>()
        .map_err(|_| format!("Invalid delivery slot: {raw}"))
}

/// Delivery region must be one the shop serves. Case-sensitive.
pub fn check_region(raw: &str) -> Result<String, String> {
    if product::delivery::is_valid_region(raw) {
        Ok(raw.to_string())
    } else {
        Err(format!("We do not deliver to: {raw}"))
    }
}

/// Message is optional; when present it must fit the length limit and
/// carry no script-injection patterns, escaped or not. An empty or
/// whitespace-only message is treated as absent.
pub fn check_message(message: Option<&str>) -> Result<Option<String>, String> {
    let Some(message) = message else {
        return Ok(None);
    };
    let trimmed = message.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    if trimmed.chars().count() > MAX_MESSAGE_LEN {
        return Err(format!("Message must be at most {MAX_MESSAGE_LEN} characters"));
    }
    if contains_script_pattern(trimmed) {
        return Err("Message contains disallowed content".to_string());
    }
    Ok(Some(trimmed.to_string()))
}
