//! Request DTOs.
//!
//! Order payloads are deliberately loose here (dates and slots arrive
//! as strings) so the service-layer validator can report every bad
//! field in one response instead of failing at deserialization.

use serde::Deserialize;
use validator::Validate;

use cakeshop_core::error::AppError;
use cakeshop_core::types::pagination::PageRequest;
use cakeshop_service::order::{OrderInput, OrderUpdateInput};
use cakeshop_service::user::ProfileUpdate;

/// Common pagination query parameters.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<u64>,
    pub page_size: Option<u64>,
}

impl PageParams {
    /// Convert to a clamped [`PageRequest`].
    pub fn page_request(&self) -> PageRequest {
        let defaults = PageRequest::default();
        PageRequest::new(
            self.page.unwrap_or(defaults.page),
            self.page_size.unwrap_or(defaults.page_size),
        )
    }
}

/// Query parameters for `GET /products`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductQuery {
    /// Filter by category slug.
    pub category: Option<String>,
    /// Case-insensitive search over name and description.
    pub search: Option<String>,
    pub page: Option<u64>,
    pub page_size: Option<u64>,
}

impl ProductQuery {
    pub fn page_request(&self) -> PageRequest {
        PageParams {
            page: self.page,
            page_size: self.page_size,
        }
        .page_request()
    }
}

/// Query parameters for `GET /orders`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderListQuery {
    /// Filter by lifecycle status.
    pub status: Option<String>,
    pub page: Option<u64>,
    pub page_size: Option<u64>,
}

impl OrderListQuery {
    pub fn page_request(&self) -> PageRequest {
        PageParams {
            page: self.page,
            page_size: self.page_size,
        }
        .page_request()
    }
}

/// Body for `POST /orders`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateOrderRequest {
    pub product_name: String,
    pub quantity: i32,
    /// `YYYY-MM-DD`.
    pub delivery_date: String,
    pub delivery_slot: String,
    pub delivery_region: String,
    pub message: Option<String>,
}

impl From<CreateOrderRequest> for OrderInput {
    fn from(req: CreateOrderRequest) -> Self {
        Self {
            product_name: req.product_name,
            quantity: req.quantity,
            delivery_date: req.delivery_date,
            delivery_slot: req.delivery_slot,
            delivery_region: req.delivery_region,
            message: req.message,
        }
    }
}

/// Body for `PUT /orders/{id}`. Absent fields are left unchanged; a
/// blank `message` clears the stored one.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateOrderRequest {
    pub quantity: Option<i32>,
    pub delivery_date: Option<String>,
    pub delivery_slot: Option<String>,
    pub delivery_region: Option<String>,
    pub message: Option<String>,
}

impl From<UpdateOrderRequest> for OrderUpdateInput {
    fn from(req: UpdateOrderRequest) -> Self {
        Self {
            quantity: req.quantity,
            delivery_date: req.delivery_date,
            delivery_slot: req.delivery_slot,
            delivery_region: req.delivery_region,
            message: req.message,
        }
    }
}

/// Body for `PUT /auth/profile`.
///
/// Transport-level bounds only; domain rules (character classes,
/// uniqueness) live in the service layer.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 3, max = 30))]
    pub username: Option<String>,
    #[validate(length(max = 100))]
    pub display_name: Option<String>,
    #[validate(length(max = 20))]
    pub contact_number: Option<String>,
    #[validate(length(max = 56))]
    pub country: Option<String>,
    pub notify_email: Option<bool>,
    pub newsletter: Option<bool>,
}

impl From<UpdateProfileRequest> for ProfileUpdate {
    fn from(req: UpdateProfileRequest) -> Self {
        Self {
            username: req.username,
            display_name: req.display_name,
            contact_number: req.contact_number,
            country: req.country,
            notify_email: req.notify_email,
            newsletter: req.newsletter,
        }
    }
}

/// Flatten `validator` errors into the shared violation-list shape.
pub fn map_validation_errors(errors: validator::ValidationErrors) -> AppError {
    let violations: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(msg) => format!("{field}: {msg}"),
                None => format!("{field}: invalid value ({})", e.code),
            })
        })
        .collect();
    AppError::validation_failed(violations)
}
