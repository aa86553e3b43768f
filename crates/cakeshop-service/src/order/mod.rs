//! Order validation and lifecycle.

pub mod service;
pub mod validation;

pub use service::OrderService;
pub use validation::{OrderInput, OrderUpdateInput};
