//! Order domain entities.

pub mod model;
pub mod slot;
pub mod status;

pub use model::{NewOrder, Order};
pub use slot::DeliverySlot;
pub use status::OrderStatus;
