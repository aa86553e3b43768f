//! # cakeshop-entity
//!
//! Domain entities for CakeShop: user profiles, orders with their status
//! machine, the static product catalog, and delivery configuration.

pub mod order;
pub mod product;
pub mod user;
