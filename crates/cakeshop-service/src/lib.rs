//! # cakeshop-service
//!
//! Business logic: the authenticated request context and ownership
//! guard, input sanitization primitives, the order validator and
//! lifecycle rules, profile sync, and catalog queries.

pub mod context;
pub mod order;
pub mod product;
pub mod sanitize;
pub mod user;

pub use context::RequestContext;
