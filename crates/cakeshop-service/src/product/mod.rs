//! Catalog queries.

pub mod service;

pub use service::ProductService;
