//! Product catalog entities.

pub mod catalog;
pub mod delivery;
pub mod model;

pub use model::Product;
