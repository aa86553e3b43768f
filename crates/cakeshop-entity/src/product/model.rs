//! Product entity model.

use serde::Serialize;

/// A catalog product.
///
/// The catalog is a fixed in-memory list; products are identified by a
/// stable slug rather than a database id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Product {
    /// Stable slug identifier, e.g. `classic-chocolate`.
    pub id: &'static str,
    /// Display name. Orders reference products by this name.
    pub name: &'static str,
    /// Category slug.
    pub category: &'static str,
    /// Unit price in cents.
    pub price_cents: i64,
    /// Short description.
    pub description: &'static str,
}
