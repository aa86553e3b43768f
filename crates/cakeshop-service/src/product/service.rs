//! Catalog queries over the static product table.
//!
//! The catalog is compiled in, so everything here is synchronous and
//! infallible except for id lookups.

use cakeshop_core::error::AppError;
use cakeshop_core::result::AppResult;
use cakeshop_core::types::pagination::{PageRequest, PageResponse};
use cakeshop_entity::product::{Product, catalog};
use cakeshop_entity::product::delivery::DeliveryConfig;

/// Catalog business logic.
#[derive(Debug, Clone, Default)]
pub struct ProductService;

impl ProductService {
    pub fn new() -> Self {
        Self
    }

    /// List products, optionally filtered by category and/or a
    /// case-insensitive search term over name and description.
    pub fn list(
        &self,
        category: Option<&str>,
        search: Option<&str>,
        page: &PageRequest,
    ) -> PageResponse<Product> {
        let term = search.map(str::to_lowercase);
        let matching: Vec<Product> = catalog::CATALOG
            .iter()
            .filter(|p| category.is_none_or(|c| p.category.eq_ignore_ascii_case(c)))
            .filter(|p| {
                term.as_deref().is_none_or(|t| {
                    p.name.to_lowercase().contains(t)
                        || p.description.to_lowercase().contains(t)
                })
            })
            .copied()
            .collect();

        let total = matching.len() as u64;
        let items: Vec<Product> = matching
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .collect();
        PageResponse::new(items, page.page, page.page_size, total)
    }

    /// Fetch one product by its slug id.
    pub fn get(&self, id: &str) -> AppResult<Product> {
        catalog::find_by_id(id)
            .copied()
            .ok_or_else(|| AppError::not_found(format!("Product not found: {id}")))
    }

    /// Distinct category slugs.
    pub fn categories(&self) -> Vec<&'static str> {
        catalog::categories()
    }

    /// Current delivery regions, slots, and the excluded weekday.
    pub fn delivery_config(&self) -> DeliveryConfig {
        DeliveryConfig::current()
    }
}
