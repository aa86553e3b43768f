//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use cakeshop_auth::jwt::verifier::TokenVerifier;
use cakeshop_core::config::AppConfig;
use cakeshop_database::store::{OrderStore, UserStore};
use cakeshop_service::order::OrderService;
use cakeshop_service::product::ProductService;
use cakeshop_service::user::UserService;

use crate::middleware::rate_limit::RateLimiter;

/// Application state, cloned into every handler via `State<AppState>`.
///
/// All fields are `Arc`-wrapped (or cheaply cloneable) so cloning the
/// state is cheap.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Token verifier backed by the provider's key set.
    pub verifier: Arc<TokenVerifier>,
    /// Profile sync and updates.
    pub user_service: UserService,
    /// Order lifecycle.
    pub order_service: OrderService,
    /// Catalog queries.
    pub product_service: ProductService,
    /// Sliding-window limiter applied to all routes.
    pub general_limiter: Arc<RateLimiter>,
    /// Stricter limiter applied to `/auth/*` routes.
    pub auth_limiter: Arc<RateLimiter>,
}

impl AppState {
    /// Wire up services and limiters from their dependencies.
    pub fn new(
        config: Arc<AppConfig>,
        users: Arc<dyn UserStore>,
        orders: Arc<dyn OrderStore>,
        verifier: Arc<TokenVerifier>,
    ) -> Self {
        let general_limiter = Arc::new(RateLimiter::new(&config.rate_limit.general));
        let auth_limiter = Arc::new(RateLimiter::new(&config.rate_limit.auth));
        Self {
            config,
            verifier,
            user_service: UserService::new(users),
            order_service: OrderService::new(orders),
            product_service: ProductService::new(),
            general_limiter,
            auth_limiter,
        }
    }
}
