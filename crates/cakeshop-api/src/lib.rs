//! # cakeshop-api
//!
//! The HTTP surface: route definitions, request/response DTOs, the
//! authenticated-user extractor, and the hardening middleware stack
//! (sanitization, rate limiting, security headers, CORS).

pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use router::build_router;
pub use state::AppState;
