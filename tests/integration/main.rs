//! Integration tests: the full router with in-memory stores and a
//! preloaded verification key, driven through `tower::ServiceExt`.

mod helpers;

mod auth_flow_test;
mod order_test;
mod product_test;
mod rate_limit_test;
mod sanitize_test;
