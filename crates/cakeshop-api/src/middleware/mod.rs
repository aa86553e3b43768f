//! Request-hardening middleware: sanitization, rate limiting, security
//! headers, and CORS.

pub mod cors;
pub mod rate_limit;
pub mod sanitize;
pub mod security_headers;
