//! # cakeshop-auth
//!
//! Verification of bearer tokens issued by the external identity
//! provider: JWKS retrieval with a TTL cache and stale fallback, and
//! RS256 signature/issuer/audience validation.

pub mod jwt;

pub use jwt::claims::Claims;
pub use jwt::verifier::TokenVerifier;
