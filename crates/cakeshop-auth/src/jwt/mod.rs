//! JWT verification against the provider's published key set.

pub mod claims;
pub mod jwks;
pub mod verifier;
