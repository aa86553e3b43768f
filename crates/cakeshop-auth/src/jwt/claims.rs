//! Claims carried by provider-issued access tokens.

use serde::{Deserialize, Serialize};

/// Decoded identity claims from a verified access token.
///
/// `iss` and `aud` are checked during validation and not retained;
/// unknown claims are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject — the provider-scoped user id (e.g. `auth0|abc123`).
    pub sub: String,
    /// Email address, when the token includes it.
    #[serde(default)]
    pub email: Option<String>,
    /// Full name, when the token includes it.
    #[serde(default)]
    pub name: Option<String>,
    /// Granted permissions.
    #[serde(default)]
    pub permissions: Vec<String>,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
    /// Issued-at timestamp (seconds since epoch).
    #[serde(default)]
    pub iat: Option<i64>,
}

impl Claims {
    /// Whether the token grants the given permission.
    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions.iter().any(|p| p == permission)
    }
}
