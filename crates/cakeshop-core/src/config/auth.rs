//! Identity-provider verification configuration.

use serde::{Deserialize, Serialize};

/// Settings for verifying bearer tokens issued by the external
/// identity provider (Auth0-style OIDC tenant).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Provider tenant domain, e.g. `cakeshop.eu.auth0.com`.
    ///
    /// The JWKS URL and expected issuer are derived from this value.
    #[serde(default = "default_domain")]
    pub domain: String,
    /// Expected `aud` claim of incoming access tokens.
    #[serde(default = "default_audience")]
    pub audience: String,
    /// How long a fetched key set is considered fresh, in seconds.
    ///
    /// After the TTL elapses the key set is refetched on the next lookup;
    /// a stale set is still served when the refetch fails.
    #[serde(default = "default_jwks_ttl")]
    pub jwks_ttl_seconds: u64,
    /// Timeout for a single JWKS fetch, in seconds.
    #[serde(default = "default_jwks_timeout")]
    pub jwks_fetch_timeout_seconds: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            domain: default_domain(),
            audience: default_audience(),
            jwks_ttl_seconds: default_jwks_ttl(),
            jwks_fetch_timeout_seconds: default_jwks_timeout(),
        }
    }
}

impl AuthConfig {
    /// The JWKS endpoint URL for the configured tenant.
    pub fn jwks_url(&self) -> String {
        format!("https://{}/.well-known/jwks.json", self.domain)
    }

    /// The expected `iss` claim for the configured tenant.
    pub fn issuer(&self) -> String {
        format!("https://{}/", self.domain)
    }
}

fn default_domain() -> String {
    "cakeshop.example.auth0.com".to_string()
}

fn default_audience() -> String {
    "https://api.cakeshop.example".to_string()
}

fn default_jwks_ttl() -> u64 {
    3600
}

fn default_jwks_timeout() -> u64 {
    5
}
