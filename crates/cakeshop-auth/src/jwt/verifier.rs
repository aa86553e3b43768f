//! Token verification with a cached provider key set.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode, decode_header};
use tokio::sync::RwLock;
use tracing::{debug, warn};

use cakeshop_core::config::auth::AuthConfig;
use cakeshop_core::error::AppError;
use cakeshop_core::result::AppResult;

use super::claims::Claims;
use super::jwks;

/// Cached decoding keys, keyed by `kid`.
#[derive(Default)]
struct KeyCache {
    keys: HashMap<String, DecodingKey>,
    /// When the set was last fetched. `None` until the first fetch.
    fetched_at: Option<Instant>,
}

/// Verifies bearer tokens against the provider's published key set.
///
/// Keys are fetched lazily and cached for the configured TTL; when a
/// refetch fails the stale set keeps serving, so a provider outage does
/// not take down request authentication for already-known keys.
pub struct TokenVerifier {
    http: reqwest::Client,
    /// JWKS endpoint. `None` for verifiers built from a preloaded set.
    jwks_url: Option<String>,
    validation: Validation,
    ttl: Duration,
    cache: RwLock<KeyCache>,
}

impl std::fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenVerifier")
            .field("jwks_url", &self.jwks_url)
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl TokenVerifier {
    /// Create a verifier that fetches keys from the configured tenant.
    pub fn new(config: &AuthConfig) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.jwks_fetch_timeout_seconds))
            .build()
            .map_err(|e| {
                AppError::with_source(
                    cakeshop_core::error::ErrorKind::Configuration,
                    "Failed to build JWKS HTTP client",
                    e,
                )
            })?;

        Ok(Self {
            http,
            jwks_url: Some(config.jwks_url()),
            validation: Self::build_validation(config),
            ttl: Duration::from_secs(config.jwks_ttl_seconds),
            cache: RwLock::new(KeyCache::default()),
        })
    }

    /// Create a verifier from a preloaded key map that never fetches.
    ///
    /// Used for offline deployments and tests.
    pub fn with_key_set(config: &AuthConfig, keys: HashMap<String, DecodingKey>) -> Self {
        Self {
            http: reqwest::Client::new(),
            jwks_url: None,
            validation: Self::build_validation(config),
            ttl: Duration::from_secs(config.jwks_ttl_seconds),
            cache: RwLock::new(KeyCache {
                keys,
                fetched_at: Some(Instant::now()),
            }),
        }
    }

    fn build_validation(config: &AuthConfig) -> Validation {
        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_audience(&[&config.audience]);
        validation.set_issuer(&[&config.issuer()]);
        validation.validate_exp = true;
        validation
    }

    /// Verify a bearer token and return its claims.
    ///
    /// Fails with `Unauthenticated` when the token is malformed, signed
    /// with an unknown key, expired, or carries the wrong issuer or
    /// audience.
    pub async fn verify(&self, token: &str) -> AppResult<Claims> {
        let header = decode_header(token)
            .map_err(|_| AppError::unauthenticated("Malformed token"))?;

        let kid = header
            .kid
            .ok_or_else(|| AppError::unauthenticated("Token header missing key id"))?;

        let key = self.key_for(&kid).await?;

        let data = decode::<Claims>(token, &key, &self.validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    AppError::unauthenticated("Token has expired")
                }
                jsonwebtoken::errors::ErrorKind::InvalidIssuer => {
                    AppError::unauthenticated("Invalid token issuer")
                }
                jsonwebtoken::errors::ErrorKind::InvalidAudience => {
                    AppError::unauthenticated("Invalid token audience")
                }
                jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                    AppError::unauthenticated("Invalid token signature")
                }
                _ => AppError::unauthenticated(format!("Token validation failed: {e}")),
            }
        })?;

        Ok(data.claims)
    }

    /// Look up the decoding key for a `kid`, refetching the key set when
    /// it is stale or the key is unknown.
    async fn key_for(&self, kid: &str) -> AppResult<DecodingKey> {
        {
            let cache = self.cache.read().await;
            let fresh = cache.fetched_at.is_some_and(|at| at.elapsed() < self.ttl);
            if fresh || self.jwks_url.is_none() {
                if let Some(key) = cache.keys.get(kid) {
                    return Ok(key.clone());
                }
                if self.jwks_url.is_none() {
                    return Err(AppError::unauthenticated("Token signed with unknown key"));
                }
                // Fresh set without this kid: fall through and refetch,
                // the provider may have rotated keys.
            }
        }

        if let Err(e) = self.refresh_keys().await {
            // Transient provider failure: keep serving the stale set.
            warn!(error = %e, "JWKS refresh failed, serving cached key set");
        }

        let cache = self.cache.read().await;
        cache
            .keys
            .get(kid)
            .cloned()
            .ok_or_else(|| AppError::unauthenticated("Token signed with unknown key"))
    }

    /// Fetch the key set and replace the cache contents.
    async fn refresh_keys(&self) -> AppResult<()> {
        let url = self
            .jwks_url
            .as_deref()
            .ok_or_else(|| AppError::internal("Verifier has no JWKS endpoint"))?;

        let set = jwks::fetch(&self.http, url).await?;

        let mut keys = HashMap::new();
        for jwk in set.keys.iter().filter(|k| k.is_signing_key()) {
            let Some(kid) = jwk.kid.clone() else { continue };
            match jwk.decoding_key() {
                Ok(key) => {
                    keys.insert(kid, key);
                }
                Err(e) => warn!(kid = %kid, error = %e, "Skipping unusable JWK"),
            }
        }

        debug!(count = keys.len(), "Refreshed provider key set");

        let mut cache = self.cache.write().await;
        cache.keys = keys;
        cache.fetched_at = Some(Instant::now());
        Ok(())
    }
}
