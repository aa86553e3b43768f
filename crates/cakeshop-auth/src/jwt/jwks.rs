//! JWKS (JSON Web Key Set) retrieval and parsing.

use jsonwebtoken::DecodingKey;
use serde::Deserialize;

use cakeshop_core::error::AppError;
use cakeshop_core::result::AppResult;

/// A published key set, as served by
/// `https://{domain}/.well-known/jwks.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct JwkSet {
    /// The keys in the set.
    pub keys: Vec<Jwk>,
}

/// A single published key. Only RSA signing keys are used.
#[derive(Debug, Clone, Deserialize)]
pub struct Jwk {
    /// Key id, matched against the `kid` token header.
    #[serde(default)]
    pub kid: Option<String>,
    /// Key type; anything other than `RSA` is skipped.
    pub kty: String,
    /// Intended algorithm.
    #[serde(default)]
    pub alg: Option<String>,
    /// Intended use; anything other than `sig` is skipped.
    #[serde(rename = "use", default)]
    pub use_: Option<String>,
    /// RSA modulus (base64url).
    #[serde(default)]
    pub n: Option<String>,
    /// RSA public exponent (base64url).
    #[serde(default)]
    pub e: Option<String>,
}

impl Jwk {
    /// Whether this entry is an RSA signing key.
    pub fn is_signing_key(&self) -> bool {
        self.kty == "RSA" && self.use_.as_deref().unwrap_or("sig") == "sig"
    }

    /// Build a decoding key from the RSA components.
    pub fn decoding_key(&self) -> AppResult<DecodingKey> {
        let n = self
            .n
            .as_deref()
            .ok_or_else(|| AppError::external_service("JWK missing RSA modulus"))?;
        let e = self
            .e
            .as_deref()
            .ok_or_else(|| AppError::external_service("JWK missing RSA exponent"))?;
        DecodingKey::from_rsa_components(n, e)
            .map_err(|e| AppError::with_source(
                cakeshop_core::error::ErrorKind::ExternalService,
                "Invalid RSA key in JWKS",
                e,
            ))
    }
}

/// Fetch the key set from the provider.
///
/// The client carries the configured timeout, so this call is bounded.
pub async fn fetch(client: &reqwest::Client, url: &str) -> AppResult<JwkSet> {
    let response = client.get(url).send().await.map_err(|e| {
        AppError::with_source(
            cakeshop_core::error::ErrorKind::ExternalService,
            format!("JWKS fetch failed: {e}"),
            e,
        )
    })?;

    if !response.status().is_success() {
        return Err(AppError::external_service(format!(
            "JWKS endpoint returned {}",
            response.status()
        )));
    }

    response.json::<JwkSet>().await.map_err(|e| {
        AppError::with_source(
            cakeshop_core::error::ErrorKind::ExternalService,
            format!("Invalid JWKS payload: {e}"),
            e,
        )
    })
}
