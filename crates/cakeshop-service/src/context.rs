//! Authenticated request context.

use chrono::{DateTime, Utc};

use cakeshop_core::error::AppError;
use cakeshop_core::result::AppResult;

/// Identity and request metadata for one authenticated request.
///
/// Built by the API layer from verified token claims plus connection
/// details, and passed into every service call so ownership checks and
/// audit fields never depend on raw headers.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Provider subject id of the caller.
    pub subject: String,
    /// Email claim, when the token carried one.
    pub email: Option<String>,
    /// Name claim, when the token carried one.
    pub name: Option<String>,
    /// Permissions granted by the token.
    pub permissions: Vec<String>,
    /// Client IP as seen by the server (or forwarded header).
    pub ip_address: String,
    /// Client User-Agent, if sent.
    pub user_agent: Option<String>,
    /// When the request arrived.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Fail with `Forbidden` unless the caller owns the resource.
    ///
    /// Ownership is checked after existence, so callers see `NotFound`
    /// for missing resources and `Forbidden` only for real ones they
    /// cannot touch.
    pub fn ensure_owner(&self, owner_subject: &str) -> AppResult<()> {
        if self.subject == owner_subject {
            Ok(())
        } else {
            Err(AppError::forbidden("You do not have access to this resource"))
        }
    }
}
