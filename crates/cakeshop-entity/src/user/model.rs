//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A customer profile synced from the external identity provider.
///
/// The provider owns authentication; this record only mirrors identity
/// data and holds shop-specific profile fields. Profiles are
/// soft-deactivated via `is_active`, never hard-deleted.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// External-provider subject id (e.g. `auth0|abc123`), unique.
    pub subject: String,
    /// Email address, unique.
    pub email: String,
    /// Human-readable display name (letters and spaces only).
    pub display_name: Option<String>,
    /// Unique login name (alphanumeric + underscore, 3-30 chars).
    pub username: String,
    /// Contact phone number.
    pub contact_number: Option<String>,
    /// Country of residence.
    pub country: Option<String>,
    /// Whether the user wants email notifications.
    pub notify_email: bool,
    /// Whether the user subscribed to the newsletter.
    pub newsletter: bool,
    /// Soft-deactivation flag.
    pub is_active: bool,
    /// Last successful identity sync / login time.
    pub last_login_at: Option<DateTime<Utc>>,
    /// Number of consecutive failed login attempts (provider-reported).
    pub failed_login_attempts: i32,
    /// Account locked until this time (if locked).
    pub locked_until: Option<DateTime<Utc>>,
    /// When the profile was first synced.
    pub created_at: DateTime<Utc>,
    /// When the profile was last updated.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Build a fresh profile for a subject seen for the first time.
    pub fn new(subject: String, email: String, username: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            subject,
            email,
            display_name: None,
            username,
            contact_number: None,
            country: None,
            notify_email: true,
            newsletter: false,
            is_active: true,
            last_login_at: Some(now),
            failed_login_attempts: 0,
            locked_until: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check if the account is currently locked.
    pub fn is_locked(&self) -> bool {
        if let Some(locked_until) = self.locked_until {
            return Utc::now() < locked_until;
        }
        false
    }
}
