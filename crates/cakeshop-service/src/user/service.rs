//! Profile sync and updates.
//!
//! The identity provider owns authentication; this service mirrors the
//! verified identity into a local profile on first sight and lets users
//! maintain their shop-specific fields afterwards.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use cakeshop_core::error::AppError;
use cakeshop_core::result::AppResult;
use cakeshop_database::store::UserStore;
use cakeshop_entity::user::User;

use crate::context::RequestContext;

use super::validation;

/// Optional profile fields a user may change.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub username: Option<String>,
    pub display_name: Option<String>,
    pub contact_number: Option<String>,
    pub country: Option<String>,
    pub notify_email: Option<bool>,
    pub newsletter: Option<bool>,
}

/// Profile business logic over an injected store.
#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserStore>,
}

impl UserService {
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self { users }
    }

    /// Sync the verified identity into a local profile.
    ///
    /// Creates the profile on first sight (deriving a username from the
    /// email's local part, with a random suffix on collision) and stamps
    /// `last_login_at` on every sync. Deactivated profiles are refused.
    pub async fn sync_profile(&self, ctx: &RequestContext) -> AppResult<User> {
        if let Some(mut user) = self.users.find_by_subject(&ctx.subject).await? {
            if !user.is_active {
                return Err(AppError::forbidden("Account is deactivated"));
            }
            let now = Utc::now();
            user.last_login_at = Some(now);
            user.updated_at = now;
            return self.users.update(&user).await;
        }

        let email = ctx
            .email
            .clone()
            .ok_or_else(|| AppError::validation("Token carries no email claim"))?;
        validation::check_email(&email).map_err(AppError::validation)?;

        let username = self.available_username(&email).await?;
        let mut user = User::new(ctx.subject.clone(), email, username);

        // Keep the provider-supplied name only when it fits our rules.
        if let Some(name) = ctx.name.as_deref() {
            if validation::check_display_name(name).is_ok() {
                user.display_name = Some(name.trim().to_string());
            }
        }

        let created = self.users.insert(&user).await?;
        info!(subject = %created.subject, username = %created.username, "Profile created");
        Ok(created)
    }

    /// Fetch the caller's profile.
    pub async fn get_profile(&self, ctx: &RequestContext) -> AppResult<User> {
        self.users
            .find_by_subject(&ctx.subject)
            .await?
            .ok_or_else(|| AppError::not_found("Profile not found"))
    }

    /// Update the caller's profile fields.
    ///
    /// Identity fields (subject, email) come from the provider and
    /// cannot be changed here. All violations are reported together.
    pub async fn update_profile(
        &self,
        ctx: &RequestContext,
        update: ProfileUpdate,
    ) -> AppResult<User> {
        let mut user = self.get_profile(ctx).await?;

        let mut violations = Vec::new();
        if let Some(username) = update.username.as_deref() {
            if let Err(v) = validation::check_username(username) {
                violations.push(v);
            }
        }
        if let Some(name) = update.display_name.as_deref() {
            if let Err(v) = validation::check_display_name(name) {
                violations.push(v);
            }
        }
        if let Some(number) = update.contact_number.as_deref() {
            if let Err(v) = validation::check_contact_number(number) {
                violations.push(v);
            }
        }
        if !violations.is_empty() {
            return Err(AppError::validation_failed(violations));
        }

        if let Some(username) = update.username {
            if !username.eq_ignore_ascii_case(&user.username) {
                if self.users.find_by_username(&username).await?.is_some() {
                    return Err(AppError::conflict("Username is already taken"));
                }
            }
            user.username = username;
        }
        if let Some(name) = update.display_name {
            user.display_name = Some(name.trim().to_string());
        }
        if let Some(number) = update.contact_number {
            user.contact_number = Some(number);
        }
        if let Some(country) = update.country {
            user.country = Some(country);
        }
        if let Some(notify) = update.notify_email {
            user.notify_email = notify;
        }
        if let Some(newsletter) = update.newsletter {
            user.newsletter = newsletter;
        }

        user.updated_at = Utc::now();
        self.users.update(&user).await
    }

    /// Record a logout. Best-effort: a missing profile is not an error.
    pub async fn record_logout(&self, ctx: &RequestContext) -> AppResult<()> {
        if let Some(mut user) = self.users.find_by_subject(&ctx.subject).await? {
            user.updated_at = Utc::now();
            self.users.update(&user).await?;
            info!(subject = %ctx.subject, "User logged out");
        }
        Ok(())
    }

    /// Find a free username derived from the email, appending a random
    /// suffix when the plain candidate is taken.
    async fn available_username(&self, email: &str) -> AppResult<String> {
        let candidate = validation::derive_username(email);
        if self.users.find_by_username(&candidate).await?.is_none() {
            return Ok(candidate);
        }
        let id = Uuid::new_v4().simple().to_string();
        let suffix = &id[..6];
        let mut base = candidate;
        base.truncate(23);
        Ok(format!("{base}_{suffix}"))
    }
}
