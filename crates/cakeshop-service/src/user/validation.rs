//! Profile field validation.

use std::sync::LazyLock;

use regex::Regex;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid regex"));

static USERNAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_]{3,30}$").expect("valid regex"));

static DISPLAY_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z ]{1,100}$").expect("valid regex"));

static CONTACT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9][0-9 \-()]{5,19}$").expect("valid regex"));

pub fn check_email(email: &str) -> Result<(), String> {
    if EMAIL_RE.is_match(email) {
        Ok(())
    } else {
        Err(format!("Invalid email address: {email}"))
    }
}

/// Usernames are 3-30 characters of letters, digits, and underscores.
pub fn check_username(username: &str) -> Result<(), String> {
    if USERNAME_RE.is_match(username) {
        Ok(())
    } else {
        Err("Username must be 3-30 letters, digits, or underscores".to_string())
    }
}

/// Display names are letters and spaces, up to 100 characters.
pub fn check_display_name(name: &str) -> Result<(), String> {
    if DISPLAY_NAME_RE.is_match(name.trim()) {
        Ok(())
    } else {
        Err("Display name may only contain letters and spaces (max 100)".to_string())
    }
}

pub fn check_contact_number(number: &str) -> Result<(), String> {
    if CONTACT_RE.is_match(number) {
        Ok(())
    } else {
        Err(format!("Invalid contact number: {number}"))
    }
}

/// Derive a username candidate from an email's local part.
///
/// Keeps letters, digits, and underscores, lowercased; pads short
/// results and truncates long ones so the candidate always satisfies
/// [`check_username`]. Uniqueness is the caller's problem.
pub fn derive_username(email: &str) -> String {
    let local = email.split('@').next().unwrap_or(email);
    let mut candidate: String = local
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .map(|c| c.to_ascii_lowercase())
        .take(30)
        .collect();
    while candidate.len() < 3 {
        candidate.push('0');
    }
    candidate
}
