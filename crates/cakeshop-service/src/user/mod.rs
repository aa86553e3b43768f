//! Profile sync and profile updates.

pub mod service;
pub mod validation;

pub use service::{ProfileUpdate, UserService};
