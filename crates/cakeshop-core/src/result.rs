//! Result alias used across the workspace.

use crate::error::AppError;

/// `Result` with the workspace error type baked in.
pub type AppResult<T> = Result<T, AppError>;
