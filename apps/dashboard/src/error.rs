//! # Application Error Type
//!
//! Everything that can stop a `marketonic` command, mapped to an exit code.
//!
//! ```text
//!   ConfigError ─────┐
//!   ApiError ────────┤
//!   ValidationError ─┼──► AppError ──► stderr + exit code
//!   io / json ───────┤
//!   unknown id ──────┘
//! ```
//!
//! Failed mutations are not errors here: the dashboard has already reported
//! them through notifications, and the command only sets a failing status.

use marketonic_api::{ApiError, ConfigError};
use marketonic_core::ValidationError;
use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// No product with this id in the loaded inventory.
    #[error("Product #{0} not found")]
    ProductNotFound(i64),

    /// `--category-id` names no loaded category.
    #[error("Category #{0} not found (see `marketonic categories`)")]
    CategoryNotFound(i64),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON output failed: {0}")]
    Json(#[from] serde_json::Error),
}

impl AppError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            AppError::Validation(_) | AppError::ProductNotFound(_) | AppError::CategoryNotFound(_) => {
                2
            }
            AppError::Config(_) => 3,
            AppError::Api(_) => 4,
            AppError::Io(_) | AppError::Json(_) => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(AppError::ProductNotFound(3).exit_code(), 2);
        assert_eq!(AppError::CategoryNotFound(8).exit_code(), 2);
        assert_eq!(AppError::from(ApiError::Timeout).exit_code(), 4);
        assert_eq!(
            AppError::from(ConfigError::InvalidUrl("x".into())).exit_code(),
            3
        );
        assert_eq!(
            AppError::from(ValidationError::ReservedCategory).to_string(),
            "\"All categories\" is a filter, not a category"
        );
    }
}
