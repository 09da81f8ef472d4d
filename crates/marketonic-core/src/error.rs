//! # Error Types
//!
//! Domain-specific error types for marketonic-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  marketonic-core errors (this file)                                    │
//! │  └── ValidationError  - Draft submission refused locally               │
//! │                                                                         │
//! │  marketonic-api errors (separate crate)                                │
//! │  ├── ApiError         - Request failures (status, network, decoding)   │
//! │  └── ConfigError      - Client configuration problems                  │
//! │                                                                         │
//! │  CLI errors (in app)                                                   │
//! │  └── AppError         - What the terminal user sees                    │
//! │                                                                         │
//! │  Flow: ValidationError ──► MutationOutcome ──► CLI exit status         │
//! │        ApiError ──► notification (mutations) or CLI exit code (loads)  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## What is NOT a ValidationError
//! Numeric fields are only checked for presence. A price of `"abc"` is
//! accepted here and rejected by the server, surfacing as an `ApiError`.

use thiserror::Error;

// =============================================================================
// Validation Error
// =============================================================================

/// Reasons a draft cannot be submitted.
///
/// Only presence is validated locally. Everything else is the server's call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or blank.
    #[error("{field} is required")]
    Required { field: &'static str },

    /// The "All categories" filter entry was chosen as a product category.
    #[error("\"All categories\" is a filter, not a category")]
    ReservedCategory,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required { field: "price" };
        assert_eq!(err.to_string(), "price is required");

        assert_eq!(
            ValidationError::ReservedCategory.to_string(),
            "\"All categories\" is a filter, not a category"
        );
    }
}
