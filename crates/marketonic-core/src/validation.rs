//! # Validation Module
//!
//! Required-field rules for the dashboard drafts.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Draft (THIS MODULE)                                          │
//! │  ├── Required fields present                                           │
//! │  └── "All categories" never chosen as a product category               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Inventory API (remote)                                       │
//! │  ├── Numeric formats and ranges (price ≥ 0, stock ≥ 0)                 │
//! │  ├── Date format                                                       │
//! │  └── Category existence                                                │
//! │                                                                         │
//! │  A price of "abc" passes Layer 1 and comes back as a request failure   │
//! │  from Layer 2.                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::ALL_CATEGORIES_ID;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Rejects an empty value. Whitespace counts as present.
///
/// ## Example
/// ```rust
/// use marketonic_core::validation::validate_required;
///
/// assert!(validate_required("price", "12.50").is_ok());
/// assert!(validate_required("price", "").is_err());
/// ```
pub fn validate_required(field: &'static str, value: &str) -> ValidationResult<()> {
    if value.is_empty() {
        return Err(ValidationError::Required { field });
    }
    Ok(())
}

/// Rejects a value that is empty after trimming, returning the trimmed text.
///
/// ## Example
/// ```rust
/// use marketonic_core::validation::validate_trimmed;
///
/// assert_eq!(validate_trimmed("name", "  Dairy ").unwrap(), "Dairy");
/// assert!(validate_trimmed("name", "   ").is_err());
/// ```
pub fn validate_trimmed<'a>(field: &'static str, value: &'a str) -> ValidationResult<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Required { field });
    }
    Ok(trimmed)
}

/// Checks the category selection of a product draft.
///
/// The selection must be present and must not be the "All categories"
/// filter entry. Non-numeric text passes; the server rejects it.
pub fn validate_category_selection(value: &str) -> ValidationResult<()> {
    validate_required("category", value)?;
    if value.trim().parse::<i64>().ok() == Some(ALL_CATEGORIES_ID) {
        return Err(ValidationError::ReservedCategory);
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
