//! # Form Drafts
//!
//! Editable drafts behind the "new category" and "new / edit product"
//! dialogs.
//!
//! ## Draft Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  open (create) ──► ProductDraft::default()     all fields ""            │
//! │  open (edit)   ──► ProductDraft::from_product  seeded from the product  │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  user edits fields (plain strings, nothing parsed yet)                  │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  submit() ──► required fields present? ──no──► ValidationError          │
//! │        │                                                                │
//! │       yes                                                               │
//! │        ▼                                                                │
//! │  ProductPayload  (price / stock / category parsed leniently)            │
//! │                                                                         │
//! │  close ──► draft dropped                                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Number parsing follows the browser form this dashboard replaced: the
//! longest numeric prefix wins (`"12abc"` → 12), and text with no numeric
//! prefix becomes `None`, which is sent as `null` for the server to reject.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::{Product, ProductPayload};
use crate::validation::{
    validate_category_selection, validate_required, validate_trimmed, ValidationResult,
};

/// Wire and draft format for expiration dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

// =============================================================================
// Category Draft
// =============================================================================

/// Draft for the "new category" dialog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryDraft {
    pub name: String,
}

impl CategoryDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Clears the draft. Called whenever the dialog opens or closes.
    pub fn reset(&mut self) {
        self.name.clear();
    }

    pub fn is_valid(&self) -> bool {
        !self.name.trim().is_empty()
    }

    /// Returns the trimmed category name to send.
    pub fn submit(&self) -> ValidationResult<String> {
        validate_trimmed("name", &self.name).map(str::to_string)
    }
}

// =============================================================================
// Product Draft
// =============================================================================

/// Draft for the product dialog. Every field is the raw text the user typed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    pub price: String,
    pub stock_quantity: String,
    /// `YYYY-MM-DD`.
    pub expiration_date: String,
    /// Category id as text; `"0"` is the filter entry and is refused.
    pub category_id: String,
}

impl ProductDraft {
    /// All-empty draft for creating a product.
    pub fn new() -> Self {
        Self::default()
    }

    /// Draft seeded from an existing product for editing.
    pub fn from_product(product: &Product) -> Self {
        ProductDraft {
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price.to_decimal_string(),
            stock_quantity: product.stock_quantity.to_string(),
            expiration_date: product
                .expiration_date
                .map(|date| date.format(DATE_FORMAT).to_string())
                .unwrap_or_default(),
            category_id: product.category.id.to_string(),
        }
    }

    /// Resets every field to empty.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Checks the required fields in form order.
    ///
    /// `description` is optional. Numeric fields only need to be present.
    pub fn validate(&self) -> ValidationResult<()> {
        validate_required("name", &self.name)?;
        validate_required("price", &self.price)?;
        validate_required("stock quantity", &self.stock_quantity)?;
        validate_required("expiration date", &self.expiration_date)?;
        validate_category_selection(&self.category_id)?;
        Ok(())
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Packages the draft as a create/update body.
    ///
    /// ## Example
    /// ```rust
    /// use marketonic_core::ProductDraft;
    ///
    /// let draft = ProductDraft {
    ///     name: "Milk".into(),
    ///     description: String::new(),
    ///     price: "4.5".into(),
    ///     stock_quantity: "12".into(),
    ///     expiration_date: "2025-12-31".into(),
    ///     category_id: "3".into(),
    /// };
    /// let payload = draft.submit().unwrap();
    /// assert_eq!(payload.price, Some(4.5));
    /// assert_eq!(payload.stock_quantity, Some(12));
    /// assert_eq!(payload.category_id, Some(3));
    /// ```
    pub fn submit(&self) -> ValidationResult<ProductPayload> {
        self.validate()?;
        Ok(ProductPayload {
            name: self.name.clone(),
            description: self.description.clone(),
            price: leading_decimal(&self.price),
            stock_quantity: leading_integer(&self.stock_quantity),
            expiration_date: self.expiration_date.clone(),
            category_id: leading_integer(&self.category_id),
        })
    }
}

// =============================================================================
// Date Helpers
// =============================================================================

/// Drops any time component from an ISO date-time, `"2025-01-31T00:00:00"`
/// becoming `"2025-01-31"`.
pub fn date_only(raw: &str) -> &str {
    raw.split('T').next().unwrap_or(raw)
}

/// Parses the date part of an ISO date or date-time.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date_only(raw.trim()), DATE_FORMAT).ok()
}

// =============================================================================
// Lenient Number Parsing
// =============================================================================

/// Longest decimal prefix after leading whitespace, e.g. `"4.5kg"` → 4.5.
fn leading_decimal(text: &str) -> Option<f64> {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let mut frac_end = end + 1;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - (end + 1);
        if digits > 0 {
            end = frac_end;
        }
    }
    if digits == 0 {
        return None;
    }

    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits {
            end = exp_end;
        }
    }

    s[..end].parse().ok()
}

/// Longest integer prefix after leading whitespace, e.g. `"12.7"` → 12.
fn leading_integer(text: &str) -> Option<i64> {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end == digits_start {
        return None;
    }

    s[..end].parse().ok()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::money::Money;
    use crate::types::Category;

    fn filled_draft() -> ProductDraft {
        ProductDraft {
            name: "Greek Yogurt".into(),
            description: "Plain, 500g".into(),
            price: "7.90".into(),
            stock_quantity: "24".into(),
            expiration_date: "2025-03-01".into(),
            category_id: "2".into(),
        }
    }

    #[test]
    fn test_category_draft_validity() {
        let mut draft = CategoryDraft::new();
        assert!(!draft.is_valid());

        draft.set_name("   ");
        assert!(!draft.is_valid());
        assert!(draft.submit().is_err());

        draft.set_name("  Dairy  ");
        assert!(draft.is_valid());
        assert_eq!(draft.submit().unwrap(), "Dairy");

        draft.reset();
        assert_eq!(draft, CategoryDraft::default());
    }

    #[test]
    fn test_new_product_draft_is_empty_and_invalid() {
        let draft = ProductDraft::new();
        assert_eq!(draft.name, "");
        assert_eq!(draft.category_id, "");
        assert_eq!(
            draft.validate(),
            Err(ValidationError::Required { field: "name" })
        );
    }

    #[test]
    fn test_each_required_field() {
        let cases: [(fn(&mut ProductDraft), ValidationError); 5] = [
            (|d| d.name.clear(), ValidationError::Required { field: "name" }),
            (|d| d.price.clear(), ValidationError::Required { field: "price" }),
            (
                |d| d.stock_quantity.clear(),
                ValidationError::Required {
                    field: "stock quantity",
                },
            ),
            (
                |d| d.expiration_date.clear(),
                ValidationError::Required {
                    field: "expiration date",
                },
            ),
            (
                |d| d.category_id.clear(),
                ValidationError::Required { field: "category" },
            ),
        ];

        for (clear, expected) in cases {
            let mut draft = filled_draft();
            clear(&mut draft);
            assert_eq!(draft.validate(), Err(expected));
        }
    }

    #[test]
    fn test_description_is_optional() {
        let mut draft = filled_draft();
        draft.description.clear();
        assert!(draft.is_valid());
    }

    #[test]
    fn test_filter_entry_is_not_a_category() {
        let mut draft = filled_draft();
        draft.category_id = "0".into();
        assert_eq!(draft.submit(), Err(ValidationError::ReservedCategory));
    }

    #[test]
    fn test_seeded_from_product() {
        let product = Product::new(
            7,
            "Cheddar",
            "Aged 12 months",
            Money::from_cents(1250),
            3,
            NaiveDate::from_ymd_opt(2025, 1, 31),
            Category::new(4, "Cheese"),
        );

        let draft = ProductDraft::from_product(&product);
        assert_eq!(draft.name, "Cheddar");
        assert_eq!(draft.description, "Aged 12 months");
        assert_eq!(draft.price, "12.50");
        assert_eq!(draft.stock_quantity, "3");
        assert_eq!(draft.expiration_date, "2025-01-31");
        assert_eq!(draft.category_id, "4");
        assert!(draft.is_valid());
    }

    #[test]
    fn test_submit_packages_payload() {
        let payload = filled_draft().submit().unwrap();
        assert_eq!(payload.name, "Greek Yogurt");
        assert_eq!(payload.description, "Plain, 500g");
        assert_eq!(payload.price, Some(7.9));
        assert_eq!(payload.stock_quantity, Some(24));
        assert_eq!(payload.expiration_date, "2025-03-01");
        assert_eq!(payload.category_id, Some(2));
    }

    #[test]
    fn test_malformed_numbers_reach_the_payload() {
        let mut draft = filled_draft();
        draft.price = "abc".into();
        draft.stock_quantity = "lots".into();

        // Present, therefore valid; the server gets nulls.
        let payload = draft.submit().unwrap();
        assert_eq!(payload.price, None);
        assert_eq!(payload.stock_quantity, None);
    }

    #[test]
    fn test_lenient_number_prefixes() {
        assert_eq!(leading_decimal("4.5kg"), Some(4.5));
        assert_eq!(leading_decimal("  .25"), Some(0.25));
        assert_eq!(leading_decimal("-3"), Some(-3.0));
        assert_eq!(leading_decimal("1e2x"), Some(100.0));
        assert_eq!(leading_decimal("5."), Some(5.0));
        assert_eq!(leading_decimal("."), None);
        assert_eq!(leading_decimal("R$ 5"), None);

        assert_eq!(leading_integer("12.7"), Some(12));
        assert_eq!(leading_integer(" 42 units"), Some(42));
        assert_eq!(leading_integer("-1"), Some(-1));
        assert_eq!(leading_integer("x1"), None);
        assert_eq!(leading_integer("+"), None);
    }

    #[test]
    fn test_date_helpers() {
        assert_eq!(date_only("2025-01-31T00:00:00"), "2025-01-31");
        assert_eq!(date_only("2025-01-31"), "2025-01-31");
        assert_eq!(parse_date("2025-01-31T10:20:30Z"), NaiveDate::from_ymd_opt(2025, 1, 31));
        assert_eq!(parse_date("31/01/2025"), None);
    }
}
