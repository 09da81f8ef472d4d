//! # marketonic-core: Pure Dashboard Logic for Marketonic
//!
//! This crate is the **heart** of the Marketonic inventory dashboard. It
//! contains the derived-view model as pure functions with zero I/O
//! dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Marketonic Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  `marketonic` CLI (apps/dashboard)              │   │
//! │  │      list ──► add-product ──► edit-product ──► delete-product   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │        marketonic-sync (session state + mutation flow)          │   │
//! │  └──────────────┬──────────────────────────────┬───────────────────┘   │
//! │                 │                              │                        │
//! │  ┌──────────────▼──────────────┐  ┌────────────▼────────────────────┐  │
//! │  │ ★ marketonic-core ★         │  │ marketonic-api (HTTP client)    │  │
//! │  │                             │  │  /produtos, /categorias         │  │
//! │  │  types   money   view  form │  └─────────────────────────────────┘  │
//! │  │                             │                                        │
//! │  │  NO I/O • PURE FUNCTIONS    │                                        │
//! │  └─────────────────────────────┘                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Category, Product, StockStatus, DashboardStats)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`view`] - Filtering and statistics over the product collection
//! - [`form`] - Editable drafts for the category and product dialogs
//! - [`validation`] - Required-field rules used by the drafts
//! - [`error`] - Validation error types
//!
//! ## Example Usage
//!
//! ```rust
//! use marketonic_core::money::Money;
//! use marketonic_core::types::StockStatus;
//!
//! // Prices come off the wire as decimals and are stored as cents.
//! let price = Money::from_decimal(10.99);
//! assert_eq!(price.cents(), 1099);
//!
//! // Stock status is derived from the quantity alone.
//! assert_eq!(StockStatus::from_quantity(9), StockStatus::LowStock);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod form;
pub mod money;
pub mod types;
pub mod validation;
pub mod view;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::ValidationError;
pub use form::{CategoryDraft, ProductDraft};
pub use money::Money;
pub use types::*;
pub use view::{compute_stats, filtered_products, FilterState};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Non-zero stock strictly below this quantity is flagged as low stock.
pub const LOW_STOCK_THRESHOLD: i64 = 10;

/// Id of the synthetic "All categories" filter entry.
///
/// Never assigned by the server, never sent to it.
pub const ALL_CATEGORIES_ID: i64 = 0;

/// Display name of the synthetic filter entry.
pub const ALL_CATEGORIES_NAME: &str = "All categories";
