//! # Domain Types
//!
//! Core domain types used throughout Marketonic.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────────┐   ┌─────────────────┐   │
//! │  │    Category     │◄──│      Product        │──►│  StockStatus    │   │
//! │  │  ─────────────  │   │  ─────────────────  │   │  ─────────────  │   │
//! │  │  id (server)    │   │  id (server)        │   │  InStock        │   │
//! │  │  name           │   │  name, description  │   │  LowStock       │   │
//! │  └─────────────────┘   │  price (Money)      │   │  OutOfStock     │   │
//! │                        │  stock_quantity     │   └─────────────────┘   │
//! │                        │  expiration_date    │    derived, never sent  │
//! │                        └─────────────────────┘                          │
//! │                                                                         │
//! │  ┌─────────────────────┐   ┌──────────────────────────────────────┐    │
//! │  │  DashboardStats     │   │  ProductPayload                      │    │
//! │  │  derived from the   │   │  what a submitted product draft      │    │
//! │  │  full collection    │   │  turns into (create / update body)   │    │
//! │  └─────────────────────┘   └──────────────────────────────────────┘    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! Ids are assigned by the server. The only id minted client-side is the
//! `0` of the "All categories" filter entry.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::{ALL_CATEGORIES_ID, ALL_CATEGORIES_NAME, LOW_STOCK_THRESHOLD};

// =============================================================================
// Category
// =============================================================================

/// A product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Server-assigned identifier.
    pub id: i64,

    /// Display name, also the value the category filter matches on.
    pub name: String,
}

impl Category {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Category {
            id,
            name: name.into(),
        }
    }

    /// The synthetic "All categories" filter entry.
    pub fn all_categories() -> Self {
        Category::new(ALL_CATEGORIES_ID, ALL_CATEGORIES_NAME)
    }

    /// Returns true for the "All categories" filter entry.
    #[inline]
    pub fn is_sentinel(&self) -> bool {
        self.id == ALL_CATEGORIES_ID
    }
}

// =============================================================================
// Stock Status
// =============================================================================

/// Stock level bucket, derived from the quantity on hand.
///
/// ## Thresholds
/// ```text
///   quantity:   0        1 ........ 9       10 ............
///             ┌────┐   ┌──────────────┐   ┌────────────────┐
///             │OUT │   │     LOW      │   │    IN STOCK    │
///             └────┘   └──────────────┘   └────────────────┘
///                                      ▲
///                          LOW_STOCK_THRESHOLD (exclusive)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    InStock,
    LowStock,
    OutOfStock,
}

impl StockStatus {
    /// Buckets a stock quantity.
    ///
    /// Negative quantities never come from the server; they are treated as
    /// nothing on the shelf.
    pub fn from_quantity(quantity: i64) -> Self {
        if quantity <= 0 {
            StockStatus::OutOfStock
        } else if quantity < LOW_STOCK_THRESHOLD {
            StockStatus::LowStock
        } else {
            StockStatus::InStock
        }
    }

    /// Human-readable label for list rendering.
    pub fn label(&self) -> &'static str {
        match self {
            StockStatus::InStock => "In stock",
            StockStatus::LowStock => "Low stock",
            StockStatus::OutOfStock => "Out of stock",
        }
    }
}

impl std::fmt::Display for StockStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product as held in the session.
///
/// `stock_status` is computed in [`Product::new`] from `stock_quantity`,
/// which is the only way a product is built from server data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    /// Free text; the server may send none, which is kept as "".
    pub description: String,
    pub price: Money,
    pub stock_quantity: i64,
    /// Date-only; `None` when the server sends none.
    pub expiration_date: Option<NaiveDate>,
    pub category: Category,
    stock_status: StockStatus,
}

impl Product {
    pub fn new(
        id: i64,
        name: impl Into<String>,
        description: impl Into<String>,
        price: Money,
        stock_quantity: i64,
        expiration_date: Option<NaiveDate>,
        category: Category,
    ) -> Self {
        Product {
            id,
            name: name.into(),
            description: description.into(),
            price,
            stock_quantity,
            expiration_date,
            category,
            stock_status: StockStatus::from_quantity(stock_quantity),
        }
    }

    /// Stock bucket computed when this product was loaded.
    #[inline]
    pub fn stock_status(&self) -> StockStatus {
        self.stock_status
    }

    /// `price × stock_quantity`.
    #[inline]
    pub fn inventory_value(&self) -> Money {
        self.price.multiply_quantity(self.stock_quantity)
    }

    /// True when the expiration date is strictly before `today`.
    pub fn is_expired(&self, today: NaiveDate) -> bool {
        self.expiration_date.is_some_and(|date| date < today)
    }
}

// =============================================================================
// Dashboard Stats
// =============================================================================

/// Aggregates shown in the dashboard header.
///
/// Always computed over the whole product collection, independent of the
/// active search or category filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct DashboardStats {
    pub total_products: usize,
    pub low_stock_count: usize,
    pub out_of_stock_count: usize,
    pub total_inventory_value: Money,
}

// =============================================================================
// Product Payload
// =============================================================================

/// Body of a create or update product request.
///
/// Numeric fields are `None` when the draft text did not parse. They are
/// sent as `null` and the server decides; no local rejection happens.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductPayload {
    pub name: String,
    pub description: String,
    pub price: Option<f64>,
    pub stock_quantity: Option<i64>,
    pub expiration_date: String,
    pub category_id: Option<i64>,
}

// =============================================================================
// Unit Tests
// =============================================================================
