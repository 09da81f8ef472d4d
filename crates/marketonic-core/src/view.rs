//! # Derived Views
//!
//! Pure projections over the product collection: the filtered list and the
//! dashboard statistics.
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   session products ──┬──► filtered_products(search, category) ──► list │
//! │   (server order)     │                                                  │
//! │                      └──► compute_stats() ─────────────────────► cards │
//! │                                                                         │
//! │   The stats branch never sees the filter: the cards always describe    │
//! │   the whole inventory.                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Both functions own nothing, cache nothing, and return the same output for
//! the same input. Callers recompute whenever products or filters change.

use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::types::{DashboardStats, Product, StockStatus};
use crate::ALL_CATEGORIES_NAME;

// =============================================================================
// Filter State
// =============================================================================

/// Search box text plus the selected category name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    pub search_term: String,
    pub selected_category: String,
}

impl Default for FilterState {
    fn default() -> Self {
        FilterState {
            search_term: String::new(),
            selected_category: ALL_CATEGORIES_NAME.to_string(),
        }
    }
}

impl FilterState {
    pub fn new(search_term: impl Into<String>, selected_category: impl Into<String>) -> Self {
        FilterState {
            search_term: search_term.into(),
            selected_category: selected_category.into(),
        }
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    pub fn select_category(&mut self, name: impl Into<String>) {
        self.selected_category = name.into();
    }

    /// Returns true when no product would be excluded.
    pub fn is_unfiltered(&self) -> bool {
        self.search_term.is_empty() && self.selected_category == ALL_CATEGORIES_NAME
    }

    /// Applies this filter to a product collection.
    pub fn apply<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
        filtered_products(products, &self.search_term, &self.selected_category)
    }
}

// =============================================================================
// Filtering
// =============================================================================

/// Products whose name contains `search_term` (case-insensitive) and whose
/// category is `selected_category`, unless that is "All categories".
///
/// Input order is preserved. An empty search term matches every name.
///
/// ## Example
/// ```rust
/// use marketonic_core::{filtered_products, Category, Money, Product};
///
/// let products = vec![
///     Product::new(1, "Whole Milk", "", Money::from_cents(450), 12, None, Category::new(1, "Dairy")),
///     Product::new(2, "Bread", "", Money::from_cents(300), 3, None, Category::new(2, "Bakery")),
/// ];
///
/// let hits = filtered_products(&products, "MILK", "All categories");
/// assert_eq!(hits.len(), 1);
/// assert_eq!(hits[0].id, 1);
/// ```
pub fn filtered_products<'a>(
    products: &'a [Product],
    search_term: &str,
    selected_category: &str,
) -> Vec<&'a Product> {
    let needle = search_term.to_lowercase();
    let any_category = selected_category == ALL_CATEGORIES_NAME;

    products
        .iter()
        .filter(|product| {
            let matches_search = product.name.to_lowercase().contains(&needle);
            let matches_category = any_category || product.category.name == selected_category;
            matches_search && matches_category
        })
        .collect()
}

// =============================================================================
// Statistics
// =============================================================================

/// Aggregates over the full product collection.
///
/// ## Example
/// ```rust
/// use marketonic_core::{compute_stats, Category, Money, Product};
///
/// let dairy = Category::new(1, "Dairy");
/// let products: Vec<Product> = [0, 5, 20]
///     .into_iter()
///     .enumerate()
///     .map(|(i, qty)| Product::new(i as i64, "Item", "", Money::from_cents(100), qty, None, dairy.clone()))
///     .collect();
///
/// let stats = compute_stats(&products);
/// assert_eq!(stats.total_products, 3);
/// assert_eq!(stats.low_stock_count, 1);
/// assert_eq!(stats.out_of_stock_count, 1);
/// assert_eq!(stats.total_inventory_value.cents(), 2500);
/// ```
pub fn compute_stats(products: &[Product]) -> DashboardStats {
    let count_status = |status: StockStatus| {
        products
            .iter()
            .filter(|p| p.stock_status() == status)
            .count()
    };

    DashboardStats {
        total_products: products.len(),
        low_stock_count: count_status(StockStatus::LowStock),
        out_of_stock_count: count_status(StockStatus::OutOfStock),
        total_inventory_value: products.iter().map(Product::inventory_value).sum::<Money>(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
