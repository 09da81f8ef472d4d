//! # Session State
//!
//! The dashboard's in-memory copy of the inventory.
//!
//! ## Ownership
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   Dashboard (this crate) ──writes──► SessionState ◄──reads── anyone     │
//! │        ▲                               │                                │
//! │        │ completed fetch /             ├─ products   (server order)     │
//! │        │ post-mutation refetch         ├─ categories ("All" first)      │
//! │                                        └─ loading                       │
//! │                                                                         │
//! │   Writers are crate-private. Outside this crate the session can only   │
//! │   be read, and every read of products goes through the derived views.  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use marketonic_core::{compute_stats, Category, DashboardStats, FilterState, Product};

/// Products, categories, and the loading flag.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    products: Vec<Product>,
    /// Always starts with the "All categories" entry.
    categories: Vec<Category>,
    loading: bool,
}

impl Default for SessionState {
    fn default() -> Self {
        SessionState {
            products: Vec::new(),
            categories: vec![Category::all_categories()],
            loading: false,
        }
    }
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Readers
    // =========================================================================

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Categories for the filter, "All categories" first.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Categories a product can belong to (everything but the filter entry).
    pub fn selectable_categories(&self) -> Vec<&Category> {
        self.categories.iter().filter(|c| !c.is_sentinel()).collect()
    }

    pub fn find_product(&self, id: i64) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Products visible under `filter`, in server order.
    pub fn filtered(&self, filter: &FilterState) -> Vec<&Product> {
        filter.apply(&self.products)
    }

    /// Statistics over every product, whatever the filter.
    pub fn stats(&self) -> DashboardStats {
        compute_stats(&self.products)
    }

    /// True while a load or refresh is in flight.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    // =========================================================================
    // Writers (crate-private)
    // =========================================================================

    pub(crate) fn begin_loading(&mut self) {
        self.loading = true;
    }

    pub(crate) fn finish_loading(&mut self) {
        self.loading = false;
    }

    /// Replaces both collections with a fresh read.
    pub(crate) fn replace(&mut self, products: Vec<Product>, categories: Vec<Category>) {
        self.products = products;
        self.categories = std::iter::once(Category::all_categories())
            .chain(categories.into_iter().filter(|c| !c.is_sentinel()))
            .collect();
    }
}
