//! # Dashboard Orchestrator
//!
//! [`Dashboard`] ties the session, the dialogs, and the backend together.
//! It is the only writer of the session state.
//!
//! ## Mutation Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  submit / delete                                                        │
//! │       │                                                                 │
//! │       ├── draft invalid ─────────────────────► Invalid   (no request)  │
//! │       ├── delete declined ───────────────────► Declined  (no request)  │
//! │       ▼                                                                 │
//! │  PENDING   notify pending                                               │
//! │       │                                                                 │
//! │       ├── request ok ──► SUCCESS  notify success (names the entity)    │
//! │       │                           close the dialog                     │
//! │       │                           refetch products + categories        │
//! │       │                                                                 │
//! │       └── request err ─► FAILURE  notify error (server message, else   │
//! │                                   fallback); dialog and session stay   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every method that touches the session takes `&mut self`, so mutations
//! run one at a time and nothing else writes the collections in between.

use std::sync::Arc;

use marketonic_api::{ApiError, ApiResult, InventoryApi};
use marketonic_core::{
    Category, CategoryDraft, DashboardStats, FilterState, Product, ProductDraft, ValidationError,
};
use tracing::{debug, info, warn};

use crate::confirm::{AlwaysDecline, ConfirmationGate};
use crate::dialog::{CategoryDialog, ProductDialog, ProductDialogMode};
use crate::notify::{NoOpSink, NotificationSink};
use crate::session::SessionState;

// =============================================================================
// Messages
// =============================================================================

pub const LOAD_FAILED: &str = "Could not load data from the server.";
pub const SAVING_PRODUCT: &str = "Saving product...";
pub const SAVE_PRODUCT_FAILED: &str = "Could not save the product.";
pub const SAVING_CATEGORY: &str = "Saving new category...";
pub const CREATE_CATEGORY_FAILED: &str = "Could not create the category.";
pub const DELETING_PRODUCT: &str = "Deleting product...";
pub const DELETE_PRODUCT_FAILED: &str = "Could not delete the product.";
pub const CONFIRM_DELETE: &str = "Are you sure you want to delete this product?";

// =============================================================================
// Mutation Outcome
// =============================================================================

/// How a submit or delete ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationOutcome {
    /// The server accepted it; `name` is the entity's name as the server
    /// returned it, which the success message also shows.
    Succeeded { name: String },

    /// The server or the transport refused it; `message` is what was shown.
    Failed { message: String },

    /// The user declined the confirmation.
    Declined,

    /// The draft failed local validation; nothing was sent.
    Invalid(ValidationError),

    /// Submit was called with the dialog closed.
    NothingToSubmit,
}

impl MutationOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, MutationOutcome::Succeeded { .. })
    }
}

// =============================================================================
// Dashboard
// =============================================================================

/// Session state plus the operations that change it.
pub struct Dashboard {
    api: Arc<dyn InventoryApi>,
    notifier: Arc<dyn NotificationSink>,
    gate: Arc<dyn ConfirmationGate>,
    session: SessionState,
    filter: FilterState,
    product_dialog: ProductDialog,
    category_dialog: CategoryDialog,
}

impl Dashboard {
    /// Creates a dashboard that drops notifications and declines deletes.
    pub fn new(api: Arc<dyn InventoryApi>) -> Self {
        Dashboard {
            api,
            notifier: Arc::new(NoOpSink),
            gate: Arc::new(AlwaysDecline),
            session: SessionState::new(),
            filter: FilterState::default(),
            product_dialog: ProductDialog::default(),
            category_dialog: CategoryDialog::default(),
        }
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn NotificationSink>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn with_confirmation(mut self, gate: Arc<dyn ConfirmationGate>) -> Self {
        self.gate = gate;
        self
    }

    // =========================================================================
    // Loading
    // =========================================================================

    /// Initial fetch. Same as [`Dashboard::refresh`]; there is no retry.
    pub async fn load(&mut self) -> ApiResult<()> {
        info!("Loading inventory");
        self.refresh().await
    }

    /// Fetches products and categories together.
    ///
    /// Both collections are replaced only when both requests succeed. On
    /// failure the previous collections stay and one generic error is
    /// emitted. The loading flag is cleared either way.
    pub async fn refresh(&mut self) -> ApiResult<()> {
        self.session.begin_loading();
        let (products, categories) =
            tokio::join!(self.api.list_products(), self.api.list_categories());
        self.session.finish_loading();

        match (products, categories) {
            (Ok(products), Ok(categories)) => {
                debug!(
                    products = products.len(),
                    categories = categories.len(),
                    "Inventory refreshed"
                );
                self.session.replace(products, categories);
                Ok(())
            }
            (Err(err), _) | (_, Err(err)) => {
                warn!(error = %err, retryable = err.is_retryable(), "Could not load inventory");
                self.notifier.error(LOAD_FAILED);
                Err(err)
            }
        }
    }

    async fn refetch_after_mutation(&mut self) {
        if let Err(err) = self.refresh().await {
            debug!(error = %err, "Refetch after mutation failed");
        }
    }

    fn report_failure(&self, err: ApiError, fallback: &str) -> MutationOutcome {
        let message = err.server_message().unwrap_or(fallback).to_string();
        warn!(error = %err, "Mutation failed");
        self.notifier.error(&message);
        MutationOutcome::Failed { message }
    }

    // =========================================================================
    // Category Mutations
    // =========================================================================

    /// Opens the category dialog with an empty draft.
    pub fn open_new_category(&mut self) -> &mut CategoryDraft {
        self.category_dialog.open()
    }

    pub fn close_category_dialog(&mut self) {
        self.category_dialog.close();
    }

    pub fn category_dialog(&self) -> &CategoryDialog {
        &self.category_dialog
    }

    pub fn category_draft_mut(&mut self) -> Option<&mut CategoryDraft> {
        self.category_dialog.draft_mut()
    }

    /// Sends the category draft's trimmed name.
    pub async fn submit_category(&mut self) -> MutationOutcome {
        if !self.category_dialog.is_open() {
            return MutationOutcome::NothingToSubmit;
        }
        let name = match self.category_dialog.draft().submit() {
            Ok(name) => name,
            Err(err) => return MutationOutcome::Invalid(err),
        };

        self.notifier.pending(SAVING_CATEGORY);
        match self.api.create_category(&name).await {
            Ok(category) => {
                info!(id = category.id, name = %category.name, "Category created");
                let name = category.name;
                self.notifier
                    .success(&format!("Category \"{name}\" created successfully!"));
                self.category_dialog.close();
                self.refetch_after_mutation().await;
                MutationOutcome::Succeeded { name }
            }
            Err(err) => self.report_failure(err, CREATE_CATEGORY_FAILED),
        }
    }

    // =========================================================================
    // Product Mutations
    // =========================================================================

    /// Opens the product dialog with an empty draft.
    pub fn open_new_product(&mut self) -> &mut ProductDraft {
        self.product_dialog.open_new()
    }

    /// Opens the product dialog seeded from a loaded product.
    ///
    /// Returns `None` when no product with that id is in the session.
    pub fn open_edit_product(&mut self, id: i64) -> Option<&mut ProductDraft> {
        let product = self.session.find_product(id)?;
        Some(self.product_dialog.open_edit(product))
    }

    pub fn close_product_dialog(&mut self) {
        self.product_dialog.close();
    }

    pub fn product_dialog(&self) -> &ProductDialog {
        &self.product_dialog
    }

    pub fn product_draft_mut(&mut self) -> Option<&mut ProductDraft> {
        self.product_dialog.draft_mut()
    }

    /// Creates or updates a product from the open dialog's draft.
    pub async fn submit_product(&mut self) -> MutationOutcome {
        let mode = self.product_dialog.mode();
        if mode == ProductDialogMode::Closed {
            return MutationOutcome::NothingToSubmit;
        }
        let payload = match self.product_dialog.draft().submit() {
            Ok(payload) => payload,
            Err(err) => {
                debug!(error = %err, "Product draft incomplete");
                return MutationOutcome::Invalid(err);
            }
        };

        self.notifier.pending(SAVING_PRODUCT);
        let result = match mode {
            ProductDialogMode::Editing(id) => self.api.update_product(id, &payload).await,
            _ => self.api.create_product(&payload).await,
        };

        match result {
            Ok(product) => {
                info!(id = product.id, ?mode, "Product saved");
                let name = product.name;
                self.notifier
                    .success(&format!("Product \"{name}\" saved successfully!"));
                self.product_dialog.close();
                self.refetch_after_mutation().await;
                MutationOutcome::Succeeded { name }
            }
            Err(err) => self.report_failure(err, SAVE_PRODUCT_FAILED),
        }
    }

    /// Deletes a product after the confirmation gate agrees.
    ///
    /// A declined confirmation sends nothing and changes nothing.
    pub async fn delete_product(&mut self, id: i64) -> MutationOutcome {
        if !self.gate.confirm(CONFIRM_DELETE) {
            debug!(id, "Delete declined");
            return MutationOutcome::Declined;
        }

        let name = self
            .session
            .find_product(id)
            .map(|p| p.name.clone())
            .unwrap_or_else(|| format!("#{id}"));

        self.notifier.pending(DELETING_PRODUCT);
        match self.api.delete_product(id).await {
            Ok(()) => {
                info!(id, "Product deleted");
                self.notifier
                    .success(&format!("Product \"{name}\" deleted successfully!"));
                self.refetch_after_mutation().await;
                MutationOutcome::Succeeded { name }
            }
            Err(err) => self.report_failure(err, DELETE_PRODUCT_FAILED),
        }
    }

    // =========================================================================
    // Alerts (read-only, outside the mutation flow)
    // =========================================================================

    pub async fn low_stock_alerts(&self) -> ApiResult<Vec<Product>> {
        let products = self.api.list_low_stock_products().await?;
        debug!(count = products.len(), "Low stock alerts fetched");
        Ok(products)
    }

    pub async fn expired_alerts(&self) -> ApiResult<Vec<Product>> {
        let products = self.api.list_expired_products().await?;
        debug!(count = products.len(), "Expired product alerts fetched");
        Ok(products)
    }

    // =========================================================================
    // Views
    // =========================================================================

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn is_loading(&self) -> bool {
        self.session.is_loading()
    }

    pub fn categories(&self) -> &[Category] {
        self.session.categories()
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.filter.set_search(term);
    }

    pub fn select_category(&mut self, name: impl Into<String>) {
        self.filter.select_category(name);
    }

    /// Products matching the current filter.
    pub fn visible_products(&self) -> Vec<&Product> {
        self.session.filtered(&self.filter)
    }

    /// Statistics over the whole inventory, ignoring the filter.
    pub fn stats(&self) -> DashboardStats {
        self.session.stats()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
