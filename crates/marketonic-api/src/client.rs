//! # Inventory API Seam
//!
//! The operations the dashboard needs from the backend, as a trait so the
//! session layer can run against the real HTTP client or an in-memory mock.

use async_trait::async_trait;
use marketonic_core::{Category, Product, ProductPayload};

use crate::error::ApiResult;

/// Remote inventory operations.
///
/// Every call resolves with the typed payload or an [`ApiError`](crate::ApiError).
/// Nothing is retried.
///
/// ## Endpoints
/// ```text
/// list_categories          GET    /categorias
/// create_category          POST   /categorias
/// list_products            GET    /produtos
/// create_product           POST   /produtos
/// update_product           PUT    /produtos/{id}
/// delete_product           DELETE /produtos/{id}
/// list_low_stock_products  GET    /produtos/alertas/estoque-baixo
/// list_expired_products    GET    /produtos/alertas/vencidos
/// ```
#[async_trait]
pub trait InventoryApi: Send + Sync {
    async fn list_categories(&self) -> ApiResult<Vec<Category>>;

    /// Creates a category; the server assigns the id.
    async fn create_category(&self, name: &str) -> ApiResult<Category>;

    async fn list_products(&self) -> ApiResult<Vec<Product>>;

    async fn create_product(&self, payload: &ProductPayload) -> ApiResult<Product>;

    async fn update_product(&self, id: i64, payload: &ProductPayload) -> ApiResult<Product>;

    async fn delete_product(&self, id: i64) -> ApiResult<()>;

    /// Products the server considers low on stock.
    async fn list_low_stock_products(&self) -> ApiResult<Vec<Product>>;

    /// Products past their expiration date or otherwise unavailable.
    async fn list_expired_products(&self) -> ApiResult<Vec<Product>>;
}
