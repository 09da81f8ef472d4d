//! # In-Memory Inventory Backend
//!
//! [`MockApi`] behaves like the real backend closely enough for session
//! tests: ids are assigned on create, unknown ids and missing fields are
//! rejected with a status and message, and every call is logged.
//!
//! Failures can be queued with [`MockApi::fail_next`]; the next call of any
//! kind consumes one and returns it without touching the data.

use std::collections::VecDeque;

use async_trait::async_trait;
use chrono::NaiveDate;
use marketonic_core::form::parse_date;
use marketonic_core::{Category, Money, Product, ProductPayload, LOW_STOCK_THRESHOLD};
use tokio::sync::Mutex;

use crate::client::InventoryApi;
use crate::error::{ApiError, ApiResult};

/// One recorded call.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiCall {
    ListCategories,
    CreateCategory(String),
    ListProducts,
    CreateProduct(ProductPayload),
    UpdateProduct(i64, ProductPayload),
    DeleteProduct(i64),
    ListLowStock,
    ListExpired,
}

impl ApiCall {
    /// True for calls that change server data.
    pub fn is_write(&self) -> bool {
        matches!(
            self,
            ApiCall::CreateCategory(_)
                | ApiCall::CreateProduct(_)
                | ApiCall::UpdateProduct(..)
                | ApiCall::DeleteProduct(_)
        )
    }
}

#[derive(Debug)]
struct MockState {
    categories: Vec<Category>,
    products: Vec<Product>,
    next_id: i64,
    calls: Vec<ApiCall>,
    failures: VecDeque<ApiError>,
    today: NaiveDate,
    normalize: Option<fn(String) -> String>,
}

impl MockState {
    /// Logs the call and pops a queued failure, if any.
    fn begin(&mut self, call: ApiCall) -> ApiResult<()> {
        self.calls.push(call);
        match self.failures.pop_front() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// The name as the server would store it.
    fn stored_name(&self, name: &str) -> String {
        match self.normalize {
            Some(normalize) => normalize(name.to_string()),
            None => name.to_string(),
        }
    }

    fn assign_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn build_product(&self, id: i64, payload: &ProductPayload) -> ApiResult<Product> {
        let price = payload
            .price
            .ok_or_else(|| ApiError::status(400, "Preço inválido"))?;
        let stock_quantity = payload
            .stock_quantity
            .ok_or_else(|| ApiError::status(400, "Quantidade em estoque inválida"))?;
        let expiration_date = parse_date(&payload.expiration_date)
            .ok_or_else(|| ApiError::status(400, "Data de validade inválida"))?;
        let category = payload
            .category_id
            .and_then(|category_id| self.categories.iter().find(|c| c.id == category_id))
            .cloned()
            .ok_or_else(|| ApiError::status(404, "Categoria não encontrada"))?;

        Ok(Product::new(
            id,
            self.stored_name(&payload.name),
            payload.description.clone(),
            Money::from_decimal(price),
            stock_quantity,
            Some(expiration_date),
            category,
        ))
    }

    fn product_index(&self, id: i64) -> ApiResult<usize> {
        self.products
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| ApiError::status(404, "Produto não encontrado"))
    }
}

/// In-memory [`InventoryApi`] for tests.
#[derive(Debug)]
pub struct MockApi {
    state: Mutex<MockState>,
}

impl Default for MockApi {
    fn default() -> Self {
        Self::new()
    }
}

impl MockApi {
    pub fn new() -> Self {
        MockApi {
            state: Mutex::new(MockState {
                categories: Vec::new(),
                products: Vec::new(),
                next_id: 0,
                calls: Vec::new(),
                failures: VecDeque::new(),
                today: chrono::Local::now().date_naive(),
                normalize: None,
            }),
        }
    }

    // =========================================================================
    // Seeding (not logged)
    // =========================================================================

    pub async fn add_category(&self, name: &str) -> Category {
        let mut state = self.state.lock().await;
        let category = Category::new(state.assign_id(), name);
        state.categories.push(category.clone());
        category
    }

    pub async fn add_product(
        &self,
        name: &str,
        price: Money,
        stock_quantity: i64,
        expiration_date: Option<NaiveDate>,
        category: &Category,
    ) -> Product {
        let mut state = self.state.lock().await;
        let product = Product::new(
            state.assign_id(),
            name,
            "",
            price,
            stock_quantity,
            expiration_date,
            category.clone(),
        );
        state.products.push(product.clone());
        product
    }

    /// Date the expired-products query compares against.
    pub async fn set_today(&self, today: NaiveDate) {
        self.state.lock().await.today = today;
    }

    /// Rewrites names on create and update, like a backend that normalizes
    /// what it stores.
    pub async fn normalize_names_with(&self, normalize: fn(String) -> String) {
        self.state.lock().await.normalize = Some(normalize);
    }

    // =========================================================================
    // Failure Injection
    // =========================================================================

    /// Queues an error for the next call.
    pub async fn fail_next(&self, err: ApiError) {
        self.state.lock().await.failures.push_back(err);
    }

    // =========================================================================
    // Inspection
    // =========================================================================

    pub async fn calls(&self) -> Vec<ApiCall> {
        self.state.lock().await.calls.clone()
    }

    pub async fn write_calls(&self) -> Vec<ApiCall> {
        self.state
            .lock()
            .await
            .calls
            .iter()
            .filter(|call| call.is_write())
            .cloned()
            .collect()
    }

    pub async fn clear_calls(&self) {
        self.state.lock().await.calls.clear();
    }

    pub async fn stored_products(&self) -> Vec<Product> {
        self.state.lock().await.products.clone()
    }

    pub async fn stored_categories(&self) -> Vec<Category> {
        self.state.lock().await.categories.clone()
    }
}

#[async_trait]
impl InventoryApi for MockApi {
    async fn list_categories(&self) -> ApiResult<Vec<Category>> {
        let mut state = self.state.lock().await;
        state.begin(ApiCall::ListCategories)?;
        Ok(state.categories.clone())
    }

    async fn create_category(&self, name: &str) -> ApiResult<Category> {
        let mut state = self.state.lock().await;
        state.begin(ApiCall::CreateCategory(name.to_string()))?;
        let name = state.stored_name(name);
        if state.categories.iter().any(|c| c.name == name) {
            return Err(ApiError::status(409, "Categoria já existe"));
        }
        let category = Category::new(state.assign_id(), name);
        state.categories.push(category.clone());
        Ok(category)
    }

    async fn list_products(&self) -> ApiResult<Vec<Product>> {
        let mut state = self.state.lock().await;
        state.begin(ApiCall::ListProducts)?;
        Ok(state.products.clone())
    }

    async fn create_product(&self, payload: &ProductPayload) -> ApiResult<Product> {
        let mut state = self.state.lock().await;
        state.begin(ApiCall::CreateProduct(payload.clone()))?;
        let product = state.build_product(state.next_id + 1, payload)?;
        state.assign_id();
        state.products.push(product.clone());
        Ok(product)
    }

    async fn update_product(&self, id: i64, payload: &ProductPayload) -> ApiResult<Product> {
        let mut state = self.state.lock().await;
        state.begin(ApiCall::UpdateProduct(id, payload.clone()))?;
        let index = state.product_index(id)?;
        let product = state.build_product(id, payload)?;
        state.products[index] = product.clone();
        Ok(product)
    }

    async fn delete_product(&self, id: i64) -> ApiResult<()> {
        let mut state = self.state.lock().await;
        state.begin(ApiCall::DeleteProduct(id))?;
        let index = state.product_index(id)?;
        state.products.remove(index);
        Ok(())
    }

    async fn list_low_stock_products(&self) -> ApiResult<Vec<Product>> {
        let mut state = self.state.lock().await;
        state.begin(ApiCall::ListLowStock)?;
        Ok(state
            .products
            .iter()
            .filter(|p| p.stock_quantity < LOW_STOCK_THRESHOLD)
            .cloned()
            .collect())
    }

    async fn list_expired_products(&self) -> ApiResult<Vec<Product>> {
        let mut state = self.state.lock().await;
        state.begin(ApiCall::ListExpired)?;
        let today = state.today;
        Ok(state
            .products
            .iter()
            .filter(|p| p.is_expired(today) || p.stock_quantity <= 0)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(name: &str, category_id: Option<i64>) -> ProductPayload {
        ProductPayload {
            name: name.into(),
            description: String::new(),
            price: Some(2.0),
            stock_quantity: Some(5),
            expiration_date: "2030-01-01".into(),
            category_id,
        }
    }

    #[tokio::test]
    async fn test_create_assigns_ids_and_logs() {
        let api = MockApi::new();
        let dairy = api.create_category("Dairy").await.unwrap();
        let milk = api.create_product(&payload("Milk", Some(dairy.id))).await.unwrap();

        assert_ne!(dairy.id, milk.id);
        assert_eq!(milk.category, dairy);
        assert_eq!(api.stored_products().await, vec![milk]);
        assert_eq!(api.write_calls().await.len(), 2);
    }

    #[tokio::test]
    async fn test_rejects_like_the_server() {
        let api = MockApi::new();

        let err = api.create_product(&payload("Milk", Some(99))).await.unwrap_err();
        assert_eq!(err.server_message(), Some("Categoria não encontrada"));

        let err = api.delete_product(7).await.unwrap_err();
        assert_eq!(err, ApiError::status(404, "Produto não encontrado"));

        api.create_category("Dairy").await.unwrap();
        let err = api.create_category("Dairy").await.unwrap_err();
        assert_eq!(err.server_message(), Some("Categoria já existe"));
    }

    #[tokio::test]
    async fn test_queued_failure_is_consumed_once() {
        let api = MockApi::new();
        api.fail_next(ApiError::Timeout).await;

        assert_eq!(api.list_products().await, Err(ApiError::Timeout));
        assert_eq!(api.list_products().await, Ok(Vec::new()));
        assert_eq!(api.calls().await, vec![ApiCall::ListProducts, ApiCall::ListProducts]);
    }

    #[tokio::test]
    async fn test_alert_queries() {
        let api = MockApi::new();
        api.set_today(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()).await;
        let dairy = api.add_category("Dairy").await;
        let price = Money::from_cents(100);
        let fresh = api
            .add_product("Fresh", price, 50, NaiveDate::from_ymd_opt(2025, 7, 1), &dairy)
            .await;
        let scarce = api.add_product("Scarce", price, 3, None, &dairy).await;
        let stale = api
            .add_product("Stale", price, 40, NaiveDate::from_ymd_opt(2025, 5, 1), &dairy)
            .await;
        let gone = api.add_product("Gone", price, 0, None, &dairy).await;

        let low: Vec<i64> = api.list_low_stock_products().await.unwrap().iter().map(|p| p.id).collect();
        assert_eq!(low, vec![scarce.id, gone.id]);

        let expired: Vec<i64> = api.list_expired_products().await.unwrap().iter().map(|p| p.id).collect();
        assert_eq!(expired, vec![stale.id, gone.id]);
        assert!(!expired.contains(&fresh.id));
    }

    #[tokio::test]
    async fn test_normalized_names_are_returned() {
        let api = MockApi::new();
        api.normalize_names_with(|name| name.to_uppercase()).await;

        let dairy = api.create_category("dairy").await.unwrap();
        assert_eq!(dairy.name, "DAIRY");
        let milk = api.create_product(&payload("milk", Some(dairy.id))).await.unwrap();
        assert_eq!(milk.name, "MILK");

        let err = api.create_category("Dairy").await.unwrap_err();
        assert_eq!(err.server_message(), Some("Categoria já existe"));
    }
}
