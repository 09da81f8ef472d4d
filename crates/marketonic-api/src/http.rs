//! # HTTP Inventory Client
//!
//! [`InventoryApi`] over the backend's REST endpoints, using `reqwest`.
//!
//! ## Request Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  call ──► build request ──► send ──┬── transport error ──► Network /   │
//! │                                    │                       Timeout     │
//! │                                    ▼                                    │
//! │                              status 2xx? ──no──► read body             │
//! │                                    │             `message` field?      │
//! │                                   yes            ──► Status{message}   │
//! │                                    ▼                                    │
//! │                              decode JSON ──fail──► InvalidResponse     │
//! │                                    │                                    │
//! │                                    ▼                                    │
//! │                          wire records ──► domain types                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! There is no retry and no client-side timeout unless `api.timeout_secs`
//! is configured.

use std::time::Instant;

use async_trait::async_trait;
use marketonic_core::{Category, Product, ProductPayload};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::client::InventoryApi;
use crate::config::ClientConfig;
use crate::error::{ApiError, ApiResult, ConfigError, ConfigResult};
use crate::wire::{CategoryRecord, ErrorBody, NewCategoryBody, ProductBody, ProductRecord};

const CATEGORIES: &str = "/categorias";
const PRODUCTS: &str = "/produtos";
const LOW_STOCK_ALERTS: &str = "/produtos/alertas/estoque-baixo";
const EXPIRED_ALERTS: &str = "/produtos/alertas/vencidos";

/// REST client for the inventory backend.
#[derive(Debug, Clone)]
pub struct HttpInventoryApi {
    client: Client,
    base_url: String,
}

impl HttpInventoryApi {
    /// Builds a client from a configuration, validating it first.
    pub fn new(config: &ClientConfig) -> ConfigResult<Self> {
        config.validate()?;

        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| ConfigError::InvalidValue {
            field: "api",
            reason: e.to_string(),
        })?;

        Ok(HttpInventoryApi {
            client,
            base_url: config.base_url().to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client
            .request(method, format!("{}{}", self.base_url, path))
    }

    /// Sends a request and turns non-2xx answers into [`ApiError::Status`].
    async fn send(&self, method: Method, path: &str, request: RequestBuilder) -> ApiResult<Response> {
        let started = Instant::now();
        let result = request.send().await;
        let elapsed_ms = started.elapsed().as_millis() as u64;

        let response = match result {
            Ok(response) => response,
            Err(err) => {
                let err = ApiError::from(err);
                warn!(%method, path, elapsed_ms, error = %err, retryable = err.is_retryable(), "Request failed");
                return Err(err);
            }
        };

        let status = response.status();
        if status.is_success() {
            debug!(%method, path, status = status.as_u16(), elapsed_ms, "Request completed");
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let err = ApiError::Status {
            status: status.as_u16(),
            message: ErrorBody::message_from(&body),
        };
        warn!(%method, path, status = status.as_u16(), elapsed_ms, error = %err, "Request rejected");
        Err(err)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let response = self
            .send(Method::GET, path, self.request(Method::GET, path))
            .await?;
        decode(response).await
    }

    async fn list_products_at(&self, path: &str) -> ApiResult<Vec<Product>> {
        let records: Vec<ProductRecord> = self.get_json(path).await?;
        Ok(records.into_iter().map(Product::from).collect())
    }

    async fn write_product(&self, method: Method, path: &str, payload: &ProductPayload) -> ApiResult<Product> {
        let request = self
            .request(method.clone(), path)
            .json(&ProductBody::from(payload));
        let response = self.send(method, path, request).await?;
        let record: ProductRecord = decode(response).await?;
        Ok(record.into())
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| ApiError::InvalidResponse(e.to_string()))
}

// =============================================================================
// InventoryApi Implementation
// =============================================================================

#[async_trait]
impl InventoryApi for HttpInventoryApi {
    async fn list_categories(&self) -> ApiResult<Vec<Category>> {
        let records: Vec<CategoryRecord> = self.get_json(CATEGORIES).await?;
        Ok(records.into_iter().map(Category::from).collect())
    }

    async fn create_category(&self, name: &str) -> ApiResult<Category> {
        let request = self
            .request(Method::POST, CATEGORIES)
            .json(&NewCategoryBody { name });
        let response = self.send(Method::POST, CATEGORIES, request).await?;
        let record: CategoryRecord = decode(response).await?;
        Ok(record.into())
    }

    async fn list_products(&self) -> ApiResult<Vec<Product>> {
        self.list_products_at(PRODUCTS).await
    }

    async fn create_product(&self, payload: &ProductPayload) -> ApiResult<Product> {
        self.write_product(Method::POST, PRODUCTS, payload).await
    }

    async fn update_product(&self, id: i64, payload: &ProductPayload) -> ApiResult<Product> {
        let path = format!("{PRODUCTS}/{id}");
        self.write_product(Method::PUT, &path, payload).await
    }

    async fn delete_product(&self, id: i64) -> ApiResult<()> {
        let path = format!("{PRODUCTS}/{id}");
        self.send(Method::DELETE, &path, self.request(Method::DELETE, &path))
            .await?;
        Ok(())
    }

    async fn list_low_stock_products(&self) -> ApiResult<Vec<Product>> {
        self.list_products_at(LOW_STOCK_ALERTS).await
    }

    async fn list_expired_products(&self) -> ApiResult<Vec<Product>> {
        self.list_products_at(EXPIRED_ALERTS).await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::{Path, State};
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use axum::routing::{delete, get, post, put};
    use axum::{Json, Router};
    use marketonic_core::StockStatus;
    use serde_json::{json, Value};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    /// Request bodies seen by the fake backend.
    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<Value>>>);

    impl Captured {
        fn bodies(&self) -> Vec<Value> {
            self.0.lock().unwrap().clone()
        }
    }

    async fn serve(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    async fn client_for(app: Router) -> HttpInventoryApi {
        let base_url = serve(app).await;
        HttpInventoryApi::new(&ClientConfig::with_base_url(base_url)).unwrap()
    }

    fn product_json(id: i64, name: &str, qty: i64) -> Value {
        json!({
            "id": id,
            "nome": name,
            "descricao": "Integral",
            "preco": 4.5,
            "quantidadeEmEstoque": qty,
            "dataDeValidade": "2025-12-31T00:00:00",
            "categoria": { "id": 1, "nome": "Laticínios" }
        })
    }

    fn payload(category_id: Option<i64>) -> ProductPayload {
        ProductPayload {
            name: "Leite".into(),
            description: String::new(),
            price: Some(4.5),
            stock_quantity: Some(12),
            expiration_date: "2025-12-31".into(),
            category_id,
        }
    }

    #[tokio::test]
    async fn test_list_products_maps_wire_fields() {
        let api = client_for(Router::new().route(
            "/produtos",
            get(|| async { Json(json!([product_json(1, "Leite", 12), product_json(2, "Manteiga", 0)])) }),
        ))
        .await;

        let products = api.list_products().await.unwrap();
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].name, "Leite");
        assert_eq!(products[0].price.cents(), 450);
        assert_eq!(products[0].stock_status(), StockStatus::InStock);
        assert_eq!(products[0].expiration_date.unwrap().to_string(), "2025-12-31");
        assert_eq!(products[1].stock_status(), StockStatus::OutOfStock);
    }

    #[tokio::test]
    async fn test_list_categories() {
        let api = client_for(Router::new().route(
            "/categorias",
            get(|| async { Json(json!([{ "id": 1, "nome": "Laticínios" }, { "id": 2, "nome": "Padaria" }])) }),
        ))
        .await;

        let categories = api.list_categories().await.unwrap();
        assert_eq!(
            categories,
            vec![Category::new(1, "Laticínios"), Category::new(2, "Padaria")]
        );
    }

    #[tokio::test]
    async fn test_create_category_sends_nome() {
        let captured = Captured::default();
        let app = Router::new()
            .route(
                "/categorias",
                post(|State(seen): State<Captured>, Json(body): Json<Value>| async move {
                    seen.0.lock().unwrap().push(body.clone());
                    (StatusCode::CREATED, Json(json!({ "id": 9, "nome": body["nome"] })))
                }),
            )
            .with_state(captured.clone());
        let api = client_for(app).await;

        let category = api.create_category("Dairy").await.unwrap();
        assert_eq!(category, Category::new(9, "Dairy"));
        assert_eq!(captured.bodies(), vec![json!({ "nome": "Dairy" })]);
    }

    #[tokio::test]
    async fn test_create_product_body() {
        let captured = Captured::default();
        let app = Router::new()
            .route(
                "/produtos",
                post(|State(seen): State<Captured>, Json(body): Json<Value>| async move {
                    seen.0.lock().unwrap().push(body);
                    Json(product_json(30, "Leite", 12))
                }),
            )
            .with_state(captured.clone());
        let api = client_for(app).await;

        let created = api.create_product(&payload(Some(1))).await.unwrap();
        assert_eq!(created.id, 30);

        let body = &captured.bodies()[0];
        assert_eq!(body["nome"], "Leite");
        assert_eq!(body["preco"], 4.5);
        assert_eq!(body["quantidadeEmEstoque"], 12);
        assert_eq!(body["dataDeValidade"], "2025-12-31");
        assert_eq!(body["categoria"], json!({ "id": 1 }));
    }

    #[tokio::test]
    async fn test_update_product_uses_id_path() {
        let app = Router::new().route(
            "/produtos/{id}",
            put(|Path(id): Path<i64>, Json(body): Json<Value>| async move {
                let mut record = product_json(id, "Leite", 3);
                record["nome"] = body["nome"].clone();
                Json(record)
            }),
        );
        let api = client_for(app).await;

        let updated = api.update_product(42, &payload(Some(1))).await.unwrap();
        assert_eq!(updated.id, 42);
        assert_eq!(updated.stock_status(), StockStatus::LowStock);
    }

    #[tokio::test]
    async fn test_delete_and_server_message() {
        let app = Router::new().route(
            "/produtos/{id}",
            delete(|Path(id): Path<i64>| async move {
                if id == 1 {
                    StatusCode::NO_CONTENT.into_response()
                } else {
                    (
                        StatusCode::NOT_FOUND,
                        Json(json!({ "message": "Produto não encontrado" })),
                    )
                        .into_response()
                }
            }),
        );
        let api = client_for(app).await;

        api.delete_product(1).await.unwrap();

        let err = api.delete_product(2).await.unwrap_err();
        assert_eq!(err, ApiError::status(404, "Produto não encontrado"));
        assert_eq!(err.server_message(), Some("Produto não encontrado"));
    }

    #[tokio::test]
    async fn test_error_without_message() {
        let app = Router::new().route(
            "/produtos",
            post(|| async { (StatusCode::BAD_REQUEST, "bad request") }),
        );
        let api = client_for(app).await;

        let err = api.create_product(&payload(None)).await.unwrap_err();
        assert_eq!(
            err,
            ApiError::Status {
                status: 400,
                message: None
            }
        );
    }

    #[tokio::test]
    async fn test_alert_endpoints() {
        let app = Router::new()
            .route(
                "/produtos/alertas/estoque-baixo",
                get(|| async { Json(json!([product_json(5, "Queijo", 2)])) }),
            )
            .route(
                "/produtos/alertas/vencidos",
                get(|| async { Json(json!([product_json(6, "Iogurte", 0), product_json(7, "Creme", 20)])) }),
            );
        let api = client_for(app).await;

        let low = api.list_low_stock_products().await.unwrap();
        assert_eq!(low.iter().map(|p| p.id).collect::<Vec<_>>(), vec![5]);

        let expired = api.list_expired_products().await.unwrap();
        assert_eq!(expired.iter().map(|p| p.id).collect::<Vec<_>>(), vec![6, 7]);
    }

    #[tokio::test]
    async fn test_undecodable_body() {
        let app = Router::new().route("/produtos", get(|| async { Json(json!({ "unexpected": true })) }));
        let api = client_for(app).await;

        let err = api.list_products().await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidResponse(_)));
        assert!(!err.is_retryable());
    }

    #[tokio::test]
    async fn test_connection_refused() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let api = HttpInventoryApi::new(&ClientConfig::with_base_url(format!("http://{addr}"))).unwrap();
        let err = api.list_categories().await.unwrap_err();
        assert!(matches!(err, ApiError::Network(_)));
        assert_eq!(err.server_message(), None);
    }

    #[tokio::test]
    async fn test_configured_timeout() {
        let app = Router::new().route(
            "/categorias",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(3)).await;
                Json(json!([]))
            }),
        );
        let base_url = serve(app).await;

        let mut config = ClientConfig::with_base_url(base_url);
        config.api.timeout_secs = Some(1);
        let api = HttpInventoryApi::new(&config).unwrap();

        assert_eq!(api.list_categories().await.unwrap_err(), ApiError::Timeout);
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = ClientConfig::with_base_url("localhost:8080");
        assert!(HttpInventoryApi::new(&config).is_err());

        let api = HttpInventoryApi::new(&ClientConfig::with_base_url("http://localhost:8080/")).unwrap();
        assert_eq!(api.base_url(), "http://localhost:8080");
    }
}
