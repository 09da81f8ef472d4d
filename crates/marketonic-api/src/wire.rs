//! # Wire Records
//!
//! JSON shapes exchanged with the inventory backend. Field names on the wire
//! are Portuguese; everything past this module uses the domain types.
//!
//! ## Mapping
//! ```text
//! ┌──────────────────────────────┬──────────────────────────────────────────┐
//! │  wire                        │  domain                                  │
//! ├──────────────────────────────┼──────────────────────────────────────────┤
//! │  nome                        │  name                                    │
//! │  descricao (nullable)        │  description ("" when null)              │
//! │  preco (decimal)             │  price (Money, cents)                    │
//! │  quantidadeEmEstoque         │  stock_quantity (+ derived stock_status) │
//! │  dataDeValidade (ISO)        │  expiration_date (date part only)        │
//! │  categoria { id, nome }      │  category                                │
//! └──────────────────────────────┴──────────────────────────────────────────┘
//! ```

use marketonic_core::form::parse_date;
use marketonic_core::{Category, Money, Product, ProductPayload};
use serde::{Deserialize, Serialize};
use tracing::debug;

// =============================================================================
// Inbound Records
// =============================================================================

/// A category as returned by `/categorias`.
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryRecord {
    pub id: i64,
    #[serde(rename = "nome")]
    pub name: String,
}

impl From<CategoryRecord> for Category {
    fn from(record: CategoryRecord) -> Self {
        Category::new(record.id, record.name)
    }
}

/// A product as returned by `/produtos`. Carries no stock status.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductRecord {
    pub id: i64,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "descricao", default)]
    pub description: Option<String>,
    #[serde(rename = "preco")]
    pub price: f64,
    #[serde(rename = "quantidadeEmEstoque")]
    pub stock_quantity: i64,
    /// ISO date or date-time.
    #[serde(rename = "dataDeValidade", default)]
    pub expiration_date: Option<String>,
    #[serde(rename = "categoria")]
    pub category: CategoryRecord,
}

impl From<ProductRecord> for Product {
    fn from(record: ProductRecord) -> Self {
        let expiration_date = record.expiration_date.as_deref().and_then(|raw| {
            let parsed = parse_date(raw);
            if parsed.is_none() {
                debug!(id = record.id, raw, "Unreadable expiration date, leaving it empty");
            }
            parsed
        });

        Product::new(
            record.id,
            record.name,
            record.description.unwrap_or_default(),
            Money::from_decimal(record.price),
            record.stock_quantity,
            expiration_date,
            record.category.into(),
        )
    }
}

/// JSON error body. Only `message` is read.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorBody {
    /// Extracts a non-empty `message` from a raw error body.
    pub fn message_from(body: &str) -> Option<String> {
        serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|parsed| parsed.message)
            .filter(|message| !message.trim().is_empty())
    }
}

// =============================================================================
// Outbound Bodies
// =============================================================================

/// `POST /categorias` body.
#[derive(Debug, Serialize)]
pub struct NewCategoryBody<'a> {
    #[serde(rename = "nome")]
    pub name: &'a str,
}

/// Category reference inside a product body.
#[derive(Debug, Serialize)]
pub struct CategoryRef {
    pub id: Option<i64>,
}

/// `POST /produtos` and `PUT /produtos/{id}` body.
#[derive(Debug, Serialize)]
pub struct ProductBody<'a> {
    #[serde(rename = "nome")]
    pub name: &'a str,
    #[serde(rename = "descricao")]
    pub description: &'a str,
    #[serde(rename = "preco")]
    pub price: Option<f64>,
    #[serde(rename = "quantidadeEmEstoque")]
    pub stock_quantity: Option<i64>,
    #[serde(rename = "dataDeValidade")]
    pub expiration_date: &'a str,
    #[serde(rename = "categoria")]
    pub category: CategoryRef,
}

impl<'a> From<&'a ProductPayload> for ProductBody<'a> {
    fn from(payload: &'a ProductPayload) -> Self {
        ProductBody {
            name: &payload.name,
            description: &payload.description,
            price: payload.price,
            stock_quantity: payload.stock_quantity,
            expiration_date: &payload.expiration_date,
            category: CategoryRef {
                id: payload.category_id,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use marketonic_core::StockStatus;
    use serde_json::json;

    #[test]
    fn test_product_record_to_domain() {
        let record: ProductRecord = serde_json::from_value(json!({
            "id": 11,
            "nome": "Iogurte",
            "descricao": null,
            "preco": 3.99,
            "quantidadeEmEstoque": 4,
            "dataDeValidade": "2025-02-10T00:00:00",
            "categoria": { "id": 2, "nome": "Laticínios" }
        }))
        .unwrap();

        let product = Product::from(record);
        assert_eq!(product.id, 11);
        assert_eq!(product.name, "Iogurte");
        assert_eq!(product.description, "");
        assert_eq!(product.price.cents(), 399);
        assert_eq!(product.stock_status(), StockStatus::LowStock);
        assert_eq!(product.expiration_date, NaiveDate::from_ymd_opt(2025, 2, 10));
        assert_eq!(product.category, Category::new(2, "Laticínios"));
    }

    #[test]
    fn test_missing_optional_fields() {
        let record: ProductRecord = serde_json::from_value(json!({
            "id": 1,
            "nome": "Sal",
            "preco": 2,
            "quantidadeEmEstoque": 50,
            "categoria": { "id": 5, "nome": "Mercearia" }
        }))
        .unwrap();

        let product = Product::from(record);
        assert_eq!(product.expiration_date, None);
        assert_eq!(product.price.cents(), 200);
        assert_eq!(product.stock_status(), StockStatus::InStock);
    }

    #[test]
    fn test_product_body_shape() {
        let payload = ProductPayload {
            name: "Queijo".into(),
            description: "Minas".into(),
            price: None,
            stock_quantity: Some(8),
            expiration_date: "2025-04-01".into(),
            category_id: Some(3),
        };

        let value = serde_json::to_value(ProductBody::from(&payload)).unwrap();
        assert_eq!(
            value,
            json!({
                "nome": "Queijo",
                "descricao": "Minas",
                "preco": null,
                "quantidadeEmEstoque": 8,
                "dataDeValidade": "2025-04-01",
                "categoria": { "id": 3 }
            })
        );
    }

    #[test]
    fn test_error_body_message() {
        assert_eq!(
            ErrorBody::message_from(r#"{"message":"Produto não encontrado"}"#),
            Some("Produto não encontrado".to_string())
        );
        assert_eq!(ErrorBody::message_from(r#"{"message":""}"#), None);
        assert_eq!(ErrorBody::message_from(r#"{"error":"x"}"#), None);
        assert_eq!(ErrorBody::message_from("<html>502</html>"), None);
    }
}
