//! # Text Rendering
//!
//! Plain-text versions of the dashboard's cards and lists.
//!
//! ```text
//!   Total products    3
//!   Low stock         1
//!   Out of stock      1
//!   Inventory value   R$ 54.00
//!
//!   Products (2)
//!   #1  Whole Milk  [In stock]
//!       R$ 4.50 · 12 in stock · expires 2025-12-31 · Dairy
//!       Fresh, 1L
//! ```

use chrono::NaiveDate;
use marketonic_core::{Category, DashboardStats, FilterState, Product};
use serde::Serialize;

pub const NO_DESCRIPTION: &str = "No description";
pub const NO_PRODUCTS: &str = "No products found";
pub const NO_PRODUCTS_HINT: &str = "Try adjusting the search or the category filter.";
pub const EMPTY_INVENTORY_HINT: &str = "Add one with `marketonic add-product`.";

/// Renders with a currency symbol and a reference date for expiry markers.
#[derive(Debug, Clone)]
pub struct Renderer {
    currency: String,
    today: NaiveDate,
}

impl Renderer {
    pub fn new(currency: impl Into<String>, today: NaiveDate) -> Self {
        Renderer {
            currency: currency.into(),
            today,
        }
    }

    pub fn stats(&self, stats: &DashboardStats) -> String {
        [
            format!("Total products    {}", stats.total_products),
            format!("Low stock         {}", stats.low_stock_count),
            format!("Out of stock      {}", stats.out_of_stock_count),
            format!(
                "Inventory value   {}",
                stats.total_inventory_value.display_with(&self.currency)
            ),
        ]
        .join("\n")
    }

    /// The filtered list under a "Products (n)" header.
    ///
    /// An empty list suggests loosening `filter`, or adding a product when
    /// nothing is filtered out.
    pub fn products(&self, products: &[&Product], filter: &FilterState) -> String {
        let header = format!("Products ({})", products.len());
        if products.is_empty() {
            let hint = if filter.is_unfiltered() {
                EMPTY_INVENTORY_HINT
            } else {
                NO_PRODUCTS_HINT
            };
            return format!("{header}\n  {NO_PRODUCTS}\n  {hint}");
        }
        self.product_section(&header, products)
    }

    /// A titled list without the empty-filter hint.
    pub fn alert_list(&self, title: &str, products: &[&Product]) -> String {
        if products.is_empty() {
            return format!("{title}\n  Nothing to report.");
        }
        self.product_section(title, products)
    }

    fn product_section(&self, header: &str, products: &[&Product]) -> String {
        let mut lines = vec![header.to_string()];
        for product in products {
            lines.extend(self.product(product));
        }
        lines.join("\n")
    }

    fn product(&self, product: &Product) -> [String; 3] {
        let mut details = vec![
            product.price.display_with(&self.currency),
            format!("{} in stock", product.stock_quantity),
        ];
        if let Some(date) = product.expiration_date {
            let marker = if product.is_expired(self.today) {
                " (expired)"
            } else {
                ""
            };
            details.push(format!("expires {date}{marker}"));
        }
        details.push(product.category.name.clone());

        let description = if product.description.is_empty() {
            NO_DESCRIPTION
        } else {
            product.description.as_str()
        };

        [
            format!("#{}  {}  [{}]", product.id, product.name, product.stock_status()),
            format!("    {}", details.join(" · ")),
            format!("    {description}"),
        ]
    }

    /// Categories a product can be filed under, with their ids.
    pub fn categories(&self, categories: &[Category]) -> String {
        let selectable: Vec<&Category> = categories.iter().filter(|c| !c.is_sentinel()).collect();
        if selectable.is_empty() {
            return "No categories yet.".to_string();
        }
        selectable
            .iter()
            .map(|c| format!("{:>4}  {}", c.id, c.name))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// JSON shape of `marketonic list --json`.
#[derive(Debug, Serialize)]
pub struct DashboardJson<'a> {
    pub stats: DashboardStats,
    pub search: &'a str,
    pub category: &'a str,
    pub products: Vec<&'a Product>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use marketonic_core::{compute_stats, Money};

    fn renderer() -> Renderer {
        Renderer::new("R$", NaiveDate::from_ymd_opt(2025, 6, 1).unwrap())
    }

    fn milk(description: &str, expires: Option<NaiveDate>) -> Product {
        Product::new(
            1,
            "Whole Milk",
            description,
            Money::from_cents(450),
            12,
            expires,
            Category::new(1, "Dairy"),
        )
    }

    #[test]
    fn test_stats_cards() {
        let products = vec![milk("", None)];
        let text = renderer().stats(&compute_stats(&products));
        assert!(text.contains("Total products    1"));
        assert!(text.contains("Inventory value   R$ 54.00"));
    }

    #[test]
    fn test_product_lines() {
        let product = milk("Fresh, 1L", NaiveDate::from_ymd_opt(2025, 12, 31));
        let text = renderer().products(&[&product], &FilterState::default());
        assert_eq!(
            text,
            "Products (1)\n\
             #1  Whole Milk  [In stock]\n    \
             R$ 4.50 · 12 in stock · expires 2025-12-31 · Dairy\n    \
             Fresh, 1L"
        );
    }

    #[test]
    fn test_fallbacks_and_markers() {
        let product = milk("", NaiveDate::from_ymd_opt(2025, 5, 31));
        let text = renderer().products(&[&product], &FilterState::default());
        assert!(text.contains(NO_DESCRIPTION));
        assert!(text.contains("expires 2025-05-31 (expired)"));
    }

    #[test]
    fn test_empty_list() {
        let filter = FilterState::new("cheese", "Dairy");
        let text = renderer().products(&[], &filter);
        assert!(text.starts_with("Products (0)"));
        assert!(text.contains(NO_PRODUCTS));
        assert!(text.contains(NO_PRODUCTS_HINT));

        let text = renderer().products(&[], &FilterState::default());
        assert!(text.contains(NO_PRODUCTS));
        assert!(text.contains(EMPTY_INVENTORY_HINT));
        assert!(!text.contains(NO_PRODUCTS_HINT));

        let alerts = renderer().alert_list("Low stock", &[]);
        assert!(!alerts.contains(NO_PRODUCTS_HINT));
    }

    #[test]
    fn test_categories_skip_filter_entry() {
        let text = renderer().categories(&[Category::all_categories(), Category::new(4, "Bakery")]);
        assert_eq!(text, "   4  Bakery");
        assert_eq!(renderer().categories(&[Category::all_categories()]), "No categories yet.");
    }
}
