//! Command-line surface of `marketonic`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use marketonic_core::{ProductDraft, ALL_CATEGORIES_NAME};

#[derive(Parser, Debug)]
#[command(name = "marketonic")]
#[command(version, about = "Inventory dashboard for the Marketonic backend")]
pub struct Cli {
    /// Inventory API base URL (overrides config and MARKETONIC_API_URL).
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Path to dashboard.toml.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Print JSON instead of text.
    #[arg(long, global = true, default_value_t = false)]
    pub json: bool,

    /// Debug logging unless RUST_LOG is set.
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Stats cards and the product list.
    List {
        /// Case-insensitive substring of the product name.
        #[arg(long, default_value = "")]
        search: String,
        /// Exact category name.
        #[arg(long, default_value = ALL_CATEGORIES_NAME)]
        category: String,
    },
    /// Stats cards only.
    Stats,
    /// Categories with their ids.
    Categories,
    /// Create a category.
    AddCategory { name: String },
    /// Create a product.
    AddProduct(NewProductArgs),
    /// Change fields of an existing product.
    EditProduct {
        id: i64,
        #[command(flatten)]
        fields: ProductFieldArgs,
    },
    /// Delete a product after confirmation.
    DeleteProduct {
        id: i64,
        /// Skip the confirmation prompt.
        #[arg(short, long, default_value_t = false)]
        yes: bool,
    },
    /// Backend alert queries.
    Alerts {
        #[arg(value_enum)]
        kind: AlertKind,
    },
    /// Manage dashboard.toml.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum AlertKind {
    LowStock,
    Expired,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Write a config file with the current settings.
    Init {
        /// Overwrite an existing file.
        #[arg(long, default_value_t = false)]
        force: bool,
    },
    /// Print the effective configuration.
    Show,
}

/// Fields of a new product. Values are taken as typed; the server judges
/// numbers and dates.
#[derive(Args, Debug, Clone)]
pub struct NewProductArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long, default_value = "")]
    pub description: String,
    #[arg(long)]
    pub price: String,
    #[arg(long = "stock")]
    pub stock_quantity: String,
    /// YYYY-MM-DD
    #[arg(long = "expires")]
    pub expiration_date: String,
    /// See `marketonic categories`.
    #[arg(long)]
    pub category_id: String,
}

impl NewProductArgs {
    pub fn fill(self, draft: &mut ProductDraft) {
        draft.name = self.name;
        draft.description = self.description;
        draft.price = self.price;
        draft.stock_quantity = self.stock_quantity;
        draft.expiration_date = self.expiration_date;
        draft.category_id = self.category_id;
    }
}

/// Fields to change on an existing product; omitted fields keep their value.
#[derive(Args, Debug, Clone, Default)]
pub struct ProductFieldArgs {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub price: Option<String>,
    #[arg(long = "stock")]
    pub stock_quantity: Option<String>,
    #[arg(long = "expires")]
    pub expiration_date: Option<String>,
    #[arg(long)]
    pub category_id: Option<String>,
}

impl ProductFieldArgs {
    pub fn apply(self, draft: &mut ProductDraft) {
        let fields = [
            (self.name, &mut draft.name),
            (self.description, &mut draft.description),
            (self.price, &mut draft.price),
            (self.stock_quantity, &mut draft.stock_quantity),
            (self.expiration_date, &mut draft.expiration_date),
            (self.category_id, &mut draft.category_id),
        ];
        for (value, slot) in fields {
            if let Some(value) = value {
                *slot = value;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_add_product() {
        let cli = Cli::try_parse_from([
            "marketonic",
            "--api-url",
            "http://inventory:8080",
            "add-product",
            "--name",
            "Milk",
            "--price",
            "4.50",
            "--stock",
            "12",
            "--expires",
            "2025-12-31",
            "--category-id",
            "1",
        ])
        .unwrap();

        assert_eq!(cli.api_url.as_deref(), Some("http://inventory:8080"));
        let Command::AddProduct(args) = cli.command else {
            panic!("expected add-product");
        };
        let mut draft = ProductDraft::default();
        args.fill(&mut draft);
        assert_eq!(draft.price, "4.50");
        assert_eq!(draft.description, "");
        assert!(draft.is_valid());
    }

    #[test]
    fn test_edit_only_overrides_given_fields() {
        let cli = Cli::try_parse_from(["marketonic", "edit-product", "7", "--stock", "0"]).unwrap();
        let Command::EditProduct { id, fields } = cli.command else {
            panic!("expected edit-product");
        };
        assert_eq!(id, 7);

        let mut draft = ProductDraft {
            name: "Milk".into(),
            stock_quantity: "12".into(),
            ..ProductDraft::default()
        };
        fields.apply(&mut draft);
        assert_eq!(draft.name, "Milk");
        assert_eq!(draft.stock_quantity, "0");
    }

    #[test]
    fn test_list_defaults() {
        let cli = Cli::try_parse_from(["marketonic", "list", "--json"]).unwrap();
        assert!(cli.json);
        match cli.command {
            Command::List { search, category } => {
                assert_eq!(search, "");
                assert_eq!(category, ALL_CATEGORIES_NAME);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_alert_kinds() {
        let cli = Cli::try_parse_from(["marketonic", "alerts", "low-stock"]).unwrap();
        assert!(matches!(cli.command, Command::Alerts { kind: AlertKind::LowStock }));
        assert!(Cli::try_parse_from(["marketonic", "alerts", "soon"]).is_err());
    }
}
