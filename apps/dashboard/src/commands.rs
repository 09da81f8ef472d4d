//! # Command Execution
//!
//! Turns a parsed [`Command`] into dashboard calls and rendered output.
//!
//! ```text
//!   run(cli)
//!     ├── config init|show ──► ClientConfig only, no network
//!     └── everything else
//!           build Dashboard (HTTP client, terminal sink, gate)
//!           execute(command) ──► load / mutate ──► render to stdout
//! ```

use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

use marketonic_api::{ClientConfig, ConfigError, HttpInventoryApi};
use marketonic_core::{Product, ALL_CATEGORIES_ID};
use marketonic_sync::{
    AlwaysConfirm, ConfirmationGate, Dashboard, MutationOutcome, SessionState,
};
use tracing::debug;

use crate::cli::{AlertKind, Cli, Command, ConfigAction};
use crate::error::{AppError, AppResult};
use crate::render::{DashboardJson, Renderer};
use crate::terminal::{StdinGate, TerminalSink};

/// How a command ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandStatus {
    Done,
    /// The user said no at the confirmation prompt.
    Declined,
    /// A mutation was refused; the reason was already shown.
    Failed,
}

impl CommandStatus {
    pub fn exit_code(self) -> u8 {
        match self {
            CommandStatus::Done | CommandStatus::Declined => 0,
            CommandStatus::Failed => 1,
        }
    }
}

/// Output settings shared by every command.
#[derive(Debug, Clone)]
pub struct View {
    pub renderer: Renderer,
    pub json: bool,
}

// =============================================================================
// Entry Point
// =============================================================================

/// Runs one CLI invocation against the configured backend.
pub async fn run(cli: Cli) -> AppResult<CommandStatus> {
    let config = load_config(cli.config.clone(), cli.api_url.as_deref())?;
    let mut stdout = io::stdout();

    let command = match cli.command {
        Command::Config { action } => {
            return config_command(action, &config, cli.config, cli.json, &mut stdout);
        }
        command => command,
    };

    let gate: Arc<dyn ConfirmationGate> = match command {
        Command::DeleteProduct { yes: true, .. } => Arc::new(AlwaysConfirm),
        _ => Arc::new(StdinGate),
    };
    let api = Arc::new(HttpInventoryApi::new(&config)?);
    debug!(base_url = api.base_url(), "Inventory client ready");

    let mut dashboard = Dashboard::new(api)
        .with_notifier(Arc::new(TerminalSink::new(cli.json)))
        .with_confirmation(gate);
    let view = View {
        renderer: Renderer::new(
            config.currency_symbol(),
            chrono::Local::now().date_naive(),
        ),
        json: cli.json,
    };

    execute(&mut dashboard, command, &view, &mut stdout).await
}

/// File, then environment, then `--api-url`, then validation.
pub fn load_config(path: Option<PathBuf>, api_url: Option<&str>) -> AppResult<ClientConfig> {
    let mut config = ClientConfig::read_file(path)?;
    config.apply_env_overrides();
    if let Some(url) = api_url {
        config.api.base_url = url.to_string();
    }
    config.validate()?;
    Ok(config)
}

fn config_command(
    action: ConfigAction,
    config: &ClientConfig,
    path: Option<PathBuf>,
    json: bool,
    out: &mut impl Write,
) -> AppResult<CommandStatus> {
    match action {
        ConfigAction::Init { force } => {
            let path = path
                .or_else(ClientConfig::default_config_path)
                .ok_or_else(|| ConfigError::SaveFailed("No config path available".into()))?;
            if path.exists() && !force {
                return Err(ConfigError::SaveFailed(format!(
                    "{} already exists (use --force to overwrite)",
                    path.display()
                ))
                .into());
            }
            let written = config.save(Some(path))?;
            writeln!(out, "Wrote {}", written.display())?;
        }
        ConfigAction::Show => {
            if json {
                serde_json::to_writer_pretty(&mut *out, config)?;
                writeln!(out)?;
            } else {
                write!(out, "{}", config.to_toml()?)?;
            }
        }
    }
    Ok(CommandStatus::Done)
}

// =============================================================================
// Dashboard Commands
// =============================================================================

/// Executes a dashboard command. `config` commands are handled by [`run`].
pub async fn execute(
    dashboard: &mut Dashboard,
    command: Command,
    view: &View,
    out: &mut impl Write,
) -> AppResult<CommandStatus> {
    match command {
        Command::List { search, category } => {
            dashboard.load().await?;
            dashboard.set_search(search);
            dashboard.select_category(category);

            let products = dashboard.visible_products();
            if view.json {
                let filter = dashboard.filter();
                emit_json(
                    out,
                    &DashboardJson {
                        stats: dashboard.stats(),
                        search: &filter.search_term,
                        category: &filter.selected_category,
                        products,
                    },
                )?;
            } else {
                writeln!(out, "{}\n", view.renderer.stats(&dashboard.stats()))?;
                writeln!(out, "{}", view.renderer.products(&products, dashboard.filter()))?;
            }
            Ok(CommandStatus::Done)
        }

        Command::Stats => {
            dashboard.load().await?;
            if view.json {
                emit_json(out, &dashboard.stats())?;
            } else {
                writeln!(out, "{}", view.renderer.stats(&dashboard.stats()))?;
            }
            Ok(CommandStatus::Done)
        }

        Command::Categories => {
            dashboard.load().await?;
            if view.json {
                emit_json(out, &dashboard.session().selectable_categories())?;
            } else {
                writeln!(out, "{}", view.renderer.categories(dashboard.categories()))?;
            }
            Ok(CommandStatus::Done)
        }

        Command::AddCategory { name } => {
            dashboard.open_new_category().set_name(name);
            status_of(dashboard.submit_category().await)
        }

        Command::AddProduct(args) => {
            dashboard.load().await?;
            args.fill(dashboard.open_new_product());
            ensure_category_exists(
                dashboard.session(),
                &dashboard.product_dialog().draft().category_id,
            )?;
            status_of(dashboard.submit_product().await)
        }

        Command::EditProduct { id, fields } => {
            dashboard.load().await?;
            let draft = dashboard
                .open_edit_product(id)
                .ok_or(AppError::ProductNotFound(id))?;
            fields.apply(draft);
            ensure_category_exists(
                dashboard.session(),
                &dashboard.product_dialog().draft().category_id,
            )?;
            status_of(dashboard.submit_product().await)
        }

        Command::DeleteProduct { id, .. } => {
            dashboard.load().await?;
            if dashboard.session().find_product(id).is_none() {
                return Err(AppError::ProductNotFound(id));
            }
            status_of(dashboard.delete_product(id).await)
        }

        Command::Alerts { kind } => {
            let (title, products) = match kind {
                AlertKind::LowStock => ("Low stock alerts", dashboard.low_stock_alerts().await?),
                AlertKind::Expired => (
                    "Expired or unavailable products",
                    dashboard.expired_alerts().await?,
                ),
            };
            let products: Vec<&Product> = products.iter().collect();
            if view.json {
                emit_json(out, &products)?;
            } else {
                writeln!(out, "{}", view.renderer.alert_list(title, &products))?;
            }
            Ok(CommandStatus::Done)
        }

        Command::Config { .. } => {
            debug!("Config commands run before a dashboard is built");
            Ok(CommandStatus::Done)
        }
    }
}

/// Rejects a numeric `--category-id` that no loaded category has.
///
/// The reserved filter id and non-numeric text are left to draft
/// validation and the server.
fn ensure_category_exists(session: &SessionState, selection: &str) -> AppResult<()> {
    let Ok(id) = selection.trim().parse::<i64>() else {
        return Ok(());
    };
    let known = session.selectable_categories().iter().any(|c| c.id == id);
    if id == ALL_CATEGORIES_ID || known {
        return Ok(());
    }
    Err(AppError::CategoryNotFound(id))
}

fn emit_json<T: serde::Serialize + ?Sized>(out: &mut impl Write, value: &T) -> AppResult<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

fn status_of(outcome: MutationOutcome) -> AppResult<CommandStatus> {
    match outcome {
        MutationOutcome::Succeeded { .. } => Ok(CommandStatus::Done),
        MutationOutcome::Declined => Ok(CommandStatus::Declined),
        MutationOutcome::Failed { .. } | MutationOutcome::NothingToSubmit => {
            Ok(CommandStatus::Failed)
        }
        MutationOutcome::Invalid(err) => Err(err.into()),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
