//! # Marketonic Dashboard
//!
//! Terminal front end for the inventory backend: stats cards, the filtered
//! product list, category and product forms, deletion and alert queries.
//!
//! ```text
//!   marketonic <command>
//!        │
//!        ▼
//!   ┌──────────┐   ┌───────────────┐   ┌──────────────────┐
//!   │   cli    │──►│   commands    │──►│ Dashboard (sync) │──► HTTP API
//!   └──────────┘   └───────┬───────┘   └────────┬─────────┘
//!                          │                    │ notifications / confirm
//!                          ▼                    ▼
//!                     render (stdout)     terminal (stderr / stdin)
//! ```

pub mod cli;
pub mod commands;
pub mod error;
pub mod render;
pub mod terminal;

pub use commands::{run, CommandStatus};
pub use error::{AppError, AppResult};

use tracing_subscriber::EnvFilter;

/// Logs go to stderr. `RUST_LOG` wins over `--verbose`.
pub fn init_tracing(verbose: bool) {
    let fallback = if verbose {
        "warn,marketonic=debug"
    } else {
        "warn,marketonic=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
