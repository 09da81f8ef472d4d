//! # marketonic-api: Inventory Backend Client
//!
//! Talks to the inventory REST backend and hands domain types to the rest
//! of Marketonic.
//!
//! ## Layers
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  marketonic-sync ──► dyn InventoryApi                                  │
//! │                          │                                              │
//! │              ┌───────────┴────────────┐                                 │
//! │              ▼                        ▼                                 │
//! │     HttpInventoryApi             MockApi (tests, `test-util`)           │
//! │       reqwest + wire DTOs          in-memory, call log                  │
//! │              │                                                          │
//! │              ▼                                                          │
//! │     /categorias  /produtos  /produtos/alertas/*                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`client`] - The `InventoryApi` trait
//! - [`http`] - reqwest implementation
//! - [`wire`] - Portuguese JSON records and their domain conversions
//! - [`config`] - `dashboard.toml` loading, env overrides, validation
//! - [`error`] - `ApiError` and `ConfigError`

pub mod client;
pub mod config;
pub mod error;
pub mod http;
#[cfg(any(test, feature = "test-util"))]
pub mod mock;
pub mod wire;

pub use client::InventoryApi;
pub use config::ClientConfig;
pub use error::{ApiError, ApiResult, ConfigError, ConfigResult};
pub use http::HttpInventoryApi;
#[cfg(any(test, feature = "test-util"))]
pub use mock::{ApiCall, MockApi};
