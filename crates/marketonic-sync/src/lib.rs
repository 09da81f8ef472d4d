//! # marketonic-sync: Session State and Mutations
//!
//! Keeps the dashboard's copy of the inventory in step with the backend and
//! runs every create, update, and delete through one lifecycle.
//!
//! ## Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   CLI / UI                                                              │
//! │     │  open_new_product(), set_search(), delete_product(id) ...        │
//! │     ▼                                                                   │
//! │   Dashboard ─────────────► dyn InventoryApi (marketonic-api)           │
//! │     │   │  ▲                                                            │
//! │     │   │  └── refetch after every successful mutation                 │
//! │     │   ├────────────────► dyn NotificationSink (pending/success/error)│
//! │     │   └────────────────► dyn ConfirmationGate (before deletes)       │
//! │     ▼                                                                   │
//! │   SessionState ──► filtered list, stats (marketonic-core views)        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`orchestrator`] - `Dashboard`: load, refresh, mutations, views
//! - [`session`] - Products, categories, loading flag
//! - [`dialog`] - Product and category dialogs with their drafts
//! - [`notify`] - `NotificationSink` and its no-op / recording sinks
//! - [`confirm`] - `ConfirmationGate` and scripted gates

pub mod confirm;
pub mod dialog;
pub mod notify;
pub mod orchestrator;
pub mod session;

pub use confirm::{AlwaysConfirm, AlwaysDecline, ConfirmationGate, ScriptedGate};
pub use dialog::{CategoryDialog, ProductDialog, ProductDialogMode};
pub use notify::{NoOpSink, Notification, NotificationKind, NotificationSink, RecordingSink};
pub use orchestrator::{Dashboard, MutationOutcome};
pub use session::SessionState;
