//! # Notifications
//!
//! Fire-and-forget messages about loads and mutations. The dashboard emits;
//! whoever owns the screen decides how to show them.
//!
//! ## Mutation Timeline
//! ```text
//!   submit ──► pending("Saving product...")
//!                 │
//!                 ├── ok  ──► success("Product \"Milk\" saved successfully!")
//!                 │
//!                 └── err ──► error(server message, else fallback)
//! ```

use std::sync::{Mutex, PoisonError};

use serde::Serialize;

/// Notification severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// Work has started.
    Pending,
    Success,
    Error,
}

/// A single emitted notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

/// Receives notifications from the dashboard.
///
/// Implementations must not block; the dashboard does not wait on them.
pub trait NotificationSink: Send + Sync {
    fn pending(&self, message: &str);

    fn success(&self, message: &str);

    fn error(&self, message: &str);
}

/// Drops every notification.
pub struct NoOpSink;

impl NotificationSink for NoOpSink {
    fn pending(&self, _message: &str) {}
    fn success(&self, _message: &str) {}
    fn error(&self, _message: &str) {}
}

/// Keeps every notification in order, for tests and JSON output.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<Notification>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, kind: NotificationKind, message: &str) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Notification {
                kind,
                message: message.to_string(),
            });
    }

    /// Everything recorded so far.
    pub fn notifications(&self) -> Vec<Notification> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Messages of one kind, in emission order.
    pub fn messages(&self, kind: NotificationKind) -> Vec<String> {
        self.notifications()
            .into_iter()
            .filter(|n| n.kind == kind)
            .map(|n| n.message)
            .collect()
    }

    pub fn clear(&self) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl NotificationSink for RecordingSink {
    fn pending(&self, message: &str) {
        self.push(NotificationKind::Pending, message);
    }

    fn success(&self, message: &str) {
        self.push(NotificationKind::Success, message);
    }

    fn error(&self, message: &str) {
        self.push(NotificationKind::Error, message);
    }
}
