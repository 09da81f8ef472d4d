//! Terminal notification sink and confirmation prompt.
//!
//! Both write to stderr so stdout carries only the rendered dashboard.

use std::io::{self, BufRead, Write};

use marketonic_sync::{ConfirmationGate, Notification, NotificationKind, NotificationSink};
use tracing::warn;

/// Prints notifications to stderr, one line each.
///
/// With `json` set, each line is a serialized [`Notification`].
pub struct TerminalSink {
    json: bool,
}

impl TerminalSink {
    pub fn new(json: bool) -> Self {
        TerminalSink { json }
    }

    fn emit(&self, kind: NotificationKind, message: &str) {
        eprintln!("{}", self.format(kind, message));
    }

    fn format(&self, kind: NotificationKind, message: &str) -> String {
        if self.json {
            let notification = Notification {
                kind,
                message: message.to_string(),
            };
            match serde_json::to_string(&notification) {
                Ok(line) => return line,
                Err(err) => warn!(error = %err, "Could not serialize notification"),
            }
        }
        let marker = match kind {
            NotificationKind::Pending => "…",
            NotificationKind::Success => "✔",
            NotificationKind::Error => "✖",
        };
        format!("{marker} {message}")
    }
}

impl NotificationSink for TerminalSink {
    fn pending(&self, message: &str) {
        self.emit(NotificationKind::Pending, message);
    }

    fn success(&self, message: &str) {
        self.emit(NotificationKind::Success, message);
    }

    fn error(&self, message: &str) {
        self.emit(NotificationKind::Error, message);
    }
}

/// Asks on stderr and reads the answer from stdin. Only `y`/`yes` confirms.
pub struct StdinGate;

impl ConfirmationGate for StdinGate {
    fn confirm(&self, prompt: &str) -> bool {
        eprint!("{prompt} [y/N] ");
        if let Err(err) = io::stderr().flush() {
            warn!(error = %err, "Could not flush prompt");
        }

        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(_) => is_yes(&answer),
            Err(err) => {
                warn!(error = %err, "Could not read confirmation");
                false
            }
        }
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}
