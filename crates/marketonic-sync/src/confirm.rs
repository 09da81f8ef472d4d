//! # Confirmation Gate
//!
//! Yes/no prompt asked before destructive operations.

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

/// Asks the user to confirm an operation.
pub trait ConfirmationGate: Send + Sync {
    /// Returns true to go ahead.
    fn confirm(&self, prompt: &str) -> bool;
}

/// Confirms everything.
pub struct AlwaysConfirm;

impl ConfirmationGate for AlwaysConfirm {
    fn confirm(&self, _prompt: &str) -> bool {
        true
    }
}

/// Declines everything.
pub struct AlwaysDecline;

impl ConfirmationGate for AlwaysDecline {
    fn confirm(&self, _prompt: &str) -> bool {
        false
    }
}

/// Answers from a fixed script and records the prompts it was shown.
///
/// Declines once the script runs out.
#[derive(Debug, Default)]
pub struct ScriptedGate {
    answers: Mutex<VecDeque<bool>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedGate {
    pub fn new(answers: impl IntoIterator<Item = bool>) -> Self {
        ScriptedGate {
            answers: Mutex::new(answers.into_iter().collect()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl ConfirmationGate for ScriptedGate {
    fn confirm(&self, prompt: &str) -> bool {
        self.prompts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(prompt.to_string());
        self.answers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_gate() {
        let gate = ScriptedGate::new([true, false]);
        assert!(gate.confirm("first?"));
        assert!(!gate.confirm("second?"));
        assert!(!gate.confirm("third?"));
        assert_eq!(gate.prompts(), vec!["first?", "second?", "third?"]);
    }

    #[test]
    fn test_fixed_gates() {
        assert!(AlwaysConfirm.confirm("delete?"));
        assert!(!AlwaysDecline.confirm("delete?"));
    }
}
