//! Confirmation - The single open confirmation prompt shared by all slots

use serde::{Deserialize, Serialize};
use tracing::debug;

/// What a confirmation prompt will commit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfirmationKind {
    Delete,
    Overwrite,
    Load,
}

impl std::fmt::Display for ConfirmationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfirmationKind::Delete => write!(f, "delete"),
            ConfirmationKind::Overwrite => write!(f, "overwrite"),
            ConfirmationKind::Load => write!(f, "load"),
        }
    }
}

/// An open prompt, addressed by slot index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingConfirmation {
    pub slot: u32,
    pub kind: ConfirmationKind,
}

/// Owner of the confirmation prompt
///
/// At most one prompt is open at a time. Opening a new one replaces whatever
/// was open before, whichever slot it belonged to.
#[derive(Debug, Default)]
pub struct ConfirmationPanel {
    open: Option<PendingConfirmation>,
}

impl ConfirmationPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a prompt, returning the one it replaced
    pub fn open(&mut self, slot: u32, kind: ConfirmationKind) -> Option<PendingConfirmation> {
        let replaced = self.open.replace(PendingConfirmation { slot, kind });
        if let Some(previous) = replaced {
            debug!(
                slot = previous.slot,
                kind = %previous.kind,
                "Closed confirmation replaced by a new one"
            );
        }
        debug!(slot, kind = %kind, "Confirmation opened");
        replaced
    }

    /// Check if the given prompt is the one open
    pub fn is_open(&self, slot: u32, kind: ConfirmationKind) -> bool {
        self.open == Some(PendingConfirmation { slot, kind })
    }

    /// Close and return the prompt if it matches, leaving any other prompt open
    pub fn take(&mut self, slot: u32, kind: ConfirmationKind) -> Option<PendingConfirmation> {
        if self.is_open(slot, kind) {
            self.open.take()
        } else {
            None
        }
    }

    /// Close the prompt if it matches; returns whether anything closed
    pub fn cancel(&mut self, slot: u32, kind: ConfirmationKind) -> bool {
        self.take(slot, kind).is_some()
    }

    /// Close whatever is open
    pub fn close(&mut self) -> Option<PendingConfirmation> {
        self.open.take()
    }

    pub fn current(&self) -> Option<PendingConfirmation> {
        self.open
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opening_replaces_previous_prompt() {
        let mut panel = ConfirmationPanel::new();
        assert!(panel.open(1, ConfirmationKind::Load).is_none());

        let replaced = panel.open(2, ConfirmationKind::Load).unwrap();
        assert_eq!(replaced.slot, 1);
        assert!(!panel.is_open(1, ConfirmationKind::Load));
        assert!(panel.is_open(2, ConfirmationKind::Load));
    }

    #[test]
    fn take_requires_matching_slot_and_kind() {
        let mut panel = ConfirmationPanel::new();
        panel.open(3, ConfirmationKind::Delete);

        assert!(panel.take(3, ConfirmationKind::Overwrite).is_none());
        assert!(panel.take(1, ConfirmationKind::Delete).is_none());
        assert_eq!(
            panel.current(),
            Some(PendingConfirmation {
                slot: 3,
                kind: ConfirmationKind::Delete
            })
        );

        assert!(panel.take(3, ConfirmationKind::Delete).is_some());
        assert!(panel.current().is_none());
    }

    #[test]
    fn cancel_leaves_other_prompts_alone() {
        let mut panel = ConfirmationPanel::new();
        panel.open(1, ConfirmationKind::Overwrite);

        assert!(!panel.cancel(2, ConfirmationKind::Overwrite));
        assert!(panel.is_open(1, ConfirmationKind::Overwrite));
        assert!(panel.cancel(1, ConfirmationKind::Overwrite));
        assert!(panel.close().is_none());
    }
}
