//! Per-session decision counters.

use autopermit_core::DecisionKind;

/// Count of decisions by kind, accumulated for the session.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SessionStats {
    approved: u64,
    denied: u64,
    skipped: u64,
    clicked: u64,
}

impl SessionStats {
    /// Create empty stats.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one decision.
    pub fn record(&mut self, kind: DecisionKind) {
        match kind {
            DecisionKind::Approved => self.approved += 1,
            DecisionKind::Denied => self.denied += 1,
            DecisionKind::Skipped => self.skipped += 1,
            DecisionKind::Clicked => self.clicked += 1,
        }
    }

    /// Count for one decision kind.
    pub fn count(&self, kind: DecisionKind) -> u64 {
        match kind {
            DecisionKind::Approved => self.approved,
            DecisionKind::Denied => self.denied,
            DecisionKind::Skipped => self.skipped,
            DecisionKind::Clicked => self.clicked,
        }
    }

    /// Total number of decisions.
    pub fn total(&self) -> u64 {
        self.approved + self.denied + self.skipped + self.clicked
    }
}

impl std::fmt::Display for SessionStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "approved: {}, denied: {}, skipped: {}, clicked: {}",
            self.approved, self.denied, self.skipped, self.clicked
        )
    }
}
