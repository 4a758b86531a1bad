//! Action and decision types for button handling.

use serde::{Deserialize, Serialize};

/// Configured action for a button.
///
/// Each button in the configuration carries one of these; the action policy
/// consults it when no allow-list override applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonAction {
    /// Automatically accept: click the button or send the accept chord
    Approve,
    /// Automatically reject: click the button or send the cancel chord
    Deny,
    /// Do nothing, leave the button for manual handling
    Skip,
}

impl ButtonAction {
    /// Lowercase string matching the configuration format.
    pub fn as_str(self) -> &'static str {
        match self {
            ButtonAction::Approve => "approve",
            ButtonAction::Deny => "deny",
            ButtonAction::Skip => "skip",
        }
    }
}

impl std::fmt::Display for ButtonAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The single action chosen for one poll cycle.
///
/// At most one decision is produced per cycle; each variant names the button
/// that triggered it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decision {
    /// Button was accepted (clicked or accept chord sent)
    Approved(String),
    /// Button was rejected (clicked or cancel chord sent)
    Denied(String),
    /// Button was deliberately left alone for manual handling
    Skipped(String),
    /// Button was clicked without approve/deny classification
    Clicked(String),
}

impl Decision {
    /// The kind of this decision, for stats bucketing.
    pub fn kind(&self) -> DecisionKind {
        match self {
            Decision::Approved(_) => DecisionKind::Approved,
            Decision::Denied(_) => DecisionKind::Denied,
            Decision::Skipped(_) => DecisionKind::Skipped,
            Decision::Clicked(_) => DecisionKind::Clicked,
        }
    }

    /// Name of the button this decision was made for.
    pub fn button_name(&self) -> &str {
        match self {
            Decision::Approved(name)
            | Decision::Denied(name)
            | Decision::Skipped(name)
            | Decision::Clicked(name) => name,
        }
    }

    /// Uppercase label for human-readable log output.
    pub fn label(&self) -> &'static str {
        self.kind().label()
    }
}

impl std::fmt::Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.label(), self.button_name())
    }
}

/// Decision kind without the button name, used as a stats counter key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionKind {
    /// An approve-class decision
    Approved,
    /// A deny-class decision
    Denied,
    /// A skip decision
    Skipped,
    /// A raw click without classification
    Clicked,
}

impl DecisionKind {
    /// Uppercase label for human-readable log output.
    pub fn label(self) -> &'static str {
        match self {
            DecisionKind::Approved => "APPROVED",
            DecisionKind::Denied => "DENIED",
            DecisionKind::Skipped => "SKIPPED",
            DecisionKind::Clicked => "CLICKED",
        }
    }
}
