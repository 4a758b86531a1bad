//! Action policy: one gated decision per cycle.

use std::collections::HashSet;
use std::time::{Duration, Instant};

use autopermit_core::{ButtonAction, Chord, Decision, Point};
use autopermit_matcher::Match;

/// How a decision is carried out by the input sink.
#[derive(Debug, Clone, PartialEq)]
pub enum Dispatch {
    /// Click at an absolute screen point
    Click(Point),
    /// Send a key chord
    Chord(Chord),
    /// No input event; ring the out-of-band alert instead
    Alert,
}

/// A decision paired with the dispatch that carries it out.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    /// The decision recorded for this cycle
    pub decision: Decision,
    /// The input event (or alert) to perform
    pub dispatch: Dispatch,
}

/// Decision state machine for the poll loop.
///
/// Conceptually two states: `Idle` and `Cooling`. A detection on an eligible
/// button while idle emits a decision and enters cooling; once the cooldown
/// has elapsed the policy is idle again. The cooldown is global across all
/// buttons, not per-button.
#[derive(Debug)]
pub struct ActionPolicy {
    cooldown: Duration,
    last_action_at: Option<Instant>,
}

impl ActionPolicy {
    /// Create a policy with the given global cooldown.
    pub fn new(cooldown: Duration) -> Self {
        Self {
            cooldown,
            last_action_at: None,
        }
    }

    /// Check whether the cooldown window has elapsed.
    pub fn can_act(&self, now: Instant) -> bool {
        self.last_action_at
            .map_or(true, |last| now.saturating_duration_since(last) >= self.cooldown)
    }

    /// Decide what (if anything) to do about one detected button.
    ///
    /// Precedence, in order:
    /// 1. An active cooldown suppresses everything.
    /// 2. A non-empty allow-list admits only buttons whose name overlaps an
    ///    entry; admitted buttons override `configured_action` and are
    ///    always clicked, classified by name (confirm/accept -> Approved,
    ///    deny/reject -> Denied, anything else -> Clicked). Everything else
    ///    is silently skipped this cycle.
    /// 3. An empty allow-list either falls through to the configured action
    ///    (`fallback_on_empty`) or suppresses everything.
    /// 4. Without an allow-list the configured action applies: Approve and
    ///    Deny click when the button name carries a matching token and fall
    ///    back to the fixed accept/cancel chord otherwise; Skip only rings
    ///    the alert.
    ///
    /// Any emission updates the cooldown timestamp, including when the
    /// subsequent dispatch fails (avoids rapid retry storms).
    pub fn decide(
        &mut self,
        name: &str,
        configured_action: ButtonAction,
        m: &Match,
        allow_list: Option<&HashSet<String>>,
        fallback_on_empty: bool,
        now: Instant,
    ) -> Option<Outcome> {
        if !self.can_act(now) {
            return None;
        }

        let outcome = match allow_list {
            Some(list) if !list.is_empty() => {
                if !list.iter().any(|entry| names_overlap(entry, name)) {
                    return None;
                }
                // Explicit allow-list override: always a click at the match
                // location, regardless of the configured action.
                let decision = if is_approve_name(name) {
                    Decision::Approved(name.to_string())
                } else if is_deny_name(name) {
                    Decision::Denied(name.to_string())
                } else {
                    Decision::Clicked(name.to_string())
                };
                Outcome {
                    decision,
                    dispatch: Dispatch::Click(m.center),
                }
            }
            Some(_) if !fallback_on_empty => return None,
            _ => configured_outcome(name, configured_action, m),
        };

        self.last_action_at = Some(now);
        Some(outcome)
    }
}

/// Outcome for the config-driven path (no allow-list restriction applies).
fn configured_outcome(name: &str, action: ButtonAction, m: &Match) -> Outcome {
    match action {
        ButtonAction::Approve => {
            // The click is preferred for name-matched approve buttons; other
            // approve-configured buttons get the fixed accept chord.
            let dispatch = if is_approve_name(name) {
                Dispatch::Click(m.center)
            } else {
                Dispatch::Chord(Chord::accept())
            };
            Outcome {
                decision: Decision::Approved(name.to_string()),
                dispatch,
            }
        }
        ButtonAction::Deny => {
            let dispatch = if is_deny_name(name) {
                Dispatch::Click(m.center)
            } else {
                Dispatch::Chord(Chord::cancel())
            };
            Outcome {
                decision: Decision::Denied(name.to_string()),
                dispatch,
            }
        }
        ButtonAction::Skip => Outcome {
            decision: Decision::Skipped(name.to_string()),
            dispatch: Dispatch::Alert,
        },
    }
}

/// Case-insensitive substring containment in either direction.
///
/// Deliberately fuzzy: when two configured names are substrings of each
/// other (e.g. "accept" and "accept_reject_combo") the first comparison to
/// succeed wins. Callers must not disambiguate further.
pub fn names_overlap(a: &str, b: &str) -> bool {
    let a = a.to_lowercase();
    let b = b.to_lowercase();
    a.contains(&b) || b.contains(&a)
}

fn is_approve_name(name: &str) -> bool {
    let name = name.to_lowercase();
    name.contains("confirm") || name.contains("accept")
}

fn is_deny_name(name: &str) -> bool {
    let name = name.to_lowercase();
    name.contains("deny") || name.contains("reject")
}
