//! # autopermit-monitor
//!
//! Decision and orchestration layer for the autopermit screen monitor.
//!
//! This crate provides:
//! - `AllowListSource`: the periodically refreshed allow-list with alias
//!   expansion and substring resolution
//! - `ActionPolicy`: the per-cycle decision state machine with its global
//!   cooldown
//! - `PixelSource` / `InputSink`: collaborator traits plus OS-backed
//!   implementations (xcap capture, enigo input injection)
//! - `Monitor`: the single-threaded polling loop tying everything together
//!
//! ## Architecture
//!
//! This is Layer 2 in the architecture - it depends on autopermit-core and
//! autopermit-matcher and owns all per-session mutable state.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod allow_list;
pub mod capture;
pub mod input;
pub mod journal;
pub mod monitor;
pub mod policy;
pub mod stats;

// Re-export commonly used types
pub use allow_list::{parse_allow_list, AllowListSource};
pub use capture::{PixelSource, ScreenSource};
pub use input::{EnigoSink, InputSink};
pub use journal::ActionJournal;
pub use monitor::Monitor;
pub use policy::{names_overlap, ActionPolicy, Dispatch, Outcome};
pub use stats::SessionStats;
