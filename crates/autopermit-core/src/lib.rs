//! # autopermit-core
//!
//! Core types for the autopermit screen monitor.
//!
//! This crate contains all fundamental types with **no internal dependencies**
//! on other autopermit crates. It provides:
//!
//! - Geometry types (Point, Rect) in screen coordinates
//! - Action and decision types (ButtonAction, Decision)
//! - Key chord types for keyboard dispatch
//! - Configuration types loaded from YAML
//! - Error types
//!
//! ## Architecture
//!
//! This is Layer 0 in the architecture - all other crates depend on this one,
//! but this crate has no dependencies on other autopermit crates.

#![warn(missing_docs)]
#![warn(clippy::all)]

// Re-export all modules
pub mod action;
pub mod chord;
pub mod config;
pub mod error;
pub mod geometry;

// Re-export commonly used types
pub use action::{ButtonAction, Decision, DecisionKind};
pub use chord::{Chord, ChordKey};
pub use config::{
    AllowListSettings, ButtonConfig, JournalSettings, MonitorConfig, Settings,
};
pub use error::{Error, Result};
pub use geometry::{Point, Rect};
