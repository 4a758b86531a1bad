//! # autopermit-matcher
//!
//! Template matching engine for the autopermit screen monitor.
//!
//! This crate provides:
//! - `Frame`: a captured pixel buffer with its screen-coordinate origin
//! - `Template`: a named reference image with its configured action
//! - `find`: sparse, tolerance-based template matching without a full
//!   correlation library
//!
//! ## Architecture
//!
//! This is Layer 1 in the architecture - it depends only on autopermit-core
//! and analyzes per-cycle pixel buffers for configured button patterns.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod frame;
pub mod matcher;
pub mod template;

// Re-export commonly used types
pub use frame::Frame;
pub use matcher::{find, Match, CHANNEL_TOLERANCE, SCAN_STRIDE};
pub use template::Template;
