//! reeltime Common Utilities
//!
//! Shared infrastructure for all reeltime crates:
//! - Error taxonomy and result alias
//! - A wall-clock helper for measuring inter-tick deltas
//! - Tracing/logging initialization
//! - Engine configuration (tuning constants, not project data)

pub mod clock;
pub mod config;
pub mod error;
pub mod logging;

pub use clock::*;
pub use config::*;
pub use error::*;
