//! Risk classification and alert transition tracking.
//!
//! Submodules:
//! - `levels`: the `RiskLevel` enum, its static metadata, the configurable
//!   threshold table, and the pure classifier.
//! - `tracker`: the stateful edge detector that decides which level changes
//!   are worth a notification and keeps the capped alert log.

pub mod levels;
pub mod tracker;

pub use levels::{RiskLevel, ThresholdTable, classify};
pub use tracker::AlertTracker;
