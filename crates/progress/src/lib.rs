//! Progress Tracking
//!
//! Weighted milestone aggregation and per-goal progress summaries.

#![warn(missing_docs)]

pub mod aggregator;
pub mod tracker;

pub use aggregator::{compute_progress, contribution, effective_weight, DEFAULT_WEIGHT};
pub use tracker::{summarize, BasicProgressTracker, GoalProgress, ProgressSnapshot, ProgressTracker};
