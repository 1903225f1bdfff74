//! Planwise core data models.
//!
//! Records as the presentation layer hands them to the domain computations:
//! goals with weighted milestones, task records with normalized priority and
//! status, and canonical ISO-8601 values.

#![warn(missing_docs)]

// Core identities
mod id;

// Goals and milestones
mod goal;

// Tasks
mod task;

// Canonical date/time values
mod canonical;

// Re-exports
pub use id::{GoalId, KeyAreaId, MilestoneId, TaskId};
pub use goal::{Goal, GoalStatus, Milestone};
pub use task::{TaskPriority, TaskRecord, TaskStatus};
pub use canonical::CanonicalValue;

/// Timestamp type
pub type Time = chrono::DateTime<chrono::Utc>;

/// Errors raised by strict boundary parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// Identifier was empty
    #[error("identifier must not be empty")]
    EmptyId,

    /// Not a canonical ISO-8601 date or date-time
    #[error("not a canonical date or date-time: {0:?}")]
    InvalidDate(String),
}
