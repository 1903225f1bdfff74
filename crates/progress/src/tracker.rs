//! Goal progress tracking.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use planwise_core::{CanonicalValue, Goal, GoalId};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::aggregator::compute_progress;

/// Progress tracking service.
pub trait ProgressTracker: Send + Sync {
    /// Get goal progress.
    fn goal_progress(&self, goal_id: &GoalId) -> Option<GoalProgress>;

    /// Take a progress snapshot.
    fn snapshot(&self) -> ProgressSnapshot;
}

/// Derived progress figures for one goal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalProgress {
    /// Percentage complete (0-100)
    pub percentage: u8,

    /// Milestones marked done
    pub completed_milestones: usize,

    /// All milestones
    pub total_milestones: usize,

    /// Earliest due date among unfinished milestones
    pub next_due: Option<NaiveDate>,
}

impl Default for GoalProgress {
    fn default() -> Self {
        Self {
            percentage: 0,
            completed_milestones: 0,
            total_milestones: 0,
            next_due: None,
        }
    }
}

/// Summarize a goal's milestones.
pub fn summarize(goal: &Goal) -> GoalProgress {
    let next_due = goal
        .milestones
        .iter()
        .filter(|m| !m.done)
        .filter_map(|m| m.due_date.as_deref().and_then(CanonicalValue::parse))
        .map(|v| v.date())
        .min();

    GoalProgress {
        percentage: compute_progress(&goal.milestones),
        completed_milestones: goal.milestones.iter().filter(|m| m.done).count(),
        total_milestones: goal.milestones.len(),
        next_due,
    }
}

/// A snapshot of progress at a point in time.
#[derive(Debug, Clone)]
pub struct ProgressSnapshot {
    /// When snapshot was taken
    pub timestamp: DateTime<Utc>,

    /// Goal progress by goal ID
    pub goal_progress: Vec<(GoalId, GoalProgress)>,
}

/// Basic progress tracker over goals already loaded by the caller.
pub struct BasicProgressTracker {
    goals: BTreeMap<GoalId, Goal>,
}

impl BasicProgressTracker {
    /// Create a tracker for the given goals.
    pub fn new(goals: impl IntoIterator<Item = Goal>) -> Self {
        Self {
            goals: goals.into_iter().map(|g| (g.id.clone(), g)).collect(),
        }
    }

    /// Insert or replace a goal.
    pub fn upsert(&mut self, goal: Goal) {
        self.goals.insert(goal.id.clone(), goal);
    }

    /// Remove a goal.
    pub fn remove(&mut self, goal_id: &GoalId) -> Option<Goal> {
        self.goals.remove(goal_id)
    }
}

impl ProgressTracker for BasicProgressTracker {
    fn goal_progress(&self, goal_id: &GoalId) -> Option<GoalProgress> {
        self.goals.get(goal_id).map(summarize)
    }

    fn snapshot(&self) -> ProgressSnapshot {
        let goal_progress: Vec<_> = self
            .goals
            .values()
            .map(|goal| (goal.id.clone(), summarize(goal)))
            .collect();

        debug!("Progress snapshot over {} goals", goal_progress.len());

        ProgressSnapshot {
            timestamp: Utc::now(),
            goal_progress,
        }
    }
}
