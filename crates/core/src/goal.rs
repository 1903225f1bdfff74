//! Goal model - top-level objective broken into weighted milestones.

use serde::{Deserialize, Deserializer, Serialize};
use crate::id::{GoalId, MilestoneId};
use crate::Time;

/// A goal the user is working towards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Goal {
    /// Unique identifier
    #[serde(default)]
    pub id: GoalId,

    /// Goal title
    #[serde(default)]
    pub title: String,

    /// Detailed description
    #[serde(default)]
    pub description: String,

    /// Goal status
    #[serde(default)]
    pub status: GoalStatus,

    /// Milestones owned by this goal
    #[serde(default)]
    pub milestones: Vec<Milestone>,

    /// When created
    #[serde(default = "chrono::Utc::now")]
    pub created_at: Time,

    /// Last updated
    #[serde(default = "chrono::Utc::now")]
    pub updated_at: Time,
}

impl Goal {
    /// Create an active goal with no milestones.
    pub fn new(title: impl Into<String>) -> Self {
        let now = chrono::Utc::now();
        Self {
            id: GoalId::new(),
            title: title.into(),
            description: String::new(),
            status: GoalStatus::Active,
            milestones: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Builder: attach a milestone.
    pub fn with_milestone(mut self, milestone: Milestone) -> Self {
        self.milestones.push(milestone);
        self
    }
}

/// Goal status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalStatus {
    /// Goal is active
    #[default]
    Active,
    /// Goal completed
    Completed,
    /// Goal paused
    Paused,
    /// Goal cancelled
    Cancelled,
}

/// A weighted sub-unit of a goal.
///
/// `weight` and `score` are stored as given by the backend; values that are
/// not usable numbers deserialize to `None` and are resolved by the
/// aggregator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Milestone {
    /// Unique identifier
    #[serde(default)]
    pub id: MilestoneId,

    /// Milestone title
    #[serde(default)]
    pub title: String,

    /// Relative weight within the goal
    #[serde(default, deserialize_with = "lenient_number")]
    pub weight: Option<f64>,

    /// Whether the milestone is finished
    #[serde(default)]
    pub done: bool,

    /// Fractional completion (0.0 to 1.0) when not done
    #[serde(default, deserialize_with = "lenient_number")]
    pub score: Option<f64>,

    /// Canonical due date, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
}

impl Milestone {
    /// Create an open milestone with default weight.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: MilestoneId::new(),
            title: title.into(),
            weight: None,
            done: false,
            score: None,
            due_date: None,
        }
    }

    /// Builder: set weight.
    pub fn weight(mut self, weight: f64) -> Self {
        self.weight = Some(weight);
        self
    }

    /// Builder: set fractional score.
    pub fn score(mut self, score: f64) -> Self {
        self.score = Some(score);
        self
    }

    /// Builder: mark done.
    pub fn done(mut self) -> Self {
        self.done = true;
        self
    }

    /// Builder: set due date.
    pub fn due(mut self, date: impl Into<String>) -> Self {
        self.due_date = Some(date.into());
        self
    }
}

/// Accepts JSON numbers and numeric strings; anything else becomes `None`.
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(n)) => n.as_f64(),
        Some(serde_json::Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    })
}
