//! Task model - the read-only view of a task used for prioritization.

use serde::{Deserialize, Serialize};
use crate::canonical::CanonicalValue;
use crate::id::{KeyAreaId, TaskId};

/// A task-like record as delivered by the backend.
///
/// Dates stay as the canonical strings the backend sent; they are parsed on
/// demand and unparseable values read as absent. Priority and status are
/// normalized into closed enums when the record is deserialized.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskRecord {
    /// Unique identifier
    #[serde(default)]
    pub id: TaskId,

    /// Task title
    #[serde(default)]
    pub title: String,

    /// Hard deadline
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,

    /// Planned end date
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,

    /// Planned start date
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,

    /// Normalized priority
    #[serde(default)]
    pub priority: TaskPriority,

    /// Normalized status
    #[serde(default)]
    pub status: TaskStatus,

    /// Grouping reference, display only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_area_id: Option<KeyAreaId>,
}

impl TaskRecord {
    /// Create an open, normal-priority task without dates.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: TaskId::new(),
            title: title.into(),
            ..Default::default()
        }
    }

    /// Builder: set deadline.
    pub fn deadline(mut self, value: impl Into<String>) -> Self {
        self.deadline = Some(value.into());
        self
    }

    /// Builder: set end date.
    pub fn end_date(mut self, value: impl Into<String>) -> Self {
        self.end_date = Some(value.into());
        self
    }

    /// Builder: set start date.
    pub fn start_date(mut self, value: impl Into<String>) -> Self {
        self.start_date = Some(value.into());
        self
    }

    /// Builder: set priority.
    pub fn priority(mut self, priority: TaskPriority) -> Self {
        self.priority = priority;
        self
    }

    /// Builder: set status.
    pub fn status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    /// The date the task is due: the deadline, else the end date.
    ///
    /// An unparseable deadline counts as absent, so the end date is used.
    pub fn due(&self) -> Option<CanonicalValue> {
        parse_field(&self.deadline).or_else(|| parse_field(&self.end_date))
    }

    /// Parsed start date.
    pub fn start(&self) -> Option<CanonicalValue> {
        parse_field(&self.start_date)
    }
}

fn parse_field(field: &Option<String>) -> Option<CanonicalValue> {
    field.as_deref().and_then(CanonicalValue::parse)
}

/// Task priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "String")]
pub enum TaskPriority {
    /// High priority
    High,
    /// Normal / medium priority
    #[default]
    Normal,
    /// Low priority
    Low,
}

impl TaskPriority {
    /// Normalize free text. Unknown text reads as `Normal`.
    pub fn normalize(raw: &str) -> Self {
        match normalize_token(raw).as_str() {
            "high" | "urgent" | "critical" => Self::High,
            "low" => Self::Low,
            _ => Self::Normal,
        }
    }

    /// Canonical token.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Normal => "normal",
            Self::Low => "low",
        }
    }
}

impl From<Option<String>> for TaskPriority {
    fn from(raw: Option<String>) -> Self {
        raw.as_deref().map(Self::normalize).unwrap_or_default()
    }
}

impl From<TaskPriority> for String {
    fn from(priority: TaskPriority) -> Self {
        priority.as_str().to_string()
    }
}

impl std::fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Task status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "String")]
pub enum TaskStatus {
    /// Not started
    #[default]
    Open,
    /// Being worked on
    InProgress,
    /// Completed
    Done,
    /// Cancelled or blocked
    Cancelled,
}

impl TaskStatus {
    /// Normalize free text. Unknown text reads as `Open`.
    pub fn normalize(raw: &str) -> Self {
        match normalize_token(raw).as_str() {
            "in_progress" | "inprogress" | "doing" | "started" | "active" => Self::InProgress,
            "done" | "completed" | "complete" | "finished" => Self::Done,
            "cancelled" | "canceled" | "blocked" => Self::Cancelled,
            _ => Self::Open,
        }
    }

    /// Whether the task is finished (done or cancelled).
    pub fn is_closed(&self) -> bool {
        matches!(self, Self::Done | Self::Cancelled)
    }

    /// Canonical token.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::InProgress => "in_progress",
            Self::Done => "done",
            Self::Cancelled => "cancelled",
        }
    }
}

impl From<Option<String>> for TaskStatus {
    fn from(raw: Option<String>) -> Self {
        raw.as_deref().map(Self::normalize).unwrap_or_default()
    }
}

impl From<TaskStatus> for String {
    fn from(status: TaskStatus) -> Self {
        status.as_str().to_string()
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lowercase, trim, and fold `-` and spaces into `_`.
fn normalize_token(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .split(|c: char| c == '_' || c == '-' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_normalization() {
        assert_eq!(TaskPriority::normalize("HIGH"), TaskPriority::High);
        assert_eq!(TaskPriority::normalize(" Medium "), TaskPriority::Normal);
        assert_eq!(TaskPriority::normalize("normal"), TaskPriority::Normal);
        assert_eq!(TaskPriority::normalize("low"), TaskPriority::Low);
        assert_eq!(TaskPriority::normalize("whenever"), TaskPriority::Normal);
    }

    #[test]
    fn test_status_normalization() {
        assert_eq!(TaskStatus::normalize("todo"), TaskStatus::Open);
        assert_eq!(TaskStatus::normalize("In Progress"), TaskStatus::InProgress);
        assert_eq!(TaskStatus::normalize("in-progress"), TaskStatus::InProgress);
        assert_eq!(TaskStatus::normalize("in_progress"), TaskStatus::InProgress);
        assert_eq!(TaskStatus::normalize("Completed"), TaskStatus::Done);
        assert_eq!(TaskStatus::normalize("blocked"), TaskStatus::Cancelled);
        assert_eq!(TaskStatus::normalize("canceled"), TaskStatus::Cancelled);
        assert_eq!(TaskStatus::normalize("???"), TaskStatus::Open);
    }

    #[test]
    fn test_closed_statuses() {
        assert!(TaskStatus::Done.is_closed());
        assert!(TaskStatus::Cancelled.is_closed());
        assert!(!TaskStatus::Open.is_closed());
        assert!(!TaskStatus::InProgress.is_closed());
    }

    #[test]
    fn test_record_deserialization_normalizes() {
        let json = r#"{
            "id": "17",
            "title": "Pay rent",
            "deadline": "2024-12-25",
            "priority": "High",
            "status": "in progress",
            "key_area_id": "3"
        }"#;
        let task: TaskRecord = serde_json::from_str(json).unwrap();
        assert_eq!(task.priority, TaskPriority::High);
        assert_eq!(task.status, TaskStatus::InProgress);

        let out = serde_json::to_value(&task).unwrap();
        assert_eq!(out["priority"], "high");
        assert_eq!(out["status"], "in_progress");
    }

    #[test]
    fn test_record_with_numeric_ids() {
        let task: TaskRecord =
            serde_json::from_str(r#"{"id": 17, "title": "x", "key_area_id": 3}"#).unwrap();
        assert_eq!(task.id.as_str(), "17");
        assert_eq!(task.key_area_id.as_ref().map(|k| k.as_str()), Some("3"));

        let out = serde_json::to_value(&task).unwrap();
        assert_eq!(out["id"], "17");
    }

    #[test]
    fn test_record_null_and_missing_fields() {
        let task: TaskRecord =
            serde_json::from_str(r#"{"title": "x", "priority": null}"#).unwrap();
        assert_eq!(task.priority, TaskPriority::Normal);
        assert_eq!(task.status, TaskStatus::Open);
        assert!(task.due().is_none());
    }

    #[test]
    fn test_due_falls_back_to_end_date() {
        let task = TaskRecord::new("x").deadline("not a date").end_date("2024-03-01");
        let due = task.due().unwrap();
        assert_eq!(due.date(), chrono::NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
    }
}
