//! Urgency/importance classification of tasks.
//!
//! The current instant is always passed in by the caller. Urgency is derived
//! from the task's due date (deadline, else end date) relative to `now`'s
//! calendar day; importance from its priority. `Normal` priority counts as
//! important only when the task is also urgent, so un-dated normal work
//! lands in quadrant 4 rather than crowding quadrant 2.

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use planwise_core::{CanonicalValue, TaskPriority, TaskRecord};
use serde::{Deserialize, Serialize};

use crate::quadrant::Quadrant;

/// Upper bound on the urgency horizon (about a century).
const MAX_HORIZON_DAYS: i64 = 36_500;

/// Classifier configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Days after today that still count as urgent. `0` means due today or
    /// overdue.
    pub horizon_days: i64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self { horizon_days: 0 }
    }
}

/// How pressing a task's dates are.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    /// Done or cancelled; dates are ignored
    Closed,
    /// Due before now
    Overdue,
    /// Due later today
    DueToday,
    /// Due within the horizon, after today
    DueSoon,
    /// Due after the horizon
    Upcoming,
    /// Only a start date is set
    Scheduled,
    /// No usable dates
    Unscheduled,
}

impl Urgency {
    /// Whether this counts as urgent.
    pub fn is_urgent(&self) -> bool {
        matches!(self, Self::Overdue | Self::DueToday | Self::DueSoon)
    }
}

/// Priority classifier.
#[derive(Debug, Clone, Copy, Default)]
pub struct PriorityClassifier {
    config: ClassifierConfig,
}

impl PriorityClassifier {
    /// Create a classifier with the default horizon.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the configuration.
    pub fn with_config(mut self, config: ClassifierConfig) -> Self {
        self.config = config;
        self
    }

    /// Current configuration.
    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Assess how pressing `task` is at `now`.
    pub fn assess_urgency<Tz: TimeZone>(&self, task: &TaskRecord, now: &DateTime<Tz>) -> Urgency {
        if task.status.is_closed() {
            return Urgency::Closed;
        }

        let Some(due) = task.due() else {
            return if task.start().is_some() {
                Urgency::Scheduled
            } else {
                Urgency::Unscheduled
            };
        };

        let tz = now.timezone();
        let today = now.date_naive();
        if let Some(instant) = due.instant_in(&tz) {
            if instant < now.with_timezone(&Utc) {
                return Urgency::Overdue;
            }
        }

        let due_day = local_due_date(&due, &tz);
        let horizon = today
            .checked_add_signed(Duration::days(self.config.horizon_days.clamp(0, MAX_HORIZON_DAYS)))
            .unwrap_or(NaiveDate::MAX);
        if due_day < today {
            Urgency::Overdue
        } else if due_day == today {
            Urgency::DueToday
        } else if due_day <= horizon {
            Urgency::DueSoon
        } else {
            Urgency::Upcoming
        }
    }

    /// Whether `task` is urgent at `now`.
    pub fn is_urgent<Tz: TimeZone>(&self, task: &TaskRecord, now: &DateTime<Tz>) -> bool {
        self.assess_urgency(task, now).is_urgent()
    }

    /// Assign `task` to a quadrant at `now`.
    pub fn classify<Tz: TimeZone>(&self, task: &TaskRecord, now: &DateTime<Tz>) -> Quadrant {
        let urgency = self.assess_urgency(task, now);
        quadrant_for(task.priority, urgency)
    }
}

/// Whether a priority counts as important given the task's urgency.
pub fn is_important(priority: TaskPriority, urgent: bool) -> bool {
    match priority {
        TaskPriority::High => true,
        TaskPriority::Normal => urgent,
        TaskPriority::Low => false,
    }
}

/// Quadrant for an already assessed urgency.
pub fn quadrant_for(priority: TaskPriority, urgency: Urgency) -> Quadrant {
    if urgency == Urgency::Closed {
        return Quadrant::Eliminate;
    }
    let urgent = urgency.is_urgent();
    Quadrant::from_flags(urgent, is_important(priority, urgent))
}

/// Classify with the default configuration.
pub fn classify<Tz: TimeZone>(task: &TaskRecord, now: &DateTime<Tz>) -> Quadrant {
    PriorityClassifier::default().classify(task, now)
}

/// Due date as a calendar day in the viewer's zone.
pub fn local_due_date<Tz: TimeZone>(due: &CanonicalValue, tz: &Tz) -> NaiveDate {
    match due {
        CanonicalValue::DateTime(dt) => dt.with_timezone(tz).date_naive(),
        other => other.date(),
    }
}
