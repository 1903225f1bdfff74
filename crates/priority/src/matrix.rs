//! Grouping tasks into the four Eisenhower quadrants.

use chrono::{DateTime, NaiveDate, TimeZone};
use planwise_core::{TaskId, TaskRecord};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::classifier::{local_due_date, quadrant_for, PriorityClassifier, Urgency};
use crate::quadrant::Quadrant;

/// One task placed in the matrix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatrixEntry {
    /// Task ID
    pub task_id: TaskId,
    /// Task title
    pub title: String,
    /// Assigned quadrant
    pub quadrant: Quadrant,
    /// Urgency assessment behind the assignment
    pub urgency: Urgency,
    /// Due date (deadline, else end date)
    pub due: Option<NaiveDate>,
}

impl MatrixEntry {
    /// Classify `task` at `now`.
    ///
    /// The due date is the calendar day in `now`'s zone, the same day the
    /// urgency is judged against.
    pub fn new<Tz: TimeZone>(
        classifier: &PriorityClassifier,
        task: &TaskRecord,
        now: &DateTime<Tz>,
    ) -> Self {
        let urgency = classifier.assess_urgency(task, now);
        let tz = now.timezone();
        Self {
            task_id: task.id.clone(),
            title: task.title.clone(),
            quadrant: quadrant_for(task.priority, urgency),
            urgency,
            due: task.due().map(|d| local_due_date(&d, &tz)),
        }
    }
}

/// Tasks grouped by quadrant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EisenhowerMatrix {
    /// Quadrant 1
    pub do_first: Vec<MatrixEntry>,
    /// Quadrant 2
    pub schedule: Vec<MatrixEntry>,
    /// Quadrant 3
    pub delegate: Vec<MatrixEntry>,
    /// Quadrant 4
    pub eliminate: Vec<MatrixEntry>,
}

impl EisenhowerMatrix {
    /// Classify `tasks` at `now` and group them.
    ///
    /// Each quadrant is ordered by due date with undated tasks last, then by
    /// title.
    pub fn build<Tz: TimeZone>(
        classifier: &PriorityClassifier,
        tasks: &[TaskRecord],
        now: &DateTime<Tz>,
    ) -> Self {
        let mut matrix = Self::default();
        for task in tasks {
            let entry = MatrixEntry::new(classifier, task, now);
            matrix.bucket_mut(entry.quadrant).push(entry);
        }

        for q in Quadrant::ALL {
            matrix.bucket_mut(q).sort_by(|a, b| {
                due_key(a.due)
                    .cmp(&due_key(b.due))
                    .then_with(|| a.title.cmp(&b.title))
            });
        }

        debug!(
            "Matrix built from {} tasks: {:?}",
            tasks.len(),
            matrix.counts()
        );
        matrix
    }

    /// Entries in quadrant `q`.
    pub fn bucket(&self, q: Quadrant) -> &[MatrixEntry] {
        match q {
            Quadrant::DoFirst => &self.do_first,
            Quadrant::Schedule => &self.schedule,
            Quadrant::Delegate => &self.delegate,
            Quadrant::Eliminate => &self.eliminate,
        }
    }

    fn bucket_mut(&mut self, q: Quadrant) -> &mut Vec<MatrixEntry> {
        match q {
            Quadrant::DoFirst => &mut self.do_first,
            Quadrant::Schedule => &mut self.schedule,
            Quadrant::Delegate => &mut self.delegate,
            Quadrant::Eliminate => &mut self.eliminate,
        }
    }

    /// Task count per quadrant, in id order.
    pub fn counts(&self) -> [usize; 4] {
        Quadrant::ALL.map(|q| self.bucket(q).len())
    }

    /// Total number of tasks.
    pub fn len(&self) -> usize {
        self.counts().iter().sum()
    }

    /// Whether the matrix holds no tasks.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// Undated sorts after every date.
fn due_key(due: Option<NaiveDate>) -> (bool, Option<NaiveDate>) {
    (due.is_none(), due)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use planwise_core::{TaskPriority, TaskStatus};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 9, 30, 0).unwrap()
    }

    #[test]
    fn test_empty_matrix() {
        let matrix = EisenhowerMatrix::build(&PriorityClassifier::new(), &[], &now());
        assert!(matrix.is_empty());
        assert_eq!(matrix.counts(), [0, 0, 0, 0]);
    }

    #[test]
    fn test_tasks_grouped_and_ordered() {
        let tasks = vec![
            TaskRecord::new("b overdue").priority(TaskPriority::High).deadline("2024-06-10"),
            TaskRecord::new("a today").priority(TaskPriority::High).deadline("2024-06-15"),
            TaskRecord::new("undated").priority(TaskPriority::High),
            TaskRecord::new("plan").priority(TaskPriority::High).deadline("2024-08-01"),
            TaskRecord::new("errand").priority(TaskPriority::Low).deadline("2024-06-15"),
            TaskRecord::new("done")
                .priority(TaskPriority::High)
                .deadline("2024-06-15")
                .status(TaskStatus::Done),
            TaskRecord::new("someday"),
        ];
        let matrix = EisenhowerMatrix::build(&PriorityClassifier::new(), &tasks, &now());

        assert_eq!(matrix.counts(), [2, 2, 1, 2]);
        assert_eq!(matrix.len(), tasks.len());

        let titles: Vec<_> = matrix.do_first.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, ["b overdue", "a today"]);

        let titles: Vec<_> = matrix.schedule.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, ["plan", "undated"]);

        assert_eq!(matrix.delegate[0].urgency, Urgency::DueToday);
        assert!(matrix
            .bucket(Quadrant::Eliminate)
            .iter()
            .any(|e| e.urgency == Urgency::Closed));
    }

    #[test]
    fn test_due_date_shown_in_viewer_zone() {
        // 01:00 on the 16th at +05:00 is still the 15th in UTC.
        let task = TaskRecord::new("late call")
            .priority(TaskPriority::High)
            .deadline("2024-06-16T01:00:00+05:00");
        let entry = MatrixEntry::new(&PriorityClassifier::new(), &task, &now());

        assert_eq!(entry.urgency, Urgency::DueToday);
        assert_eq!(entry.quadrant, Quadrant::DoFirst);
        assert_eq!(entry.due, NaiveDate::from_ymd_opt(2024, 6, 15));

        let matrix = EisenhowerMatrix::build(&PriorityClassifier::new(), &[task], &now());
        assert_eq!(matrix.do_first, [entry]);
    }
}
