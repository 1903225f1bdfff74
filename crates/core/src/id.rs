//! Identifiers for Planwise records.
//!
//! Records are owned by a remote backend, so identifiers are kept as opaque
//! strings. Locally created records get a ULID.

use serde::{Deserialize, Deserializer, Serialize};
use ulid::Ulid;

use crate::ParseError;

/// Unique identifier for a Goal
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GoalId(#[serde(deserialize_with = "lenient_id")] String);

impl GoalId {
    /// Generate a new GoalId
    pub fn new() -> Self {
        Self(Ulid::new().to_string())
    }

    /// Borrow the raw identifier
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for GoalId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for GoalId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::str::FromStr for GoalId {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        non_empty(s).map(Self)
    }
}

/// Unique identifier for a Milestone
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MilestoneId(#[serde(deserialize_with = "lenient_id")] String);

impl MilestoneId {
    /// Generate a new MilestoneId
    pub fn new() -> Self {
        Self(Ulid::new().to_string())
    }

    /// Borrow the raw identifier
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for MilestoneId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for MilestoneId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::str::FromStr for MilestoneId {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        non_empty(s).map(Self)
    }
}

/// Unique identifier for a Task
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(#[serde(deserialize_with = "lenient_id")] String);

impl TaskId {
    /// Generate a new TaskId
    pub fn new() -> Self {
        Self(Ulid::new().to_string())
    }

    /// Borrow the raw identifier
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::str::FromStr for TaskId {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        non_empty(s).map(Self)
    }
}

/// Reference to a key area (task grouping shown in the UI)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyAreaId(#[serde(deserialize_with = "lenient_id")] String);

impl KeyAreaId {
    /// Borrow the raw identifier
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for KeyAreaId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::str::FromStr for KeyAreaId {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        non_empty(s).map(Self)
    }
}

/// Backends send ids as strings or integers; both read as the same text.
fn lenient_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected a string or number identifier, found {other}"
        ))),
    }
}

fn non_empty(s: &str) -> Result<String, ParseError> {
    let s = s.trim();
    if s.is_empty() {
        Err(ParseError::EmptyId)
    } else {
        Ok(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_ulids() {
        let id = TaskId::new();
        assert!(id.as_str().parse::<Ulid>().is_ok());
        assert_ne!(GoalId::new(), GoalId::new());
    }

    #[test]
    fn test_foreign_ids_are_accepted() {
        let id: KeyAreaId = " 42 ".parse().unwrap();
        assert_eq!(id.as_str(), "42");
        assert!("   ".parse::<TaskId>().is_err());
    }

    #[test]
    fn test_ids_serialize_transparently() {
        let id: GoalId = "goal-7".parse().unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"goal-7\"");
    }

    #[test]
    fn test_numeric_ids_deserialize_as_text() {
        let id: TaskId = serde_json::from_str("17").unwrap();
        assert_eq!(id.as_str(), "17");

        let id: KeyAreaId = serde_json::from_str("\"ka-3\"").unwrap();
        assert_eq!(id.as_str(), "ka-3");

        assert!(serde_json::from_str::<GoalId>("[1]").is_err());
        assert!(serde_json::from_str::<MilestoneId>("null").is_err());
    }
}
