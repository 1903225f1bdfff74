//! Eisenhower matrix quadrants.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Quadrant id outside `1..=4`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("quadrant id must be between 1 and 4, got {0}")]
pub struct InvalidQuadrant(pub u8);

/// Eisenhower matrix quadrant. Serialized as its integer id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Quadrant {
    /// 1: urgent and important - do now.
    DoFirst,
    /// 2: important but not urgent - schedule.
    Schedule,
    /// 3: urgent but not important - delegate.
    Delegate,
    /// 4: neither - eliminate. Also the fallback bucket.
    Eliminate,
}

impl Quadrant {
    /// All quadrants in id order.
    pub const ALL: [Quadrant; 4] = [Self::DoFirst, Self::Schedule, Self::Delegate, Self::Eliminate];

    /// Quadrant for an urgency/importance pair.
    pub fn from_flags(urgent: bool, important: bool) -> Self {
        match (urgent, important) {
            (true, true) => Self::DoFirst,
            (false, true) => Self::Schedule,
            (true, false) => Self::Delegate,
            (false, false) => Self::Eliminate,
        }
    }

    /// Integer id, 1 to 4.
    pub fn id(&self) -> u8 {
        match self {
            Self::DoFirst => 1,
            Self::Schedule => 2,
            Self::Delegate => 3,
            Self::Eliminate => 4,
        }
    }

    /// Quadrant for an integer id.
    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            1 => Some(Self::DoFirst),
            2 => Some(Self::Schedule),
            3 => Some(Self::Delegate),
            4 => Some(Self::Eliminate),
            _ => None,
        }
    }

    /// Short label.
    pub fn as_label(&self) -> &'static str {
        match self {
            Self::DoFirst => "do",
            Self::Schedule => "schedule",
            Self::Delegate => "delegate",
            Self::Eliminate => "eliminate",
        }
    }

    /// Whether tasks in this quadrant count as urgent.
    pub fn is_urgent(&self) -> bool {
        matches!(self, Self::DoFirst | Self::Delegate)
    }

    /// Whether tasks in this quadrant count as important.
    pub fn is_important(&self) -> bool {
        matches!(self, Self::DoFirst | Self::Schedule)
    }
}

impl From<Quadrant> for u8 {
    fn from(q: Quadrant) -> Self {
        q.id()
    }
}

impl TryFrom<u8> for Quadrant {
    type Error = InvalidQuadrant;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        Self::from_id(id).ok_or(InvalidQuadrant(id))
    }
}

impl fmt::Display for Quadrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_label())
    }
}
