//! Display pattern tokens and user display preferences.
//!
//! The tokens are part of the persisted preference schema and must not be
//! renamed.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PatternError;

/// Date display pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DatePattern {
    /// `12/25/2024`
    #[default]
    #[serde(rename = "MM/dd/yyyy")]
    MonthDayYear,
    /// `25/12/2024`
    #[serde(rename = "dd/MM/yyyy")]
    DayMonthYear,
    /// `2024-12-25`
    #[serde(rename = "yyyy-MM-dd")]
    YearMonthDay,
    /// `Dec 25, 2024`
    #[serde(rename = "MMM dd, yyyy")]
    MonthNameDayYear,
}

impl DatePattern {
    /// Every supported pattern.
    pub const ALL: [DatePattern; 4] = [
        Self::MonthDayYear,
        Self::DayMonthYear,
        Self::YearMonthDay,
        Self::MonthNameDayYear,
    ];

    /// Persisted token.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MonthDayYear => "MM/dd/yyyy",
            Self::DayMonthYear => "dd/MM/yyyy",
            Self::YearMonthDay => "yyyy-MM-dd",
            Self::MonthNameDayYear => "MMM dd, yyyy",
        }
    }

    /// Equivalent chrono format string.
    pub(crate) fn strftime(&self) -> &'static str {
        match self {
            Self::MonthDayYear => "%m/%d/%Y",
            Self::DayMonthYear => "%d/%m/%Y",
            Self::YearMonthDay => "%Y-%m-%d",
            Self::MonthNameDayYear => "%b %d, %Y",
        }
    }
}

impl fmt::Display for DatePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DatePattern {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == s.trim())
            .ok_or_else(|| PatternError::UnknownDate(s.to_string()))
    }
}

/// Time display pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TimePattern {
    /// `2:30 PM`
    #[default]
    #[serde(rename = "12h")]
    TwelveHour,
    /// `14:30`
    #[serde(rename = "24h")]
    TwentyFourHour,
}

impl TimePattern {
    /// Every supported pattern.
    pub const ALL: [TimePattern; 2] = [Self::TwelveHour, Self::TwentyFourHour];

    /// Persisted token.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TwelveHour => "12h",
            Self::TwentyFourHour => "24h",
        }
    }
}

impl fmt::Display for TimePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimePattern {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == s.trim())
            .ok_or_else(|| PatternError::UnknownTime(s.to_string()))
    }
}

/// The user's formatting preferences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayPreferences {
    /// Date pattern
    #[serde(default)]
    pub date_format: DatePattern,

    /// Time pattern
    #[serde(default)]
    pub time_format: TimePattern,
}

impl DisplayPreferences {
    /// Preferences with explicit patterns.
    pub fn new(date_format: DatePattern, time_format: TimePattern) -> Self {
        Self {
            date_format,
            time_format,
        }
    }
}
