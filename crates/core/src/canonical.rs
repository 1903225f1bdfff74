//! Canonical ISO-8601 date/time values exchanged with the backend.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::ParseError;

/// Naive date-time layouts accepted besides RFC 3339.
const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// A parsed canonical value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum CanonicalValue {
    /// Calendar date, `2024-12-25`
    Date(NaiveDate),
    /// Offset-aware instant, `2024-12-25T14:30:00Z`
    DateTime(DateTime<FixedOffset>),
    /// Wall-clock date-time without zone, `2024-12-25T14:30:00`
    Naive(NaiveDateTime),
}

impl CanonicalValue {
    /// Parse a canonical string. Returns `None` for anything unrecognized.
    pub fn parse(raw: &str) -> Option<Self> {
        let s = raw.trim();
        if s.is_empty() {
            return None;
        }

        if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            return Some(Self::Date(date));
        }
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Some(Self::DateTime(dt));
        }
        NAIVE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
            .map(Self::Naive)
    }

    /// Calendar date as written (in the value's own offset for instants).
    pub fn date(&self) -> NaiveDate {
        match self {
            Self::Date(d) => *d,
            Self::DateTime(dt) => dt.date_naive(),
            Self::Naive(n) => n.date(),
        }
    }

    /// Wall-clock date-time; dates read as midnight.
    pub fn naive_local(&self) -> NaiveDateTime {
        match self {
            Self::Date(d) => d.and_time(chrono::NaiveTime::MIN),
            Self::DateTime(dt) => dt.naive_local(),
            Self::Naive(n) => *n,
        }
    }

    /// Whether the value carries a time of day.
    pub fn has_time(&self) -> bool {
        !matches!(self, Self::Date(_))
    }

    /// The instant this value denotes, reading zone-less values in `tz`.
    ///
    /// Returns `None` for plain dates, and for naive values that fall into a
    /// DST gap of `tz`.
    pub fn instant_in<Tz: TimeZone>(&self, tz: &Tz) -> Option<DateTime<Utc>> {
        match self {
            Self::Date(_) => None,
            Self::DateTime(dt) => Some(dt.with_timezone(&Utc)),
            Self::Naive(n) => tz
                .from_local_datetime(n)
                .earliest()
                .map(|dt| dt.with_timezone(&Utc)),
        }
    }
}

impl std::str::FromStr for CanonicalValue {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| ParseError::InvalidDate(s.to_string()))
    }
}

impl std::fmt::Display for CanonicalValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            Self::DateTime(dt) => {
                f.write_str(&dt.to_rfc3339_opts(chrono::SecondsFormat::AutoSi, true))
            }
            Self::Naive(n) => write!(f, "{}", n.format("%Y-%m-%dT%H:%M:%S%.f")),
        }
    }
}
