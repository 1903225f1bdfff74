//! Date/time display formatting.
//!
//! Pure conversions between canonical ISO-8601 values and the user's display
//! patterns, IANA time zone conversion, and a TTL cache for the user's
//! display preferences.

#![warn(missing_docs)]

pub mod cache;
pub mod error;
pub mod format;
pub mod formatter;
pub mod pattern;
pub mod store;
pub mod timezone;

pub use cache::{CacheConfig, PreferenceCache, PreferencesChanged};
pub use error::{PatternError, PreferenceError, Result};
pub use format::{
    format_date, format_datetime, format_time, parse_display_date, parse_display_date_canonical,
    parse_display_time, render_date, render_time,
};
pub use formatter::DateTimeFormatter;
pub use pattern::{DatePattern, DisplayPreferences, TimePattern};
pub use store::{InMemoryPreferenceStore, JsonFilePreferenceStore, PreferenceStore};
pub use timezone::{local_to_utc, local_to_utc_naive, resolve_zone, utc_to_local, utc_to_local_naive};
