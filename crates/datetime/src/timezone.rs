//! Conversion between local wall-clock values and canonical UTC instants.
//!
//! Unknown zone identifiers fall back to UTC. Unparseable input is returned
//! unchanged by the string functions.

use chrono::{DateTime, Duration, LocalResult, NaiveDateTime, Offset, SecondsFormat, TimeZone, Utc};
use chrono_tz::Tz;
use planwise_core::CanonicalValue;
use tracing::warn;

const LOCAL_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Look up an IANA zone identifier.
pub fn resolve_zone(name: &str) -> Option<Tz> {
    name.trim().parse::<Tz>().ok()
}

/// Convert a local wall-clock time in `zone` to a UTC instant.
///
/// A wall time repeated by a DST fold resolves to the earlier instant. A wall
/// time skipped by a DST gap is read with the offset in force before the gap,
/// which moves it forward by the gap's length.
pub fn local_to_utc_naive(local: NaiveDateTime, zone: &str) -> DateTime<Utc> {
    match resolve_zone(zone) {
        Some(tz) => resolve_local(&tz, local),
        None => {
            warn!(zone, "Unknown time zone, treating local time as UTC");
            Utc.from_utc_datetime(&local)
        }
    }
}

/// Convert a UTC instant to the wall-clock time in `zone`.
pub fn utc_to_local_naive(instant: DateTime<Utc>, zone: &str) -> NaiveDateTime {
    match resolve_zone(zone) {
        Some(tz) => instant.with_timezone(&tz).naive_local(),
        None => {
            warn!(zone, "Unknown time zone, showing UTC time");
            instant.naive_utc()
        }
    }
}

/// Convert a canonical local value to a canonical UTC string.
///
/// Zone-less date-times and dates (read as midnight) are interpreted in
/// `zone`. Values that already carry an offset denote an instant and are
/// only re-expressed in UTC.
pub fn local_to_utc(local: &str, zone: &str) -> String {
    let instant = match CanonicalValue::parse(local) {
        Some(CanonicalValue::DateTime(dt)) => dt.with_timezone(&Utc),
        Some(v) => local_to_utc_naive(v.naive_local(), zone),
        None => return local.to_string(),
    };
    instant.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// Convert a canonical UTC value to a local `YYYY-MM-DDTHH:MM:SS` string.
///
/// Zone-less date-times are read as UTC. Plain dates have no instant and are
/// returned unchanged, as is unparseable input.
pub fn utc_to_local(value: &str, zone: &str) -> String {
    let instant = match CanonicalValue::parse(value) {
        Some(CanonicalValue::DateTime(dt)) => dt.with_timezone(&Utc),
        Some(CanonicalValue::Naive(n)) => Utc.from_utc_datetime(&n),
        Some(CanonicalValue::Date(_)) | None => return value.to_string(),
    };
    utc_to_local_naive(instant, zone).format(LOCAL_FORMAT).to_string()
}

fn resolve_local(tz: &Tz, local: NaiveDateTime) -> DateTime<Utc> {
    match tz.from_local_datetime(&local) {
        LocalResult::Single(dt) => dt.with_timezone(&Utc),
        LocalResult::Ambiguous(earliest, _) => earliest.with_timezone(&Utc),
        LocalResult::None => {
            // Offset in force a day earlier is the one before the gap.
            let probe = local.checked_sub_signed(Duration::days(1)).unwrap_or(local);
            let offset = tz.offset_from_utc_datetime(&probe).fix().local_minus_utc();
            let utc = local
                .checked_sub_signed(Duration::seconds(i64::from(offset)))
                .unwrap_or(local);
            Utc.from_utc_datetime(&utc)
        }
    }
}
