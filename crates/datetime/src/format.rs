//! Formatting canonical values for display and parsing them back.
//!
//! Every function here is total: input that cannot be understood is handed
//! back unchanged (formatting) or reported as `None` (parsing).

use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveTime, Timelike};
use planwise_core::CanonicalValue;
use regex::Regex;

use crate::pattern::{DatePattern, TimePattern};

static SLASHED_DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]{2})/([0-9]{2})/([0-9]{4})$").unwrap()
});

static DASHED_DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]{4})-([0-9]{2})-([0-9]{2})$").unwrap()
});

static NAMED_DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z]{3}) ([0-9]{2}), ([0-9]{4})$").unwrap()
});

static CLOCK_24H_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]{1,2}):([0-9]{2})(?::([0-9]{2}))?$").unwrap()
});

static CLOCK_12H_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]{1,2}):([0-9]{2})\s*([AaPp][Mm])$").unwrap()
});

const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Render a calendar date with `pattern`.
pub fn render_date(date: NaiveDate, pattern: DatePattern) -> String {
    date.format(pattern.strftime()).to_string()
}

/// Format a canonical date or date-time for display.
///
/// Date-times contribute the calendar date in their own offset. Input that
/// is not a canonical value is returned unchanged.
pub fn format_date(value: &str, pattern: DatePattern) -> String {
    match CanonicalValue::parse(value) {
        Some(v) => render_date(v.date(), pattern),
        None => value.to_string(),
    }
}

/// Parse display text written in exactly `pattern`.
///
/// Fields must be zero-padded. Surrounding whitespace is ignored and month
/// abbreviations match case-insensitively. Impossible calendar dates yield
/// `None`.
pub fn parse_display_date(text: &str, pattern: DatePattern) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    let (year, month, day) = match pattern {
        DatePattern::MonthDayYear => {
            let caps = SLASHED_DATE_RE.captures(text)?;
            (number(&caps[3])?, number(&caps[1])?, number(&caps[2])?)
        }
        DatePattern::DayMonthYear => {
            let caps = SLASHED_DATE_RE.captures(text)?;
            (number(&caps[3])?, number(&caps[2])?, number(&caps[1])?)
        }
        DatePattern::YearMonthDay => {
            let caps = DASHED_DATE_RE.captures(text)?;
            (number(&caps[1])?, number(&caps[2])?, number(&caps[3])?)
        }
        DatePattern::MonthNameDayYear => {
            let caps = NAMED_DATE_RE.captures(text)?;
            (number(&caps[3])?, month_from_abbreviation(&caps[1])?, number(&caps[2])?)
        }
    };

    NaiveDate::from_ymd_opt(year as i32, month, day)
}

/// Parse display text into a canonical `yyyy-mm-dd` string.
pub fn parse_display_date_canonical(text: &str, pattern: DatePattern) -> Option<String> {
    parse_display_date(text, pattern).map(|d| CanonicalValue::Date(d).to_string())
}

/// Format a 24-hour `HH:MM` clock time for display.
///
/// `12h` yields `h:MM AM|PM`; `24h` yields zero-padded `HH:MM`. Seconds, if
/// present, are dropped. Malformed or out-of-range input is returned
/// unchanged.
pub fn format_time(text: &str, pattern: TimePattern) -> String {
    match parse_clock(text) {
        Some(time) => render_time(time, pattern),
        None => text.to_string(),
    }
}

/// Render a time of day with `pattern`.
pub fn render_time(time: NaiveTime, pattern: TimePattern) -> String {
    let (hour, minute) = (time.hour(), time.minute());
    match pattern {
        TimePattern::TwentyFourHour => format!("{hour:02}:{minute:02}"),
        TimePattern::TwelveHour => {
            let suffix = if hour < 12 { "AM" } else { "PM" };
            let hour = match hour % 12 {
                0 => 12,
                h => h,
            };
            format!("{hour}:{minute:02} {suffix}")
        }
    }
}

/// Parse a displayed time back into a canonical 24-hour `HH:MM` string.
pub fn parse_display_time(text: &str, pattern: TimePattern) -> Option<String> {
    let text = text.trim();
    let time = match pattern {
        TimePattern::TwentyFourHour => parse_clock(text)?,
        TimePattern::TwelveHour => {
            let caps = CLOCK_12H_RE.captures(text)?;
            let hour: u32 = number(&caps[1])?;
            let minute: u32 = number(&caps[2])?;
            if !(1..=12).contains(&hour) {
                return None;
            }
            let pm = caps[3].eq_ignore_ascii_case("pm");
            let hour = match (hour, pm) {
                (12, false) => 0,
                (12, true) => 12,
                (h, false) => h,
                (h, true) => h + 12,
            };
            NaiveTime::from_hms_opt(hour, minute, 0)?
        }
    };
    Some(render_time(time, TimePattern::TwentyFourHour))
}

/// Format a canonical value as date plus time of day.
///
/// The time is the wall clock in the value's own offset; convert instants
/// with [`crate::utc_to_local`] first to show them in the user's zone. Plain
/// dates render as the date alone.
pub fn format_datetime(value: &str, date_pattern: DatePattern, time_pattern: TimePattern) -> String {
    let Some(v) = CanonicalValue::parse(value) else {
        return value.to_string();
    };
    let date = render_date(v.date(), date_pattern);
    if !v.has_time() {
        return date;
    }
    let time = render_time(v.naive_local().time(), time_pattern);
    format!("{date} {time}")
}

fn parse_clock(text: &str) -> Option<NaiveTime> {
    let caps = CLOCK_24H_RE.captures(text.trim())?;
    let hour = number(&caps[1])?;
    let minute = number(&caps[2])?;
    let second = match caps.get(3) {
        Some(s) => number(s.as_str())?,
        None => 0,
    };
    NaiveTime::from_hms_opt(hour, minute, second)
}

fn month_from_abbreviation(name: &str) -> Option<u32> {
    MONTH_ABBREVIATIONS
        .iter()
        .position(|m| m.eq_ignore_ascii_case(name))
        .map(|i| i as u32 + 1)
}

fn number(digits: &str) -> Option<u32> {
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn days_in_year(year: i32) -> u32 {
        ymd(year, 12, 31).ordinal()
    }

    #[test]
    fn test_format_date_patterns() {
        let v = "2024-03-05";
        assert_eq!(format_date(v, DatePattern::MonthDayYear), "03/05/2024");
        assert_eq!(format_date(v, DatePattern::DayMonthYear), "05/03/2024");
        assert_eq!(format_date(v, DatePattern::YearMonthDay), "2024-03-05");
        assert_eq!(format_date(v, DatePattern::MonthNameDayYear), "Mar 05, 2024");
    }

    #[test]
    fn test_format_date_from_datetime() {
        assert_eq!(
            format_date("2024-12-25T14:30:00Z", DatePattern::MonthDayYear),
            "12/25/2024"
        );
        assert_eq!(
            format_date("2024-12-31T23:30:00-08:00", DatePattern::YearMonthDay),
            "2024-12-31"
        );
    }

    #[test]
    fn test_format_date_invalid_passthrough() {
        assert_eq!(format_date("next friday", DatePattern::MonthDayYear), "next friday");
        assert_eq!(format_date("", DatePattern::YearMonthDay), "");
        assert_eq!(format_date("2024-13-01", DatePattern::DayMonthYear), "2024-13-01");
    }

    #[test]
    fn test_parse_display_date() {
        assert_eq!(parse_display_date("12/25/2024", DatePattern::MonthDayYear), Some(ymd(2024, 12, 25)));
        assert_eq!(parse_display_date("25/12/2024", DatePattern::DayMonthYear), Some(ymd(2024, 12, 25)));
        assert_eq!(parse_display_date("2024-12-25", DatePattern::YearMonthDay), Some(ymd(2024, 12, 25)));
        assert_eq!(parse_display_date("Dec 25, 2024", DatePattern::MonthNameDayYear), Some(ymd(2024, 12, 25)));
        assert_eq!(parse_display_date(" dec 25, 2024 ", DatePattern::MonthNameDayYear), Some(ymd(2024, 12, 25)));
    }

    #[test]
    fn test_parse_display_date_rejects() {
        // wrong pattern
        assert_eq!(parse_display_date("2024-12-25", DatePattern::MonthDayYear), None);
        assert_eq!(parse_display_date("25/12/2024", DatePattern::MonthDayYear), None);
        // impossible dates
        assert_eq!(parse_display_date("04/31/2024", DatePattern::MonthDayYear), None);
        assert_eq!(parse_display_date("29/02/2023", DatePattern::DayMonthYear), None);
        assert_eq!(parse_display_date("Foo 01, 2024", DatePattern::MonthNameDayYear), None);
        // malformed
        assert_eq!(parse_display_date("", DatePattern::YearMonthDay), None);
        assert_eq!(parse_display_date("   ", DatePattern::YearMonthDay), None);
        assert_eq!(parse_display_date("1/5/2024", DatePattern::MonthDayYear), None);
        assert_eq!(parse_display_date("2024-1-05", DatePattern::YearMonthDay), None);
        assert_eq!(parse_display_date("Dec 5, 2024", DatePattern::MonthNameDayYear), None);
        assert_eq!(parse_display_date("12/25/2024 extra", DatePattern::MonthDayYear), None);
    }

    #[test]
    fn test_leap_day() {
        assert_eq!(parse_display_date("02/29/2024", DatePattern::MonthDayYear), Some(ymd(2024, 2, 29)));
        assert_eq!(parse_display_date("02/29/1900", DatePattern::MonthDayYear), None);
        assert_eq!(parse_display_date("02/29/2000", DatePattern::MonthDayYear), Some(ymd(2000, 2, 29)));
    }

    #[test]
    fn test_round_trip_1900_to_2100() {
        for pattern in DatePattern::ALL {
            for year in 1900..=2100 {
                for ordinal in 1..=days_in_year(year) {
                    let date = NaiveDate::from_yo_opt(year, ordinal).unwrap();
                    let canonical = CanonicalValue::Date(date).to_string();
                    let shown = format_date(&canonical, pattern);
                    assert_eq!(parse_display_date(&shown, pattern), Some(date), "{pattern} {shown}");
                }
            }
        }
    }

    #[test]
    fn test_parse_display_date_canonical() {
        assert_eq!(
            parse_display_date_canonical("Jan 02, 2025", DatePattern::MonthNameDayYear).as_deref(),
            Some("2025-01-02")
        );
        assert_eq!(parse_display_date_canonical("bad", DatePattern::YearMonthDay), None);
    }

    #[test]
    fn test_format_time_12h() {
        assert_eq!(format_time("00:00", TimePattern::TwelveHour), "12:00 AM");
        assert_eq!(format_time("00:45", TimePattern::TwelveHour), "12:45 AM");
        assert_eq!(format_time("09:05", TimePattern::TwelveHour), "9:05 AM");
        assert_eq!(format_time("12:00", TimePattern::TwelveHour), "12:00 PM");
        assert_eq!(format_time("12:30", TimePattern::TwelveHour), "12:30 PM");
        assert_eq!(format_time("13:05", TimePattern::TwelveHour), "1:05 PM");
        assert_eq!(format_time("23:59", TimePattern::TwelveHour), "11:59 PM");
    }

    #[test]
    fn test_format_time_24h() {
        assert_eq!(format_time("23:59", TimePattern::TwentyFourHour), "23:59");
        assert_eq!(format_time("7:05", TimePattern::TwentyFourHour), "07:05");
        assert_eq!(format_time("07:05:59", TimePattern::TwentyFourHour), "07:05");
    }

    #[test]
    fn test_format_time_malformed_passthrough() {
        for bad in ["", "noon", "24:00", "12:60", "1230", "12:3", "-1:00", "12:00:61"] {
            assert_eq!(format_time(bad, TimePattern::TwelveHour), bad);
            assert_eq!(format_time(bad, TimePattern::TwentyFourHour), bad);
        }
    }

    #[test]
    fn test_parse_display_time() {
        assert_eq!(parse_display_time("12:00 AM", TimePattern::TwelveHour).as_deref(), Some("00:00"));
        assert_eq!(parse_display_time("12:15 pm", TimePattern::TwelveHour).as_deref(), Some("12:15"));
        assert_eq!(parse_display_time("1:05 PM", TimePattern::TwelveHour).as_deref(), Some("13:05"));
        assert_eq!(parse_display_time("11:59PM", TimePattern::TwelveHour).as_deref(), Some("23:59"));
        assert_eq!(parse_display_time("13:05 PM", TimePattern::TwelveHour), None);
        assert_eq!(parse_display_time("0:30 AM", TimePattern::TwelveHour), None);
        assert_eq!(parse_display_time("9:30", TimePattern::TwentyFourHour).as_deref(), Some("09:30"));
    }

    #[test]
    fn test_time_round_trip() {
        for hour in 0..24 {
            for minute in [0, 1, 30, 59] {
                let canonical = format!("{hour:02}:{minute:02}");
                for pattern in TimePattern::ALL {
                    let shown = format_time(&canonical, pattern);
                    assert_eq!(parse_display_time(&shown, pattern), Some(canonical.clone()));
                }
            }
        }
    }

    #[test]
    fn test_format_datetime() {
        assert_eq!(
            format_datetime("2024-12-25T14:30:00Z", DatePattern::MonthDayYear, TimePattern::TwelveHour),
            "12/25/2024 2:30 PM"
        );
        assert_eq!(
            format_datetime("2024-12-25T09:05", DatePattern::MonthNameDayYear, TimePattern::TwentyFourHour),
            "Dec 25, 2024 09:05"
        );
        assert_eq!(
            format_datetime("2024-12-25", DatePattern::DayMonthYear, TimePattern::TwelveHour),
            "25/12/2024"
        );
        assert_eq!(
            format_datetime("garbage", DatePattern::DayMonthYear, TimePattern::TwelveHour),
            "garbage"
        );
    }
}
