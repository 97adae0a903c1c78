//! Timestamp parsing for type coercion.
//!
//! Accepts ISO 8601 / RFC 3339 forms plus the common US and month-name
//! spellings. Matching is case-insensitive, so lower-cased text such as
//! `2024-01-15t10:30:00z` or `15 jan 2024` still parses. Dates without a time
//! become midnight.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d %b %Y",
    "%d %B %Y",
    "%b %d, %Y",
    "%B %d, %Y",
    "%b %d %Y",
    "%B %d %Y",
];

/// Parses `raw` as a timestamp, or returns `None`.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let trimmed = raw.trim();
    // Every accepted form needs at least a four-digit year and a separator.
    if trimmed.len() < 8 {
        return None;
    }
    let candidate = trimmed.to_ascii_uppercase();

    if let Ok(value) = DateTime::parse_from_rfc3339(&candidate) {
        return Some(value.naive_utc());
    }
    for format in DATETIME_FORMATS {
        if let Ok(value) = NaiveDateTime::parse_from_str(&candidate, format) {
            return Some(value);
        }
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(&candidate, format) {
            return date.and_hms_opt(0, 0, 0);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .and_then(|date| date.and_hms_opt(h, min, s))
            .unwrap()
    }

    #[test]
    fn parses_iso_dates_and_datetimes() {
        assert_eq!(parse_timestamp("2024-01-15"), Some(at(2024, 1, 15, 0, 0, 0)));
        assert_eq!(
            parse_timestamp("2024-01-15 10:30:00"),
            Some(at(2024, 1, 15, 10, 30, 0))
        );
        assert_eq!(
            parse_timestamp("2024-01-15t10:30"),
            Some(at(2024, 1, 15, 10, 30, 0))
        );
    }

    #[test]
    fn parses_offsets_as_utc() {
        assert_eq!(
            parse_timestamp("2024-01-15T10:30:00+02:00"),
            Some(at(2024, 1, 15, 8, 30, 0))
        );
    }

    #[test]
    fn parses_us_and_month_name_forms() {
        assert_eq!(parse_timestamp("01/15/2024"), Some(at(2024, 1, 15, 0, 0, 0)));
        assert_eq!(parse_timestamp("15 jan 2024"), Some(at(2024, 1, 15, 0, 0, 0)));
        assert_eq!(
            parse_timestamp("january 15, 2024"),
            Some(at(2024, 1, 15, 0, 0, 0))
        );
    }

    #[test]
    fn rejects_non_dates() {
        assert_eq!(parse_timestamp("apple"), None);
        assert_eq!(parse_timestamp("2024-13-40"), None);
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("12"), None);
    }
}
