// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for calendar-date parsing and formatting.

use chrono::NaiveDate;

/// Parse a `YYYY-MM-DD` date string.
pub fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

/// Format a date as ISO `YYYY-MM-DD`.
pub fn format_date_iso(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Format a date in long form: abbreviated weekday, abbreviated month,
/// zero-padded day, year (e.g. `Thu Aug 07 2026`).
pub fn format_date_long(date: NaiveDate) -> String {
    date.format("%a %b %d %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_calendar_date() {
        let date = parse_calendar_date("2026-08-07").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2026, 8, 7).unwrap());

        assert!(parse_calendar_date("not-a-date").is_none());
        assert!(parse_calendar_date("2026-13-01").is_none());
        assert!(parse_calendar_date("").is_none());
    }

    #[test]
    fn test_format_date_iso() {
        let date = NaiveDate::from_ymd_opt(2026, 8, 7).unwrap();
        assert_eq!(format_date_iso(date), "2026-08-07");
    }

    #[test]
    fn test_format_date_long_pads_day() {
        let date = NaiveDate::from_ymd_opt(2026, 8, 7).unwrap();
        assert_eq!(format_date_long(date), "Fri Aug 07 2026");

        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        assert_eq!(format_date_long(date), "Mon Jan 15 2024");
    }
}
