//! Business-day aging and date parsing
//!
//! Weekdays are counted end-exclusive (`[start, end)`), Saturdays and Sundays
//! excluded, no holiday calendar. When `end` precedes `start` the count is
//! negated, matching the usual busday-count convention.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

use crate::error::{ReportError, Result};
use crate::record::{AgeDays, FieldValue};

/// Date-only layouts, two-digit years first so `%Y` never swallows them
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%m/%d/%y",
    "%m/%d/%Y",
    "%Y/%m/%d",
    "%m-%d-%Y",
    "%d-%b-%Y",
    "%b %d, %Y",
];

/// Date-time layouts; the time part is dropped
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%m/%d/%y %H:%M",
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %I:%M %p",
    "%m/%d/%Y %I:%M:%S %p",
];

/// Count weekdays in `[start, end)`; negative when `end < start`
pub fn business_days(start: NaiveDate, end: NaiveDate) -> i64 {
    if end < start {
        return -business_days(end, start);
    }

    let days = (end - start).num_days();
    let mut count = (days / 7) * 5;
    let mut weekday = start.weekday().num_days_from_monday();
    for _ in 0..days % 7 {
        if weekday < 5 {
            count += 1;
        }
        weekday = (weekday + 1) % 7;
    }
    count
}

/// Age of a work order; a missing start date is "unavailable", not zero
pub fn checked_business_days(start: Option<NaiveDate>, end: NaiveDate) -> AgeDays {
    start.map(|start| business_days(start, end))
}

/// Parse a date or date-time string, keeping only the calendar date
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    let text = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Ok(dt.date_naive());
    }
    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(text, fmt) {
            return Ok(date);
        }
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, fmt) {
            return Ok(dt.date());
        }
    }

    Err(ReportError::UnparseableDate(value.to_string()))
}

/// Interpret a field as a date; blanks are `Ok(None)`
pub fn date_from_value(value: &FieldValue) -> Result<Option<NaiveDate>> {
    match value {
        FieldValue::Date(date) => Ok(Some(*date)),
        v if v.is_empty() => Ok(None),
        FieldValue::Text(text) => parse_date(text).map(Some),
        other => Err(ReportError::UnparseableDate(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_monday_to_next_monday() {
        // 2024-01-01 is a Monday
        assert_eq!(business_days(d(2024, 1, 1), d(2024, 1, 8)), 5);
    }

    #[test]
    fn test_end_is_exclusive() {
        assert_eq!(business_days(d(2024, 1, 1), d(2024, 1, 1)), 0);
        assert_eq!(business_days(d(2024, 1, 1), d(2024, 1, 2)), 1);
        // Friday → Monday counts only the Friday
        assert_eq!(business_days(d(2024, 1, 5), d(2024, 1, 8)), 1);
        // Saturday → Monday counts nothing
        assert_eq!(business_days(d(2024, 1, 6), d(2024, 1, 8)), 0);
    }

    #[test]
    fn test_long_range() {
        // 2024-01-01 (Mon) to 2024-12-30 (Mon): 52 weeks
        assert_eq!(business_days(d(2024, 1, 1), d(2024, 12, 30)), 260);
        assert_eq!(business_days(d(2024, 1, 3), d(2024, 1, 19)), 12);
    }

    #[test]
    fn test_reversed_range_is_negative() {
        assert_eq!(business_days(d(2024, 1, 8), d(2024, 1, 1)), -5);
        assert_eq!(business_days(d(2024, 1, 8), d(2024, 1, 5)), -1);
    }

    #[test]
    fn test_checked_matches_plain() {
        for (s, e) in [
            (d(2023, 12, 29), d(2024, 2, 14)),
            (d(2024, 2, 14), d(2023, 12, 29)),
            (d(2024, 3, 2), d(2024, 3, 3)),
        ] {
            assert_eq!(checked_business_days(Some(s), e), Some(business_days(s, e)));
        }
    }

    #[test]
    fn test_extreme_range_does_not_overflow() {
        let days = business_days(NaiveDate::MIN, NaiveDate::MAX);
        assert!(days > 0);
        assert_eq!(business_days(NaiveDate::MAX, NaiveDate::MIN), -days);
    }

    #[test]
    fn test_missing_start_is_unavailable() {
        assert_eq!(checked_business_days(None, d(2024, 1, 8)), None);
        assert_eq!(checked_business_days(Some(d(2024, 1, 1)), d(2024, 1, 8)), Some(5));
    }

    #[test]
    fn test_parse_date_layouts() {
        let expected = d(2024, 3, 9);
        for text in [
            "2024-03-09",
            "03/09/2024",
            "3/9/2024",
            "3/9/24",
            "2024/03/09",
            "2024-03-09 14:05:00",
            "2024-03-09T14:05:00.123",
            "2024-03-09T14:05:00-05:00",
            "3/9/2024 14:05",
            "3/9/2024 2:05:00 PM",
            " 09-Mar-2024 ",
        ] {
            assert_eq!(parse_date(text).unwrap(), expected, "{text}");
        }
    }

    #[test]
    fn test_parse_date_rejects_garbage() {
        assert!(matches!(
            parse_date("next tuesday"),
            Err(ReportError::UnparseableDate(_))
        ));
        assert!(parse_date("13/45/2024").is_err());
    }

    #[test]
    fn test_date_from_value() {
        assert_eq!(date_from_value(&FieldValue::Empty).unwrap(), None);
        assert_eq!(date_from_value(&FieldValue::text("  ")).unwrap(), None);
        assert_eq!(
            date_from_value(&FieldValue::text("2024-01-02")).unwrap(),
            Some(d(2024, 1, 2))
        );
        assert_eq!(
            date_from_value(&FieldValue::Date(d(2024, 1, 2))).unwrap(),
            Some(d(2024, 1, 2))
        );
        assert!(date_from_value(&FieldValue::Number(45000.0)).is_err());
    }
}
