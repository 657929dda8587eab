//! Resolution of the `start`/`end` query parameters into an inclusive day range.

use chrono::{DateTime, Datelike, Days, Local, NaiveDate, NaiveDateTime, NaiveTime};

use crate::metrics::error::MetricsError;

const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

/// Date keys are compared as `YYYY-MM-DD` strings, so only four-digit years
/// order correctly.
const MIN_YEAR: i32 = 0;
const MAX_YEAR: i32 = 9999;

/// Inclusive range, from local midnight of the first day to 23:59:59.999 of
/// the last one. Documents are matched on their `YYYY-MM-DD` date key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl DateRange {
    pub fn for_days(first: NaiveDate, last: NaiveDate) -> Result<Self, MetricsError> {
        Ok(Self {
            start: first.and_time(NaiveTime::MIN),
            end: end_of_day(last)?,
        })
    }

    pub fn single_day(day: NaiveDate) -> Result<Self, MetricsError> {
        Self::for_days(day, day)
    }

    /// `days` days back from `last`, both ends included.
    pub fn trailing(last: NaiveDate, days: u32) -> Result<Self, MetricsError> {
        let first = last
            .checked_sub_days(Days::new(u64::from(days)))
            .ok_or_else(|| MetricsError::InvalidDate(last.to_string()))?;
        Self::for_days(first, last)
    }

    pub fn start_key(&self) -> String {
        self.start.format(DATE_KEY_FORMAT).to_string()
    }

    pub fn end_key(&self) -> String {
        self.end.format(DATE_KEY_FORMAT).to_string()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.start.date()
    }

    pub fn last_day(&self) -> NaiveDate {
        self.end.date()
    }

    /// Same comparison the store runs (`$gte`/`$lte` on the date string).
    pub fn contains_key(&self, date: &str) -> bool {
        self.start_key().as_str() <= date && date <= self.end_key().as_str()
    }
}

fn end_of_day(day: NaiveDate) -> Result<NaiveDateTime, MetricsError> {
    day.and_hms_milli_opt(23, 59, 59, 999)
        .ok_or_else(|| MetricsError::InvalidDate(day.to_string()))
}

/// The day before `day`.
pub fn previous_day(day: NaiveDate) -> Result<NaiveDate, MetricsError> {
    day.pred_opt().ok_or_else(|| MetricsError::InvalidDate(day.to_string()))
}

fn parse_any(trimmed: &str) -> Option<NaiveDate> {
    if let Ok(day) = NaiveDate::parse_from_str(trimmed, DATE_KEY_FORMAT) {
        return Some(day);
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(timestamp.date_naive());
    }
    NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|timestamp| timestamp.date())
}

/// Parses a calendar date. Full timestamps are accepted and cut to their date.
pub fn parse_day(raw: &str) -> Result<NaiveDate, MetricsError> {
    parse_any(raw.trim())
        .filter(|day| (MIN_YEAR..=MAX_YEAR).contains(&day.year()))
        .ok_or_else(|| MetricsError::InvalidDate(raw.to_string()))
}

fn parse_optional(raw: Option<&str>) -> Result<Option<NaiveDate>, MetricsError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => parse_day(value).map(Some),
    }
}

/// Resolves against an explicit "today".
pub fn resolve_range_on(
    today: NaiveDate,
    start: Option<&str>,
    end: Option<&str>,
) -> Result<DateRange, MetricsError> {
    let first = parse_optional(start)?.unwrap_or(today);
    let last = parse_optional(end)?.unwrap_or(today);
    DateRange::for_days(first, last)
}

/// Missing bounds default to the current local day.
pub fn resolve_range(start: Option<&str>, end: Option<&str>) -> Result<DateRange, MetricsError> {
    resolve_range_on(Local::now().date_naive(), start, end)
}

/// Single-date parameter (`?date=`, `?end=`), today when absent.
pub fn resolve_day(raw: Option<&str>) -> Result<NaiveDate, MetricsError> {
    Ok(parse_optional(raw)?.unwrap_or_else(|| Local::now().date_naive()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn defaults_to_today() {
        let today = day(2024, 3, 15);
        let range = resolve_range_on(today, None, None).unwrap();

        assert_eq!(range.start, today.and_hms_opt(0, 0, 0).unwrap());
        assert_eq!(range.end, today.and_hms_milli_opt(23, 59, 59, 999).unwrap());
        assert_eq!(range.start_key(), "2024-03-15");
        assert_eq!(range.end_key(), "2024-03-15");
    }

    #[test]
    fn empty_strings_count_as_missing() {
        let today = day(2024, 3, 15);
        let range = resolve_range_on(today, Some(""), Some("  ")).unwrap();
        assert_eq!(range, DateRange::single_day(today).unwrap());
    }

    #[test]
    fn explicit_bounds_are_inclusive() {
        let range = resolve_range_on(day(2024, 3, 15), Some("2024-02-01"), Some("2024-02-29")).unwrap();

        assert!(range.contains_key("2024-02-01"));
        assert!(range.contains_key("2024-02-29"));
        assert!(!range.contains_key("2024-01-31"));
        assert!(!range.contains_key("2024-03-01"));
    }

    #[test]
    fn only_one_bound_given() {
        let today = day(2024, 3, 15);
        let range = resolve_range_on(today, Some("2024-03-01"), None).unwrap();
        assert_eq!(range.start_key(), "2024-03-01");
        assert_eq!(range.end_key(), "2024-03-15");
    }

    #[test]
    fn timestamps_are_cut_to_their_date() {
        assert_eq!(parse_day("2024-03-01T10:15:00Z").unwrap(), day(2024, 3, 1));
        assert_eq!(parse_day("2024-03-01T10:15:00.250").unwrap(), day(2024, 3, 1));
    }

    #[test]
    fn rejects_malformed_dates() {
        let today = day(2024, 3, 15);
        for bad in ["yesterday", "2024-13-01", "2024-02-30", "03/01/2024"] {
            match resolve_range_on(today, Some(bad), None) {
                Err(MetricsError::InvalidDate(raw)) => assert_eq!(raw, bad),
                other => panic!("expected InvalidDate for {bad}, got {other:?}"),
            }
        }
        assert!(matches!(
            resolve_range_on(today, None, Some("soon")),
            Err(MetricsError::InvalidDate(_))
        ));
    }

    #[test]
    fn inverted_range_matches_nothing() {
        let range = resolve_range_on(day(2024, 3, 15), Some("2024-03-10"), Some("2024-03-01")).unwrap();
        assert!(!range.contains_key("2024-03-05"));
        assert!(!range.contains_key("2024-03-10"));
    }

    #[test]
    fn trailing_window_includes_both_ends() {
        let range = DateRange::trailing(day(2024, 3, 31), 90).unwrap();
        assert_eq!(range.start_key(), "2024-01-01");
        assert_eq!(range.end_key(), "2024-03-31");
    }

    #[test]
    fn years_beyond_four_digits_are_rejected() {
        let today = day(2024, 3, 15);
        for bad in ["+262142-12-31", "-262143-01-01", "10000-01-01", "-0001-12-31"] {
            assert!(
                matches!(resolve_range_on(today, None, Some(bad)), Err(MetricsError::InvalidDate(_))),
                "expected InvalidDate for {bad}"
            );
            assert!(matches!(parse_day(bad), Err(MetricsError::InvalidDate(_))));
        }
        assert_eq!(parse_day("9999-12-31").unwrap(), day(9999, 12, 31));
    }

    #[test]
    fn calendar_edges_do_not_overflow() {
        let range = DateRange::single_day(NaiveDate::MAX).unwrap();
        assert_eq!(range.last_day(), NaiveDate::MAX);

        assert!(matches!(
            DateRange::trailing(NaiveDate::MIN, 90),
            Err(MetricsError::InvalidDate(_))
        ));
        assert!(matches!(previous_day(NaiveDate::MIN), Err(MetricsError::InvalidDate(_))));
        assert_eq!(previous_day(day(2024, 3, 1)).unwrap(), day(2024, 2, 29));
    }
}
