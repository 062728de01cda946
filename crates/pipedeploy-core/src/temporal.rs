//! # Temporal Types — Run-Window Calendar Dates
//!
//! Pipelines are run over a window of calendar days given on the command
//! line as `--start-date` and `--end-date`. Both are plain `YYYY-MM-DD`
//! dates with no time or timezone component.
//!
//! Parsing follows `%Y-%m-%d` with the year pinned to exactly four unsigned
//! digits: month and day may omit their leading zero, and out-of-range dates
//! such as `2022-02-30` are rejected. Formatting is
//! always zero-padded, so any zero-padded input round-trips byte for byte.

use chrono::NaiveDate;

use crate::error::RuleError;

/// The `chrono` format string for run-window dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// The human-readable form of [`DATE_FORMAT`], used in error messages.
pub const DATE_PATTERN: &str = "YYYY-MM-DD";

/// Parse a `YYYY-MM-DD` string into a calendar date.
///
/// # Errors
///
/// Returns [`RuleError::InvalidFormat`] quoting the raw input and the
/// expected pattern when the string is not a valid date.
pub fn parse_date(raw: &str) -> Result<NaiveDate, RuleError> {
    let invalid = || {
        RuleError::InvalidFormat(format!(
            "incorrect date format for `{raw}`, the date should have format of {DATE_PATTERN}"
        ))
    };
    // chrono's `%Y` takes any digit count and a sign.
    if !has_four_digit_year(raw) {
        return Err(invalid());
    }
    NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|_| invalid())
}

fn has_four_digit_year(raw: &str) -> bool {
    match raw.as_bytes().get(..5) {
        Some([year @ .., b'-']) => year.iter().all(u8::is_ascii_digit),
        _ => false,
    }
}

/// Render a calendar date as zero-padded `YYYY-MM-DD`.
pub fn format_date(date: &NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Check that a run window is ordered.
///
/// Passes when either bound is absent or when `start <= end`. Equal dates
/// describe a single-day run and are accepted.
///
/// # Errors
///
/// Returns [`RuleError::InvalidRelationship`] naming both dates when
/// `start` is strictly after `end`.
pub fn check_window(start: Option<&NaiveDate>, end: Option<&NaiveDate>) -> Result<(), RuleError> {
    match (start, end) {
        (Some(start), Some(end)) if start > end => Err(RuleError::InvalidRelationship(format!(
            "{} > {}. `start_date` must be before `end_date`",
            format_date(start),
            format_date(end)
        ))),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_valid_date() {
        assert_eq!(parse_date("2022-01-27").unwrap(), ymd(2022, 1, 27));
    }

    #[test]
    fn test_parse_leap_day() {
        assert_eq!(parse_date("2024-02-29").unwrap(), ymd(2024, 2, 29));
        assert!(parse_date("2023-02-29").is_err());
    }

    #[test]
    fn test_parse_compact_rejected() {
        let err = parse_date("20220101").unwrap_err();
        assert!(matches!(err, RuleError::InvalidFormat(_)));
        assert!(err.message().contains("`20220101`"));
        assert!(err.message().contains("YYYY-MM-DD"));
    }

    #[test]
    fn test_parse_truncated_rejected() {
        assert!(parse_date("2023-01").is_err());
        assert!(parse_date("").is_err());
    }

    #[test]
    fn test_parse_out_of_range_rejected() {
        assert!(parse_date("2022-13-01").is_err());
        assert!(parse_date("2022-04-31").is_err());
    }

    #[test]
    fn test_parse_trailing_garbage_rejected() {
        assert!(parse_date("2022-01-01T00:00:00").is_err());
        assert!(parse_date("2022-01-01 ").is_err());
    }

    #[test]
    fn test_parse_year_must_be_four_unsigned_digits() {
        for raw in ["22-01-01", "202-01-01", "02022-01-01", "+2022-01-01", "-2022-01-01"] {
            let err = parse_date(raw).unwrap_err();
            assert!(matches!(err, RuleError::InvalidFormat(_)), "{raw}");
        }
    }

    #[test]
    fn test_parse_unpadded_month_and_day_accepted() {
        assert_eq!(parse_date("2022-1-5").unwrap(), ymd(2022, 1, 5));
    }

    #[test]
    fn test_format_is_zero_padded() {
        assert_eq!(format_date(&ymd(2022, 1, 5)), "2022-01-05");
    }

    // ---- window ordering ----

    #[test]
    fn test_window_start_after_end_rejected() {
        let start = ymd(2022, 1, 5);
        let end = ymd(2022, 1, 1);
        let err = check_window(Some(&start), Some(&end)).unwrap_err();
        assert!(matches!(err, RuleError::InvalidRelationship(_)));
        assert!(err.message().contains("2022-01-05"));
        assert!(err.message().contains("2022-01-01"));
    }

    #[test]
    fn test_window_equal_dates_accepted() {
        let day = ymd(2022, 1, 27);
        assert!(check_window(Some(&day), Some(&day)).is_ok());
    }

    #[test]
    fn test_window_ordered_accepted() {
        assert!(check_window(Some(&ymd(2023, 1, 1)), Some(&ymd(2023, 1, 2))).is_ok());
    }

    #[test]
    fn test_window_missing_bound_accepted() {
        let day = ymd(2022, 1, 27);
        assert!(check_window(None, Some(&day)).is_ok());
        assert!(check_window(Some(&day), None).is_ok());
        assert!(check_window(None, None).is_ok());
    }
}
