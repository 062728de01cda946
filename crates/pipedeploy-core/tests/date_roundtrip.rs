//! # Run-Window Date Properties
//!
//! Property tests for `YYYY-MM-DD` parsing: every calendar date formats to
//! a zero-padded string that parses back to the same date, and strings in
//! other layouts are always rejected.

use chrono::{Days, NaiveDate};
use pipedeploy_core::{check_window, format_date, parse_date, RuleError};
use proptest::prelude::*;

fn date_strategy() -> impl Strategy<Value = NaiveDate> {
    // 1900-01-01 plus up to ~300 years of days.
    (0u64..110_000).prop_map(|offset| {
        NaiveDate::from_ymd_opt(1900, 1, 1)
            .and_then(|base| base.checked_add_days(Days::new(offset)))
            .unwrap()
    })
}

proptest! {
    #[test]
    fn formatted_dates_round_trip(date in date_strategy()) {
        let rendered = format_date(&date);
        prop_assert_eq!(rendered.len(), 10);
        let parsed = parse_date(&rendered).unwrap();
        prop_assert_eq!(parsed, date);
        prop_assert_eq!(format_date(&parsed), rendered);
    }

    #[test]
    fn compact_dates_rejected(date in date_strategy()) {
        let compact = date.format("%Y%m%d").to_string();
        let err = parse_date(&compact).unwrap_err();
        prop_assert!(matches!(err, RuleError::InvalidFormat(_)));
    }

    #[test]
    fn year_month_only_rejected(date in date_strategy()) {
        let partial = date.format("%Y-%m").to_string();
        prop_assert!(parse_date(&partial).is_err());
    }

    #[test]
    fn short_or_signed_years_rejected(date in date_strategy()) {
        let month_day = date.format("%m-%d").to_string();
        let year = date.format("%Y").to_string();
        for raw in [
            format!("{}-{month_day}", &year[2..]),
            format!("{}-{month_day}", &year[1..]),
            format!("+{year}-{month_day}"),
            format!("-{year}-{month_day}"),
        ] {
            let err = parse_date(&raw).unwrap_err();
            prop_assert!(matches!(err, RuleError::InvalidFormat(_)));
        }
    }

    #[test]
    fn window_ordering_matches_date_ordering(a in date_strategy(), b in date_strategy()) {
        let result = check_window(Some(&a), Some(&b));
        prop_assert_eq!(result.is_ok(), a <= b);
    }
}

#[test]
fn documented_example_dates() {
    assert_eq!(
        parse_date("2022-01-27").unwrap(),
        NaiveDate::from_ymd_opt(2022, 1, 27).unwrap()
    );
    assert!(parse_date("20220101").is_err());
    assert!(parse_date("2023-01").is_err());
    for raw in ["22-01-01", "+2022-01-01", "-2022-01-01", "202-01-01"] {
        assert!(parse_date(raw).is_err(), "{raw} accepted");
    }
}
