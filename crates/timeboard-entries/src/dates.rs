//! Calendar arithmetic on canonical `YYYY-MM-DD` strings.
//!
//! Dates are anchored at noon on an offset-free calendar so that no
//! daylight-saving transition can move a value across a day boundary.
//! Out-of-range months and days roll over into neighbouring months
//! (`2026-02-30` is 2 March). Strings without three dash-separated numeric
//! parts are returned unchanged.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};
use tracing::warn;

const CANONICAL_FORMAT: &str = "%Y-%m-%d";

fn split_numeric(date: &str) -> Option<(i64, i64, i64)> {
    let mut parts = date.splitn(3, '-');
    let year = parts.next()?.parse().ok()?;
    let month = parts.next()?.parse().ok()?;
    let day = parts.next()?.parse().ok()?;
    Some((year, month, day))
}

/// Parse a `YYYY-MM-DD` string naming a real calendar day.
pub fn parse_canonical(date: &str) -> Option<NaiveDate> {
    let (year, month, day) = split_numeric(date)?;
    NaiveDate::from_ymd_opt(
        i32::try_from(year).ok()?,
        u32::try_from(month).ok()?,
        u32::try_from(day).ok()?,
    )
}

/// Resolve numeric date parts, carrying overflowing months into years and
/// overflowing days into months.
pub fn normalize_parts(year: i64, month: i64, day: i64) -> Option<NaiveDate> {
    let months = month.checked_sub(1)?;
    let year = year.checked_add(months.div_euclid(12))?;
    let first = NaiveDate::from_ymd_opt(
        i32::try_from(year).ok()?,
        u32::try_from(months.rem_euclid(12) + 1).ok()?,
        1,
    )?;
    first.checked_add_signed(Duration::try_days(day.checked_sub(1)?)?)
}

/// Format a calendar date in canonical form.
pub fn format_canonical(date: NaiveDate) -> String {
    date.format(CANONICAL_FORMAT).to_string()
}

fn noon(date: &str) -> Option<NaiveDateTime> {
    let (year, month, day) = split_numeric(date)?;
    normalize_parts(year, month, day)?.and_hms_opt(12, 0, 0)
}

/// `date` plus `n` whole calendar days.
pub fn add_days(date: &str, n: i64) -> String {
    let Some(anchor) = noon(date) else {
        warn!(date, "add_days called with a malformed date");
        return date.to_string();
    };
    match Duration::try_days(n).and_then(|d| anchor.checked_add_signed(d)) {
        Some(shifted) => format_canonical(shifted.date()),
        None => date.to_string(),
    }
}

/// The Sunday on or before `date`.
pub fn week_start_sunday(date: &str) -> String {
    let Some(anchor) = noon(date) else {
        warn!(date, "week_start_sunday called with a malformed date");
        return date.to_string();
    };
    let back = anchor.weekday().num_days_from_sunday() as i64;
    match anchor.checked_sub_signed(Duration::days(back)) {
        Some(sunday) => format_canonical(sunday.date()),
        None => date.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_days_crosses_month_and_year() {
        assert_eq!(add_days("2026-01-31", 1), "2026-02-01");
        assert_eq!(add_days("2025-12-31", 1), "2026-01-01");
        assert_eq!(add_days("2026-03-01", -1), "2026-02-28");
        assert_eq!(add_days("2024-02-28", 1), "2024-02-29");
        assert_eq!(add_days("2026-02-12", 0), "2026-02-12");
    }

    #[test]
    fn add_days_across_dst_transitions() {
        // Southern and northern hemisphere DST changes.
        assert_eq!(add_days("2026-04-04", 1), "2026-04-05");
        assert_eq!(add_days("2026-10-03", 1), "2026-10-04");
        assert_eq!(add_days("2026-03-08", 1), "2026-03-09");
        assert_eq!(add_days("2026-11-01", 1), "2026-11-02");
    }

    #[test]
    fn week_start_sunday_cases() {
        assert_eq!(week_start_sunday("2026-02-08"), "2026-02-08");
        assert_eq!(week_start_sunday("2026-02-09"), "2026-02-08");
        assert_eq!(week_start_sunday("2026-02-14"), "2026-02-08");
        assert_eq!(week_start_sunday("2026-01-01"), "2025-12-28");
        assert_eq!(week_start_sunday("2026-03-03"), "2026-03-01");
    }

    #[test]
    fn out_of_range_parts_roll_over() {
        assert_eq!(week_start_sunday("2026-02-30"), "2026-03-01");
        assert_eq!(add_days("2026-02-30", 1), "2026-03-03");
        assert_eq!(add_days("2026-13-01", 0), "2027-01-01");
        assert_eq!(week_start_sunday("2026-13-01"), "2026-12-27");
        assert_eq!(add_days("2026-00-10", 0), "2025-12-10");
        assert_eq!(add_days("2026-03-00", 0), "2026-02-28");
    }

    #[test]
    fn malformed_dates_pass_through() {
        assert_eq!(add_days("not-a-date", 1), "not-a-date");
        assert_eq!(add_days("2026/02/01", 1), "2026/02/01");
        assert_eq!(add_days("2026-02", 1), "2026-02");
        assert_eq!(week_start_sunday("2026-02-xx"), "2026-02-xx");
        assert_eq!(week_start_sunday(""), "");
    }

    #[test]
    fn parse_canonical_requires_a_real_day() {
        assert_eq!(
            parse_canonical("2026-02-12"),
            NaiveDate::from_ymd_opt(2026, 2, 12)
        );
        assert!(parse_canonical("2026-02").is_none());
        assert!(parse_canonical("2026-02-xx").is_none());
        assert!(parse_canonical("2026-02-30").is_none());
        assert!(parse_canonical("2026-13-01").is_none());
    }

    #[test]
    fn normalize_parts_matches_calendar_for_valid_days() {
        assert_eq!(
            normalize_parts(2024, 2, 29),
            NaiveDate::from_ymd_opt(2024, 2, 29)
        );
        assert_eq!(
            normalize_parts(2026, 14, 31),
            NaiveDate::from_ymd_opt(2027, 3, 3)
        );
        assert!(normalize_parts(i64::MAX, 1, 1).is_none());
    }
}
