//! Calendar-day helpers. Day keys are `YYYY-MM-DD` strings in the local calendar.

use anyhow::{Context, Result};
use chrono::{Duration, Local, NaiveDate};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Today's key in the local calendar (not UTC).
#[must_use]
pub fn today() -> String {
    format_date(Local::now().date_naive())
}

#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parse a `YYYY-MM-DD` key. A `NaiveDate` has no time zone, so the result is
/// the local calendar day itself with no offset applied.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
        .with_context(|| format!("Invalid date '{s}'. Use YYYY-MM-DD"))
}

#[must_use]
pub fn is_date_key(s: &str) -> bool {
    s.len() == 10 && NaiveDate::parse_from_str(s, DATE_FORMAT).is_ok()
}

pub fn add_days(date_key: &str, days: i64) -> Result<String> {
    let date = parse_date(date_key)?;
    let shifted = Duration::try_days(days)
        .and_then(|d| date.checked_add_signed(d))
        .with_context(|| format!("Date out of range: {date_key} + {days} days"))?;
    Ok(format_date(shifted))
}

/// Resolve user input into a day: `None`, `today`, `yesterday`, `tomorrow`, or `YYYY-MM-DD`.
pub fn resolve_date(input: Option<&str>) -> Result<NaiveDate> {
    let today = Local::now().date_naive();
    match input.map(str::trim) {
        None | Some("today") => Ok(today),
        Some("yesterday") => Ok(today - Duration::days(1)),
        Some("tomorrow") => Ok(today + Duration::days(1)),
        Some(s) => NaiveDate::parse_from_str(s, DATE_FORMAT).with_context(|| {
            format!("Invalid date '{s}'. Use YYYY-MM-DD or today/yesterday/tomorrow")
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_days_month_rollover() {
        assert_eq!(add_days("2026-01-31", 1).unwrap(), "2026-02-01");
    }

    #[test]
    fn test_add_days_year_rollover() {
        assert_eq!(add_days("2026-12-31", 1).unwrap(), "2027-01-01");
    }

    #[test]
    fn test_add_days_backwards_and_leap_year() {
        assert_eq!(add_days("2026-03-01", -1).unwrap(), "2026-02-28");
        assert_eq!(add_days("2028-03-01", -1).unwrap(), "2028-02-29");
        assert_eq!(add_days("2026-01-06", 0).unwrap(), "2026-01-06");
    }

    #[test]
    fn test_add_days_invalid_key() {
        assert!(add_days("2026-13-01", 1).is_err());
        assert!(add_days("yesterday", 1).is_err());
    }

    #[test]
    fn test_format_parse_round_trip() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 6).unwrap();
        assert_eq!(format_date(date), "2026-01-06");
        assert_eq!(parse_date("2026-01-06").unwrap(), date);
    }

    #[test]
    fn test_today_is_local_calendar_day() {
        assert_eq!(today(), format_date(Local::now().date_naive()));
        assert!(is_date_key(&today()));
    }

    #[test]
    fn test_is_date_key() {
        assert!(is_date_key("2026-01-06"));
        assert!(!is_date_key("2026-1-6"));
        assert!(!is_date_key("raed-2026-01-06"));
        assert!(!is_date_key(""));
    }

    #[test]
    fn test_resolve_date_keywords() {
        let today = Local::now().date_naive();
        assert_eq!(resolve_date(None).unwrap(), today);
        assert_eq!(resolve_date(Some("today")).unwrap(), today);
        assert_eq!(resolve_date(Some("yesterday")).unwrap(), today - Duration::days(1));
        assert_eq!(resolve_date(Some("tomorrow")).unwrap(), today + Duration::days(1));
        assert_eq!(
            resolve_date(Some("2026-01-15")).unwrap(),
            NaiveDate::from_ymd_opt(2026, 1, 15).unwrap()
        );
        assert!(resolve_date(Some("nope")).is_err());
    }
}
