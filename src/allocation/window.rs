//! Resolves an anchor date into the instant range queried upstream.
//!
//! The window opens at 09:00 local time on the anchor date and closes at
//! the last microsecond of the day reached after skipping forward a number
//! of working days (Monday-Friday). With the default of four working days
//! and a Monday anchor this covers the calendar work week; any other
//! anchor yields five business days starting at the anchor.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, TimeZone, Weekday};
use chrono_tz::Tz;

use super::error::AllocationError;

pub const DEFAULT_WORKING_DAYS: u32 = 4;
/// About a year of weekdays.
pub const MAX_WORKING_DAYS: u32 = 260;

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedWindow {
    pub start: DateTime<Tz>,
    pub end: DateTime<Tz>,
}

/// Parse a strict `YYYY-MM-DD` date.
pub fn parse_anchor_date(date: &str) -> Result<NaiveDate, AllocationError> {
    // chrono accepts single digit months and days for `%m` and `%d`
    // so check the shape before handing off
    let well_formed = date.len() == 10
        && date.bytes().enumerate().all(|(i, b)| match i {
            4 | 7 => b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !well_formed {
        return Err(AllocationError::InvalidDateFormat(date.to_string()));
    }

    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| AllocationError::InvalidDateFormat(date.to_string()))
}

fn is_working_day(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Advance one calendar day at a time until `working_days` weekdays have
/// been counted. The anchor itself is never counted.
pub fn add_working_days(
    anchor: NaiveDate,
    working_days: u32,
) -> Result<NaiveDate, AllocationError> {
    if working_days > MAX_WORKING_DAYS {
        return Err(AllocationError::ConfigurationError(format!(
            "{} working days exceeds the maximum of {}",
            working_days, MAX_WORKING_DAYS
        )));
    }

    let mut current = anchor;
    let mut added = 0;

    while added < working_days {
        current = current.succ_opt().ok_or_else(|| {
            AllocationError::InvalidDateFormat(format!(
                "{} plus {} working days is out of range",
                anchor, working_days
            ))
        })?;
        if is_working_day(current) {
            added += 1;
        }
    }

    Ok(current)
}

/// Monday of the week containing `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

pub fn resolve_window(
    anchor: NaiveDate,
    working_days: u32,
    tz: Tz,
) -> Result<ResolvedWindow, AllocationError> {
    let end_date = add_working_days(anchor, working_days)?;

    let open = NaiveTime::from_hms_opt(9, 0, 0).expect("09:00:00 is a valid time");
    let close =
        NaiveTime::from_hms_micro_opt(23, 59, 59, 999_999).expect("23:59:59.999999 is a valid time");

    // Earliest/latest so a DST fold widens the window rather than failing
    let start = tz
        .from_local_datetime(&anchor.and_time(open))
        .earliest()
        .ok_or_else(|| {
            AllocationError::InvalidDateFormat(format!("{} 09:00 does not exist in {}", anchor, tz))
        })?;
    let end = tz
        .from_local_datetime(&end_date.and_time(close))
        .latest()
        .ok_or_else(|| {
            AllocationError::InvalidDateFormat(format!(
                "{} 23:59:59 does not exist in {}",
                end_date, tz
            ))
        })?;

    tracing::debug!("Resolved window {} to {} ({})", start, end, tz);

    Ok(ResolvedWindow { start, end })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;
    use chrono_tz::Asia::Karachi;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn it_parses_strict_dates() {
        assert_eq!(parse_anchor_date("2024-10-18").unwrap(), date(2024, 10, 18));
        assert!(parse_anchor_date("2024-1-18").is_err());
        assert!(parse_anchor_date("18-10-2024").is_err());
        assert!(parse_anchor_date("2024/10/18").is_err());
        assert!(parse_anchor_date("2024-02-30").is_err());
        assert!(parse_anchor_date("").is_err());
        assert!(parse_anchor_date(" 2024-10-18").is_err());
    }

    #[test]
    fn it_reports_the_offending_input() {
        assert_eq!(
            parse_anchor_date("tomorrow"),
            Err(AllocationError::InvalidDateFormat("tomorrow".to_string()))
        );
    }

    #[test]
    fn it_skips_weekends_from_a_friday() {
        // 18th, 21st, 22nd, 23rd, 24th
        assert_eq!(add_working_days(date(2024, 10, 18), 4).unwrap(), date(2024, 10, 24));
    }

    #[test]
    fn it_covers_the_work_week_from_a_monday() {
        assert_eq!(add_working_days(date(2024, 10, 14), 4).unwrap(), date(2024, 10, 18));
    }

    #[test]
    fn it_counts_from_a_weekend_anchor() {
        // Saturday anchor: Mon through Thu are the four added days
        assert_eq!(add_working_days(date(2024, 10, 19), 4).unwrap(), date(2024, 10, 24));
        assert_eq!(add_working_days(date(2024, 10, 19), 0).unwrap(), date(2024, 10, 19));
    }

    #[test]
    fn it_rejects_too_many_working_days() {
        assert!(matches!(
            add_working_days(date(2024, 10, 18), MAX_WORKING_DAYS + 1),
            Err(AllocationError::ConfigurationError(_))
        ));
        assert!(matches!(
            resolve_window(date(2024, 10, 18), u32::MAX, Karachi),
            Err(AllocationError::ConfigurationError(_))
        ));
        // A year of weekdays is fine
        assert!(add_working_days(date(2024, 10, 18), MAX_WORKING_DAYS).is_ok());
    }

    #[test]
    fn it_fails_past_the_end_of_the_calendar() {
        assert!(matches!(
            add_working_days(NaiveDate::MAX, 1),
            Err(AllocationError::InvalidDateFormat(_))
        ));
        assert!(resolve_window(NaiveDate::MAX, DEFAULT_WORKING_DAYS, Karachi).is_err());
    }

    #[test]
    fn it_computes_week_start() {
        assert_eq!(week_start(date(2024, 10, 18)), date(2024, 10, 14));
        assert_eq!(week_start(date(2024, 10, 14)), date(2024, 10, 14));
        assert_eq!(week_start(date(2024, 10, 20)), date(2024, 10, 14));
        // Across a month boundary
        assert_eq!(week_start(date(2024, 11, 1)), date(2024, 10, 28));
    }

    #[test]
    fn it_resolves_the_window_in_the_configured_timezone() {
        let window = resolve_window(date(2024, 10, 18), 4, Karachi).unwrap();

        assert_eq!(window.start.to_rfc3339(), "2024-10-18T09:00:00+05:00");
        assert_eq!(window.end.date_naive(), date(2024, 10, 24));
        assert_eq!(window.end.hour(), 23);
        assert_eq!(window.end.minute(), 59);
        assert_eq!(window.end.second(), 59);
        assert_eq!(window.end.nanosecond(), 999_999_000);
        assert!(window.start < window.end);
    }

    #[test]
    fn it_resolves_a_single_day_window() {
        let window = resolve_window(date(2024, 10, 16), 0, Karachi).unwrap();
        assert_eq!(window.start.date_naive(), window.end.date_naive());
        assert!(window.start < window.end);
    }
}
