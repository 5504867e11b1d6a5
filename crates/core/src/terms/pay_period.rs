//! Pay period date rules.
//!
//! Pay periods are two-week windows. Clock times are compared in the
//! department's local timezone, since payroll days begin and end at local
//! midnight regardless of how timestamps are stored.

use chrono::{DateTime, Days, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::America::Detroit;

/// Length of a pay period, in days (inclusive of both endpoint dates).
pub const PAY_PERIOD_DAYS: u64 = 14;

/// Local timezone used for payroll day boundaries.
const LOCAL_TZ: chrono_tz::Tz = Detroit;

/// Returns the end date for a period starting on `start_date`.
#[must_use]
pub fn end_date_for(start_date: NaiveDate) -> NaiveDate {
    start_date
        .checked_add_days(Days::new(PAY_PERIOD_DAYS - 1))
        .expect("pay period end date overflows the calendar")
}

/// Returns the instant the period's first payroll day begins: local midnight
/// on the start date.
#[must_use]
pub fn local_day_start(date: NaiveDate) -> DateTime<Utc> {
    let midnight = NaiveTime::from_hms_opt(0, 0, 0).expect("valid time");
    LOCAL_TZ
        .from_local_datetime(&date.and_time(midnight))
        .earliest()
        .expect("local midnight exists")
        .with_timezone(&Utc)
}

/// Returns the instant the period's last payroll day ends: one second before
/// local midnight of the following day.
#[must_use]
pub fn local_day_end(date: NaiveDate) -> DateTime<Utc> {
    let day_end = NaiveTime::from_hms_opt(23, 59, 59).expect("valid time");
    LOCAL_TZ
        .from_local_datetime(&date.and_time(day_end))
        .latest()
        .expect("local day end exists")
        .with_timezone(&Utc)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_end_date_is_thirteen_days_out() {
        assert_eq!(end_date_for(date(2026, 1, 5)), date(2026, 1, 18));
        // Crosses a month boundary.
        assert_eq!(end_date_for(date(2026, 1, 26)), date(2026, 2, 8));
    }

    #[test]
    fn test_day_bounds_are_ordered() {
        let start = local_day_start(date(2026, 3, 2));
        let end = local_day_end(date(2026, 3, 15));
        assert!(start < end);
    }

    #[test]
    fn test_day_start_is_local_midnight() {
        // Detroit is UTC-5 in January.
        let start = local_day_start(date(2026, 1, 5));
        assert_eq!(start, Utc.with_ymd_and_hms(2026, 1, 5, 5, 0, 0).unwrap());
    }

    #[test]
    fn test_dst_transition_day_still_resolves() {
        // The US spring-forward date in 2026: midnight exists even though
        // 2:00-3:00 does not.
        let start = local_day_start(date(2026, 3, 8));
        let end = local_day_end(date(2026, 3, 8));
        assert!(start < end);
    }
}
