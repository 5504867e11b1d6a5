//! Timesheet shift validation.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors validating a timesheet shift.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ShiftError {
    /// Clock out is not after clock in.
    #[error("clock out time must be after clock in time")]
    ClockOutNotAfterClockIn,

    /// The shift overlaps another shift for the same employee.
    #[error("users cannot have overlapping shift times")]
    Overlap,

    /// The shift falls outside its pay period.
    #[error("shift must be between pay period dates")]
    OutsidePayPeriod,
}

/// Validates a shift's clock times against ordering, the employee's other
/// shifts, and the bounds of its pay period.
///
/// `existing` holds the employee's other completed shifts as
/// `(clock_in, clock_out)` pairs. An open shift (`clock_out` = `None`) only
/// checks its clock-in; the rest is validated at clock-out time.
///
/// # Errors
///
/// Returns the first violated rule.
pub fn validate_shift(
    clock_in: DateTime<Utc>,
    clock_out: Option<DateTime<Utc>>,
    existing: &[(DateTime<Utc>, DateTime<Utc>)],
    period_bounds: (DateTime<Utc>, DateTime<Utc>),
) -> Result<(), ShiftError> {
    if let Some(out) = clock_out {
        if out <= clock_in {
            return Err(ShiftError::ClockOutNotAfterClockIn);
        }
    }

    // Clock in must not land inside another shift.
    if existing
        .iter()
        .any(|&(other_in, other_out)| other_in < clock_in && clock_in < other_out)
    {
        return Err(ShiftError::Overlap);
    }

    if let Some(out) = clock_out {
        // Clock out must not land inside another shift.
        if existing
            .iter()
            .any(|&(other_in, other_out)| other_in < out && out < other_out)
        {
            return Err(ShiftError::Overlap);
        }

        // Another shift must not sit entirely inside this one.
        if existing
            .iter()
            .any(|&(other_in, other_out)| other_in > clock_in && other_out < out)
        {
            return Err(ShiftError::Overlap);
        }
    }

    let (period_start, period_end) = period_bounds;
    if clock_in < period_start || clock_in > period_end {
        return Err(ShiftError::OutsidePayPeriod);
    }

    Ok(())
}

/// Splits a worked duration into whole hours, minutes, and seconds.
#[must_use]
pub fn worked_hms(clock_in: DateTime<Utc>, clock_out: DateTime<Utc>) -> (i64, i64, i64) {
    let total_seconds = (clock_out - clock_in).num_seconds().max(0);
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    (hours, minutes, seconds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn at(hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 5, hour, minute, 0).unwrap()
    }

    fn bounds() -> (DateTime<Utc>, DateTime<Utc>) {
        (
            Utc.with_ymd_and_hms(2026, 1, 5, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2026, 1, 18, 23, 59, 59).unwrap(),
        )
    }

    #[test]
    fn test_valid_shift() {
        assert!(validate_shift(at(9, 0), Some(at(13, 0)), &[], bounds()).is_ok());
    }

    #[test]
    fn test_clock_out_must_follow_clock_in() {
        assert_eq!(
            validate_shift(at(13, 0), Some(at(13, 0)), &[], bounds()),
            Err(ShiftError::ClockOutNotAfterClockIn)
        );
        assert_eq!(
            validate_shift(at(13, 0), Some(at(9, 0)), &[], bounds()),
            Err(ShiftError::ClockOutNotAfterClockIn)
        );
    }

    #[test]
    fn test_clock_in_inside_other_shift() {
        let existing = [(at(8, 0), at(12, 0))];
        assert_eq!(
            validate_shift(at(10, 0), Some(at(14, 0)), &existing, bounds()),
            Err(ShiftError::Overlap)
        );
    }

    #[test]
    fn test_clock_out_inside_other_shift() {
        let existing = [(at(12, 0), at(16, 0))];
        assert_eq!(
            validate_shift(at(9, 0), Some(at(13, 0)), &existing, bounds()),
            Err(ShiftError::Overlap)
        );
    }

    #[test]
    fn test_other_shift_entirely_inside_new() {
        let existing = [(at(10, 0), at(11, 0))];
        assert_eq!(
            validate_shift(at(9, 0), Some(at(14, 0)), &existing, bounds()),
            Err(ShiftError::Overlap)
        );
    }

    #[test]
    fn test_back_to_back_shifts_are_allowed() {
        let existing = [(at(8, 0), at(12, 0))];
        assert!(validate_shift(at(12, 0), Some(at(16, 0)), &existing, bounds()).is_ok());
    }

    #[test]
    fn test_shift_outside_pay_period() {
        let early = Utc.with_ymd_and_hms(2026, 1, 4, 9, 0, 0).unwrap();
        assert_eq!(
            validate_shift(early, Some(early + Duration::hours(4)), &[], bounds()),
            Err(ShiftError::OutsidePayPeriod)
        );
    }

    #[test]
    fn test_open_shift_only_checks_clock_in() {
        let existing = [(at(8, 0), at(12, 0))];
        assert!(validate_shift(at(13, 0), None, &existing, bounds()).is_ok());
        assert_eq!(
            validate_shift(at(9, 0), None, &existing, bounds()),
            Err(ShiftError::Overlap)
        );
    }

    #[test]
    fn test_worked_hms() {
        let (h, m, s) = worked_hms(at(9, 0), at(13, 30));
        assert_eq!((h, m, s), (4, 30, 0));

        let (h, m, s) = worked_hms(at(9, 0), at(9, 0) + Duration::seconds(3725));
        assert_eq!((h, m, s), (1, 2, 5));
    }
}
