//! Semester date rules.

use chrono::{Datelike, NaiveDate};
use thiserror::Error;

/// Errors validating semester dates.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SemesterDatesError {
    /// Start date is not strictly before end date.
    #[error("start date must be before end date")]
    StartNotBeforeEnd,
}

/// Validates that a semester's start date is strictly before its end date.
///
/// # Errors
///
/// Returns `SemesterDatesError::StartNotBeforeEnd` otherwise.
pub fn validate_semester_dates(
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> Result<(), SemesterDatesError> {
    if start_date >= end_date {
        return Err(SemesterDatesError::StartNotBeforeEnd);
    }
    Ok(())
}

/// Derives a semester's name from its dates.
///
/// The season comes from the start month, the year from the end date:
/// January-March starts are Spring, April-May Summer I, June-July Summer II,
/// and anything later Fall.
#[must_use]
pub fn semester_name(start_date: NaiveDate, end_date: NaiveDate) -> String {
    let season = match start_date.month() {
        1..=3 => "Spring",
        4..=5 => "Summer_I",
        6..=7 => "Summer_II",
        _ => "Fall",
    };

    format!("{season}_{}", end_date.year())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[rstest]
    #[case(date(2026, 1, 5), date(2026, 4, 25), "Spring_2026")]
    #[case(date(2026, 3, 31), date(2026, 6, 1), "Spring_2026")]
    #[case(date(2026, 5, 4), date(2026, 6, 24), "Summer_I_2026")]
    #[case(date(2026, 6, 29), date(2026, 8, 21), "Summer_II_2026")]
    #[case(date(2026, 9, 1), date(2026, 12, 12), "Fall_2026")]
    #[case(date(2026, 12, 28), date(2027, 4, 20), "Fall_2027")]
    fn test_semester_name(
        #[case] start: NaiveDate,
        #[case] end: NaiveDate,
        #[case] expected: &str,
    ) {
        assert_eq!(semester_name(start, end), expected);
    }

    #[test]
    fn test_start_must_precede_end() {
        let start = date(2026, 9, 1);
        assert!(validate_semester_dates(start, date(2026, 12, 12)).is_ok());
        assert_eq!(
            validate_semester_dates(start, start),
            Err(SemesterDatesError::StartNotBeforeEnd)
        );
        assert_eq!(
            validate_semester_dates(start, date(2026, 8, 31)),
            Err(SemesterDatesError::StartNotBeforeEnd)
        );
    }
}
