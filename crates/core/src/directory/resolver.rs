//! Status/retention resolution from directory attributes.
//!
//! Given a user's raw directory entry, computes whether they are currently
//! active (enrolled or employed) and whether they fall within the 1-year
//! retention window after expiration.

use chrono::{DateTime, Days, NaiveDate, Utc};

use super::attributes::{
    ATTR_EMPLOYEE_EXPIRATION, ATTR_ENROLLED, ATTR_STUDENT_EXPIRATION, ATTR_USER_STATUS,
    DirectoryAttributes,
};

/// Length of the retention window after expiration, in days.
const RETENTION_DAYS: u64 = 365;

/// Resolved activity status for a directory user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetentionStatus {
    /// User is currently enrolled or employed.
    pub is_active: bool,
    /// User is active, or expired less than a year ago.
    pub is_in_retention: bool,
}

impl RetentionStatus {
    const fn new(is_active: bool, is_in_retention: bool) -> Self {
        Self {
            is_active,
            is_in_retention,
        }
    }
}

/// Computes a user's `(is_active, is_in_retention)` pair from their raw
/// directory attributes.
///
/// Rules, in priority order:
///
/// 1. `wmuEnrolled` is `"True"` => active and in retention.
/// 2. `inetUserStatus` empty or absent => inactive, out of retention.
/// 3. An expiration timestamp (`wmuEmployeeExpiration` preferred, else
///    `wmuStudentExpiration`) at or after the current date => active.
/// 4. Such a timestamp within the past 365 days => inactive but in retention.
/// 5. Otherwise => inactive, out of retention.
///
/// All values are compared as trimmed strings; the directory has been
/// observed returning literal `"false"`-style strings, so nothing here
/// relies on truthiness of non-empty values.
#[must_use]
pub fn resolve_status(attrs: &DirectoryAttributes, now: DateTime<Utc>) -> RetentionStatus {
    // Rule 1: currently enrolled students are unconditionally active.
    if attrs
        .single(ATTR_ENROLLED)
        .is_some_and(|v| v.eq_ignore_ascii_case("true"))
    {
        return RetentionStatus::new(true, true);
    }

    // Rule 2: no account status at all means the directory has dropped the
    // user entirely.
    if attrs.single(ATTR_USER_STATUS).is_none() {
        return RetentionStatus::new(false, false);
    }

    // Rules 3-5: fall back to expiration timestamps. Employee expiration
    // takes precedence over student expiration when both are present.
    let expiration = attrs
        .single(ATTR_EMPLOYEE_EXPIRATION)
        .and_then(parse_expiration)
        .or_else(|| {
            attrs
                .single(ATTR_STUDENT_EXPIRATION)
                .and_then(parse_expiration)
        });

    let today = now.date_naive();
    match expiration {
        Some(expires) if expires >= today => RetentionStatus::new(true, true),
        Some(expires) => {
            let retention_floor = today
                .checked_sub_days(Days::new(RETENTION_DAYS))
                .unwrap_or(NaiveDate::MIN);
            RetentionStatus::new(false, expires >= retention_floor)
        }
        None => RetentionStatus::new(false, false),
    }
}

/// Parses a directory expiration value into a date.
///
/// The directory emits `YYYYMMDDHHMMSS+ZZZZ` stamps, but older entries carry
/// bare `YYYYMMDD` values. Anything else is treated as absent.
fn parse_expiration(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.len() == 8 {
        NaiveDate::parse_from_str(value, "%Y%m%d").ok()
    } else {
        DateTime::parse_from_str(value, "%Y%m%d%H%M%S%z")
            .ok()
            .map(|dt| dt.date_naive())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;

    /// Fixed "now" for deterministic tests: 2026-06-15 12:00:00 UTC.
    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 6, 15, 12, 0, 0).unwrap()
    }

    fn attrs(pairs: &[(&str, &str)]) -> DirectoryAttributes {
        DirectoryAttributes::from_pairs(
            pairs
                .iter()
                .map(|&(k, v)| (k.to_string(), vec![v.to_string()])),
        )
    }

    // Exhaustive rule table. Dates relative to the fixed now():
    //   future        = 20270101  (rule 3)
    //   recent past   = 20260101  (165 days ago, rule 4)
    //   distant past  = 20240101  (over a year ago, rule 5)
    #[rstest]
    // Rule 1: enrolled wins over everything else.
    #[case(&[("wmuEnrolled", "True")], true, true)]
    #[case(&[("wmuEnrolled", "true")], true, true)]
    #[case(&[("wmuEnrolled", " TRUE ")], true, true)]
    #[case(&[("wmuEnrolled", "True"), ("inetUserStatus", "inactive")], true, true)]
    #[case(
        &[("wmuEnrolled", "True"), ("wmuStudentExpiration", "20240101")],
        true,
        true
    )]
    // Rule 2: not enrolled and no account status.
    #[case(&[], false, false)]
    #[case(&[("wmuEnrolled", "False")], false, false)]
    #[case(&[("wmuEnrolled", "garbage")], false, false)]
    #[case(&[("wmuEnrolled", "False"), ("inetUserStatus", "")], false, false)]
    #[case(&[("wmuStudentExpiration", "20270101")], false, false)]
    // Rule 3: status present, expiration in the future.
    #[case(
        &[("inetUserStatus", "active"), ("wmuEmployeeExpiration", "20270101")],
        true,
        true
    )]
    #[case(
        &[("inetUserStatus", "active"), ("wmuStudentExpiration", "20270101")],
        true,
        true
    )]
    #[case(
        &[("inetUserStatus", "inactive"), ("wmuStudentExpiration", "20270101")],
        true,
        true
    )]
    // Expiration exactly today still counts as active.
    #[case(
        &[("inetUserStatus", "active"), ("wmuEmployeeExpiration", "20260615")],
        true,
        true
    )]
    // Full timestamp format with zone offset.
    #[case(
        &[
            ("inetUserStatus", "active"),
            ("wmuEmployeeExpiration", "20270101120000-0500")
        ],
        true,
        true
    )]
    // Employee expiration is preferred over student expiration.
    #[case(
        &[
            ("inetUserStatus", "active"),
            ("wmuEmployeeExpiration", "20270101"),
            ("wmuStudentExpiration", "20240101")
        ],
        true,
        true
    )]
    #[case(
        &[
            ("inetUserStatus", "active"),
            ("wmuEmployeeExpiration", "20240101"),
            ("wmuStudentExpiration", "20270101")
        ],
        false,
        false
    )]
    // Rule 4: expired but within the 365-day retention window.
    #[case(
        &[("inetUserStatus", "active"), ("wmuEmployeeExpiration", "20260101")],
        false,
        true
    )]
    #[case(
        &[("inetUserStatus", "active"), ("wmuStudentExpiration", "20260101")],
        false,
        true
    )]
    #[case(
        &[
            ("inetUserStatus", "active"),
            ("wmuStudentExpiration", "20260101120000+0000")
        ],
        false,
        true
    )]
    // Rule 5: expired beyond retention.
    #[case(
        &[("inetUserStatus", "active"), ("wmuEmployeeExpiration", "20240101")],
        false,
        false
    )]
    #[case(
        &[("inetUserStatus", "active"), ("wmuStudentExpiration", "20240101")],
        false,
        false
    )]
    // Rule 5: status present but no usable expiration at all.
    #[case(&[("inetUserStatus", "active")], false, false)]
    #[case(
        &[("inetUserStatus", "active"), ("wmuEmployeeExpiration", "not-a-date")],
        false,
        false
    )]
    fn test_resolver_rule_table(
        #[case] pairs: &[(&str, &str)],
        #[case] is_active: bool,
        #[case] is_in_retention: bool,
    ) {
        let status = resolve_status(&attrs(pairs), now());
        assert_eq!(
            status,
            RetentionStatus {
                is_active,
                is_in_retention
            },
            "attrs: {pairs:?}"
        );
    }

    #[test]
    fn test_retention_boundary() {
        // Exactly 365 days ago is still inside the window.
        let cases = [("20250615", true), ("20250614", false)];
        for (stamp, in_retention) in cases {
            let status = resolve_status(
                &attrs(&[
                    ("inetUserStatus", "active"),
                    ("wmuEmployeeExpiration", stamp),
                ]),
                now(),
            );
            assert!(!status.is_active);
            assert_eq!(status.is_in_retention, in_retention, "stamp: {stamp}");
        }
    }

    #[rstest]
    #[case("20260101", Some((2026, 1, 1)))]
    #[case("20260101120000+0000", Some((2026, 1, 1)))]
    #[case("20260101235959-0500", Some((2026, 1, 1)))]
    #[case("garbage", None)]
    #[case("2026010", None)]
    #[case("", None)]
    fn test_parse_expiration(#[case] value: &str, #[case] expected: Option<(i32, u32, u32)>) {
        let parsed = parse_expiration(value);
        let expected = expected.map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap());
        assert_eq!(parsed, expected);
    }
}
