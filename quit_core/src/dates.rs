//! Calendar-day arithmetic shared by the calculators.

use chrono::{DateTime, NaiveDate, TimeZone};

/// Whole calendar days from `a` to `b`.
///
/// Negative when `b` precedes `a`.
pub fn days_between(a: NaiveDate, b: NaiveDate) -> i64 {
    b.signed_duration_since(a).num_days()
}

/// Whole calendar days between two instants.
///
/// Each instant is truncated to its calendar date in its own time zone
/// first, so 23:59 to 00:01 the next morning counts as one day and
/// 00:01 to 23:59 the same day counts as zero.
pub fn days_between_instants<Tz: TimeZone>(a: &DateTime<Tz>, b: &DateTime<Tz>) -> i64 {
    days_between(a.date_naive(), b.date_naive())
}

/// Length of a plan in days, never less than 1.
pub fn total_days(start: NaiveDate, goal: NaiveDate) -> i64 {
    days_between(start, goal).max(1)
}
