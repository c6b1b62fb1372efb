//! Day-granular date helpers shared by every calculation.

use chrono::{Days, NaiveDate};

use crate::error::{CoreError, Result};

/// Absolute number of whole days between two dates.
pub fn days_between(a: NaiveDate, b: NaiveDate) -> i64 {
    (b - a).num_days().abs()
}

/// Shift `date` by `days`, saturating at the ends of the representable calendar.
pub fn add_days(date: NaiveDate, days: i64) -> NaiveDate {
    let step = Days::new(days.unsigned_abs());
    if days >= 0 {
        date.checked_add_days(step).unwrap_or(NaiveDate::MAX)
    } else {
        date.checked_sub_days(step).unwrap_or(NaiveDate::MIN)
    }
}

/// Every date from `start` to `end`, both inclusive.
/// Fails when `end` is before `start` instead of returning an empty range.
pub fn enumerate_dates(start: NaiveDate, end: NaiveDate) -> Result<Vec<NaiveDate>> {
    if end < start {
        return Err(CoreError::InvalidRange { start, end });
    }
    Ok(start.iter_days().take_while(|d| *d <= end).collect())
}

/// Short display form, e.g. "Jan 5, 2025".
pub fn format_human(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}
