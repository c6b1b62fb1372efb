use chrono::NaiveDate;

use crate::date_math::add_days;
use crate::error::{CoreError, Result};
use crate::models::{CalendarMarks, CyclePrediction, DateRange, PeriodRecord};
use crate::prediction::sorted_history;

/// How many of the latest periods are drawn on the calendar.
const MARKED_PERIODS: usize = 3;

/// Period days of the latest periods plus the predicted ovulation day.
/// A period without an end marks only its start.
pub fn calendar_marks(history: &[PeriodRecord], prediction: &CyclePrediction) -> Result<CalendarMarks> {
    let mut period_dates = Vec::new();
    for record in sorted_history(history).into_iter().take(MARKED_PERIODS) {
        match record.end_date {
            Some(end) => period_dates.extend(DateRange::new(record.start_date, end)?.dates()?),
            None => period_dates.push(record.start_date),
        }
    }

    Ok(CalendarMarks {
        period_dates,
        ovulation_dates: vec![prediction.ovulation_day],
    })
}

pub fn month_range(year: i32, month: u32) -> Result<DateRange> {
    let invalid = || CoreError::InvalidMonth { year, month };
    let first_day = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
    let next_month = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .ok_or_else(invalid)?;

    DateRange::new(first_day, add_days(next_month, -1))
}

impl CalendarMarks {
    /// Keep only the marks inside `range`.
    pub fn within(mut self, range: DateRange) -> Self {
        self.period_dates.retain(|d| range.contains(*d));
        self.ovulation_dates.retain(|d| range.contains(*d));
        self
    }
}
