use chrono::NaiveDate;

use crate::config::CycleConfig;
use crate::date_math::{add_days, days_between};
use crate::models::{CyclePrediction, FertilityStatus, PeriodRecord};

/// Days ahead of the fertile window during which it counts as approaching.
const APPROACHING_WINDOW_DAYS: i64 = 7;

/// Borrow `history` ordered most recent first.
/// Callers normally pass store output which is already ordered.
pub fn sorted_history(history: &[PeriodRecord]) -> Vec<&PeriodRecord> {
    let mut sorted: Vec<&PeriodRecord> = history.iter().collect();
    if !sorted.windows(2).all(|w| w[0].start_date >= w[1].start_date) {
        tracing::debug!(records = history.len(), "period history out of order, sorting");
        sorted.sort_by(|a, b| b.start_date.cmp(&a.start_date));
    }
    sorted
}

/// Day gaps between consecutive period starts.
pub fn cycle_lengths(sorted: &[&PeriodRecord]) -> Vec<f64> {
    sorted
        .windows(2)
        .map(|w| days_between(w[0].start_date, w[1].start_date) as f64)
        .collect()
}

/// Rounded mean cycle length, or the configured default without at least one full cycle.
/// The predictor, the health analyzer and the safe-day estimator all go through here.
pub fn estimate_average_cycle_length(history: &[PeriodRecord], config: &CycleConfig) -> i64 {
    let lengths = cycle_lengths(&sorted_history(history));
    if lengths.is_empty() {
        return config.default_cycle_length;
    }
    mean(&lengths).round() as i64
}

pub fn latest_period_start(history: &[PeriodRecord]) -> Option<NaiveDate> {
    history.iter().map(|r| r.start_date).max()
}

/// Predict the next period, ovulation day and fertile window.
///
/// With fewer than two records there is no observed cycle, so the
/// prediction is a generic one anchored on `today`.
pub fn predict(history: &[PeriodRecord], today: NaiveDate, config: &CycleConfig) -> CyclePrediction {
    let sorted = sorted_history(history);
    if sorted.len() < 2 {
        tracing::debug!(records = sorted.len(), "not enough history, using default cycle");
        return project(today, config.default_cycle_length, false, config);
    }

    let average = estimate_average_cycle_length(history, config);
    project(sorted[0].start_date, average, true, config)
}

fn project(
    anchor: NaiveDate,
    average_cycle_length: i64,
    from_history: bool,
    config: &CycleConfig,
) -> CyclePrediction {
    let next_period_start = add_days(anchor, average_cycle_length);
    let ovulation_day = add_days(next_period_start, -config.luteal_phase_days);

    CyclePrediction {
        next_period_start,
        next_period_end: add_days(next_period_start, config.assumed_period_duration),
        ovulation_day,
        fertile_window_start: add_days(ovulation_day, -config.fertile_days_before_ovulation),
        fertile_window_end: add_days(ovulation_day, config.fertile_days_after_ovulation),
        average_cycle_length,
        from_history,
    }
}

pub fn fertility_status(prediction: &CyclePrediction, today: NaiveDate) -> FertilityStatus {
    let window = prediction.fertile_window();
    if window.contains(today) {
        return FertilityStatus::Fertile;
    }

    let days_until = (window.start - today).num_days();
    if (1..=APPROACHING_WINDOW_DAYS).contains(&days_until) {
        FertilityStatus::Approaching { days_until }
    } else {
        FertilityStatus::NotFertile
    }
}

/// How far through the current cycle `today` is, as a percentage in 0..=100.
pub fn cycle_progress(history: &[PeriodRecord], average_cycle_length: i64, today: NaiveDate) -> f64 {
    let Some(last_start) = latest_period_start(history) else {
        return 0.0;
    };
    if average_cycle_length <= 0 {
        return 0.0;
    }
    let elapsed = (today - last_start).num_days() as f64;
    (elapsed / average_cycle_length as f64 * 100.0).clamp(0.0, 100.0)
}

pub(crate) fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation (divides by n, not n - 1).
pub(crate) fn std_deviation(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let avg = mean(values);
    let variance = values.iter().map(|v| (v - avg).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}
