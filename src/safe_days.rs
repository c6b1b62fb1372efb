use chrono::NaiveDate;

use crate::config::CycleConfig;
use crate::date_math::add_days;
use crate::models::{DateRange, PeriodRecord, RiskLevel, SafeDayEstimate};
use crate::prediction::{estimate_average_cycle_length, sorted_history};

pub const DISCLAIMER: &str = "This calculation is based on the rhythm method and is not 100% reliable. \
Always consult with healthcare professionals and consider using additional contraceptive methods.";

/// Rhythm-method risk estimate for `today`.
///
/// The second safe range assumes the cycle after next is as long as the
/// next one.
pub fn estimate(history: &[PeriodRecord], today: NaiveDate, config: &CycleConfig) -> SafeDayEstimate {
    let sorted = sorted_history(history);
    if sorted.len() < 2 {
        tracing::debug!(records = sorted.len(), "not enough history for safe days");
        return SafeDayEstimate {
            risk_level: RiskLevel::Unknown,
            safe_day_ranges: Vec::new(),
            next_safe_range: None,
            fertile_window: None,
            disclaimer: DISCLAIMER.into(),
        };
    }

    let average = estimate_average_cycle_length(history, config);
    let next_period_start = add_days(sorted[0].start_date, average);
    let ovulation_day = add_days(next_period_start, -config.luteal_phase_days);
    let fertile = DateRange {
        start: add_days(ovulation_day, -config.fertile_days_before_ovulation),
        end: add_days(ovulation_day, config.fertile_days_after_ovulation),
    };

    let around_period = clamped_range(
        next_period_start,
        add_days(next_period_start, config.safe_days_after_period_start),
    );
    let after_fertile = clamped_range(
        add_days(fertile.end, config.safe_gap_after_fertile_window),
        add_days(next_period_start, average - config.safe_margin_before_period),
    );

    let risk_level = if fertile.contains(today) {
        RiskLevel::High
    } else if around_period.contains(today) || after_fertile.contains(today) {
        RiskLevel::Low
    } else {
        RiskLevel::Moderate
    };

    SafeDayEstimate {
        risk_level,
        safe_day_ranges: vec![around_period, after_fertile],
        next_safe_range: Some(after_fertile),
        fertile_window: Some(fertile),
        disclaimer: DISCLAIMER.into(),
    }
}

/// Range from `start` to `end`, collapsed to the single day `start` when `end` falls before it.
fn clamped_range(start: NaiveDate, end: NaiveDate) -> DateRange {
    DateRange::new(start, end).unwrap_or(DateRange { start, end: start })
}

impl SafeDayEstimate {
    pub fn safe_days_text(&self) -> String {
        if self.safe_day_ranges.is_empty() {
            return "Insufficient data".into();
        }
        self.safe_day_ranges
            .iter()
            .map(DateRange::display)
            .collect::<Vec<_>>()
            .join(" & ")
    }

    pub fn next_safe_text(&self) -> String {
        self.next_safe_range
            .map(|r| r.display())
            .unwrap_or_else(|| "Need more cycle data".into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn two_cycles() -> Vec<PeriodRecord> {
        vec![
            PeriodRecord::new(Uuid::nil(), date("2025-03-01")),
            PeriodRecord::new(Uuid::nil(), date("2025-02-01")),
        ]
    }

    #[test]
    fn insufficient_history_is_unknown() {
        let config = CycleConfig::default();
        let one = vec![PeriodRecord::new(Uuid::nil(), date("2025-03-01"))];
        for history in [vec![], one] {
            let est = estimate(&history, date("2025-03-10"), &config);
            assert_eq!(est.risk_level, RiskLevel::Unknown);
            assert!(est.fertile_window.is_none());
            assert_eq!(est.safe_days_text(), "Insufficient data");
            assert_eq!(est.next_safe_text(), "Need more cycle data");
            assert_eq!(est.disclaimer, DISCLAIMER);
        }
    }

    #[test]
    fn computes_ranges() {
        let est = estimate(&two_cycles(), date("2025-03-05"), &CycleConfig::default());
        // next period 03-29, ovulation 03-15, fertile 03-10..03-16
        assert_eq!(
            est.fertile_window,
            Some(DateRange { start: date("2025-03-10"), end: date("2025-03-16") })
        );
        assert_eq!(
            est.safe_day_ranges,
            vec![
                DateRange { start: date("2025-03-29"), end: date("2025-04-05") },
                DateRange { start: date("2025-03-18"), end: date("2025-04-21") },
            ]
        );
        assert_eq!(est.next_safe_range, Some(est.safe_day_ranges[1]));
        assert!(!est.disclaimer.is_empty());
    }

    #[test]
    fn risk_levels() {
        let config = CycleConfig::default();
        let risk = |d: &str| estimate(&two_cycles(), date(d), &config).risk_level;
        assert_eq!(risk("2025-03-12"), RiskLevel::High);
        assert_eq!(risk("2025-03-20"), RiskLevel::Low);
        assert_eq!(risk("2025-04-03"), RiskLevel::Low);
        assert_eq!(risk("2025-03-05"), RiskLevel::Moderate);
        assert_eq!(risk("2025-03-17"), RiskLevel::Moderate);
    }

    #[test]
    fn fertile_window_wins_over_safe_range() {
        // Gap of -6 pulls the post-fertile range back over the fertile window.
        let config = CycleConfig {
            safe_gap_after_fertile_window: -6,
            ..CycleConfig::default()
        };
        let est = estimate(&two_cycles(), date("2025-03-12"), &config);
        assert!(est.safe_day_ranges[1].contains(date("2025-03-12")));
        assert_eq!(est.risk_level, RiskLevel::High);
    }

    #[test]
    fn safe_ranges_never_invert() {
        // A margin longer than the cycle would end the post-fertile range before it starts.
        let config = CycleConfig {
            safe_margin_before_period: 60,
            ..CycleConfig::default()
        };
        let est = estimate(&two_cycles(), date("2025-03-05"), &config);
        let after_fertile = est.safe_day_ranges[1];
        assert_eq!(after_fertile.start, date("2025-03-18"));
        assert_eq!(after_fertile.end, after_fertile.start);
        assert_eq!(after_fertile.dates().unwrap(), vec![date("2025-03-18")]);
        for range in &est.safe_day_ranges {
            assert!(range.end >= range.start);
        }
    }

    #[test]
    fn summary_text() {
        let est = estimate(&two_cycles(), date("2025-03-05"), &CycleConfig::default());
        assert_eq!(
            est.safe_days_text(),
            "Mar 29, 2025 - Apr 5, 2025 & Mar 18, 2025 - Apr 21, 2025"
        );
        assert_eq!(est.next_safe_text(), "Mar 18, 2025 - Apr 21, 2025");
    }
}
