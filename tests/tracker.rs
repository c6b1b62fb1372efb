use chrono::NaiveDate;
use femina_core::health::phase_guide;
use femina_core::models::*;
use femina_core::{CoreError, CycleConfig, DataStore, FixedClock, MemoryStore, Tracker};
use uuid::Uuid;

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn tracker_on(today: &str) -> Tracker<MemoryStore, FixedClock> {
    init_logging();
    Tracker::new(MemoryStore::new(), FixedClock(date(today)), CycleConfig::default())
}

fn log_periods(tracker: &Tracker<MemoryStore, FixedClock>, user: Uuid, starts: &[&str]) {
    for start in starts {
        tracker
            .log_period(PeriodRecord::new(user, date(start)).with_flow(FlowLevel::Medium))
            .unwrap();
    }
}

#[test]
fn new_user_gets_generic_results() {
    let tracker = tracker_on("2025-03-10");
    let user = Uuid::new_v4();

    let prediction = tracker.predictions(user).unwrap();
    assert_eq!(prediction.average_cycle_length, 28);
    assert_eq!(prediction.next_period_start, date("2025-04-07"));
    assert!(!prediction.from_history);

    let health = tracker.cycle_health(user).unwrap();
    assert_eq!(health.insights[0].id, InsightKind::TrackMoreCycles);

    assert_eq!(tracker.safe_days(user).unwrap().risk_level, RiskLevel::Unknown);
    assert_eq!(tracker.current_phase(user).unwrap(), None);
    assert_eq!(tracker.cycle_progress(user).unwrap(), 0.0);
    assert_eq!(tracker.symptom_trends(user).unwrap(), SymptomTrends::default());
}

#[test]
fn logged_history_drives_every_view() {
    let tracker = tracker_on("2025-03-14");
    let user = Uuid::new_v4();
    log_periods(&tracker, user, &["2025-02-01", "2025-03-01"]);

    let prediction = tracker.predictions(user).unwrap();
    assert_eq!(prediction.next_period_start, date("2025-03-29"));
    assert_eq!(prediction.ovulation_day, date("2025-03-15"));

    assert_eq!(tracker.fertility_status(user).unwrap(), FertilityStatus::Fertile);
    assert_eq!(tracker.safe_days(user).unwrap().risk_level, RiskLevel::High);

    let phase = tracker.current_phase(user).unwrap().unwrap();
    assert_eq!(phase, CyclePhase::Ovulation);
    assert_eq!(phase_guide(phase).title, "Ovulation Phase");

    let health = tracker.cycle_health(user).unwrap();
    assert!(health.is_regular);
    assert!(health.has_insight(InsightKind::NormalCycles));
}

#[test]
fn safe_day_risk_follows_the_clock() {
    let user = Uuid::new_v4();
    let risk_on = |today: &str| {
        let tracker = tracker_on(today);
        log_periods(&tracker, user, &["2025-02-01", "2025-03-01"]);
        tracker.safe_days(user).unwrap().risk_level
    };
    assert_eq!(risk_on("2025-03-10"), RiskLevel::High);
    assert_eq!(risk_on("2025-03-16"), RiskLevel::High);
    assert_eq!(risk_on("2025-03-25"), RiskLevel::Low);
    assert_eq!(risk_on("2025-03-08"), RiskLevel::Moderate);
}

#[test]
fn rejects_malformed_input() {
    let tracker = tracker_on("2025-03-12");
    let user = Uuid::new_v4();

    let reversed = PeriodRecord::new(user, date("2025-03-05")).with_end(date("2025-03-01"));
    assert!(matches!(
        tracker.log_period(reversed),
        Err(CoreError::InvalidRange { .. })
    ));
    assert!(tracker.period_history(user).unwrap().is_empty());

    let mut entry = SymptomLogEntry::new(user, date("2025-03-12"));
    entry.pain_level = Some(11);
    assert!(matches!(
        tracker.log_symptoms(entry),
        Err(CoreError::OutOfRange { field: "pain_level", .. })
    ));
}

#[test]
fn symptom_logs_upsert_per_day() {
    let tracker = tracker_on("2025-03-12");
    let user = Uuid::new_v4();

    let mut first = SymptomLogEntry::new(user, date("2025-03-11"));
    first.mood = Some(Mood::Sad);
    first.physical_symptoms.insert(PhysicalSymptom::Headache);
    tracker.log_symptoms(first).unwrap();

    let mut replacement = SymptomLogEntry::new(user, date("2025-03-11"));
    replacement.mood = Some(Mood::Happy);
    replacement.energy_level = Some(4);
    tracker.log_symptoms(replacement).unwrap();

    let mut next_day = SymptomLogEntry::new(user, date("2025-03-12"));
    next_day.mood = Some(Mood::Happy);
    next_day.energy_level = Some(2);
    tracker.log_symptoms(next_day).unwrap();

    let trends = tracker.symptom_trends(user).unwrap();
    assert_eq!(trends.mood_distribution.get(&Mood::Happy), Some(&2));
    assert!(!trends.mood_distribution.contains_key(&Mood::Sad));
    assert!(trends.most_common_symptoms.is_empty());
    assert_eq!(trends.average_energy_level, 3.0);

    let saved = tracker.symptoms_on(user, date("2025-03-11")).unwrap().unwrap();
    assert_eq!(saved.energy_level, Some(4));
}

#[test]
fn calendar_shows_month_marks() {
    let tracker = tracker_on("2025-03-12");
    let user = Uuid::new_v4();
    tracker
        .log_period(PeriodRecord::new(user, date("2025-02-01")).with_end(date("2025-02-04")))
        .unwrap();
    tracker
        .log_period(PeriodRecord::new(user, date("2025-03-01")).with_end(date("2025-03-05")))
        .unwrap();

    let march = tracker.calendar(user, 2025, 3).unwrap();
    assert_eq!(march.period_dates.len(), 5);
    assert_eq!(march.ovulation_dates, vec![date("2025-03-15")]);

    let february = tracker.calendar(user, 2025, 2).unwrap();
    assert_eq!(february.period_dates.len(), 4);
    assert!(february.ovulation_dates.is_empty());

    assert!(matches!(
        tracker.calendar(user, 2025, 0),
        Err(CoreError::InvalidMonth { .. })
    ));
}

#[test]
fn pregnancy_tracking() {
    let tracker = tracker_on("2026-10-15");
    assert!(matches!(
        tracker.start_pregnancy(date("2026-10-01")),
        Err(CoreError::DueDateInPast(_))
    ));

    // 20 weeks to go
    let progress = tracker.start_pregnancy(date("2027-03-04")).unwrap();
    assert_eq!(progress.weeks, 20);
    assert_eq!(progress.days, 0);
    assert_eq!(progress.trimester, Trimester::Second);
    assert_eq!(progress.milestone.week, 20);
}

#[test]
fn store_export_round_trips_through_tracker() {
    let tracker = tracker_on("2025-03-12");
    let user = Uuid::new_v4();
    log_periods(&tracker, user, &["2025-01-04", "2025-02-01", "2025-03-01"]);

    let json = tracker.store().export_json().unwrap();
    let restored = Tracker::new(
        MemoryStore::import_json(&json).unwrap(),
        FixedClock(date("2025-03-12")),
        CycleConfig::default(),
    );
    assert_eq!(restored.predictions(user).unwrap(), tracker.predictions(user).unwrap());
    assert_eq!(restored.store().period_history(user).unwrap().len(), 3);
}
