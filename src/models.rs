use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::date_math;
use crate::error::{CoreError, Result};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FlowLevel {
    Light,
    Medium,
    Heavy,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Mood {
    Happy,
    Calm,
    Sensitive,
    Irritable,
    Sad,
    Anxious,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PhysicalSymptom {
    Cramps,
    Headache,
    Bloating,
    Backache,
    Fatigue,
    MoodSwings,
    BreastTenderness,
    Nausea,
    Acne,
    JointPain,
}

/// One logged period. `end_date` is absent while the period is ongoing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PeriodRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub flow_level: Option<FlowLevel>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl PeriodRecord {
    pub fn new(user_id: Uuid, start_date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            start_date,
            end_date: None,
            flow_level: None,
            notes: None,
        }
    }

    pub fn with_end(mut self, end_date: NaiveDate) -> Self {
        self.end_date = Some(end_date);
        self
    }

    pub fn with_flow(mut self, flow_level: FlowLevel) -> Self {
        self.flow_level = Some(flow_level);
        self
    }

    pub fn validate(&self) -> Result<()> {
        match self.end_date {
            Some(end) if end < self.start_date => Err(CoreError::InvalidRange {
                start: self.start_date,
                end,
            }),
            _ => Ok(()),
        }
    }

    /// Inclusive day count, when the period has an end. Assumes a validated record.
    pub fn length_days(&self) -> Option<i64> {
        self.end_date.map(|end| (end - self.start_date).num_days() + 1)
    }
}

/// A day's symptom journal. One per user per date; the store enforces that.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SymptomLogEntry {
    pub user_id: Uuid,
    pub log_date: NaiveDate,
    #[serde(default)]
    pub mood: Option<Mood>,
    #[serde(default)]
    pub physical_symptoms: BTreeSet<PhysicalSymptom>,
    #[serde(default)]
    pub energy_level: Option<u8>, // 0-4
    #[serde(default)]
    pub pain_level: Option<u8>, // 0-10
    #[serde(default)]
    pub sleep_hours: Option<f64>,
    #[serde(default)]
    pub sleep_quality: Option<u8>, // 1-5
    #[serde(default)]
    pub notes: Option<String>,
}

impl SymptomLogEntry {
    pub fn new(user_id: Uuid, log_date: NaiveDate) -> Self {
        Self {
            user_id,
            log_date,
            mood: None,
            physical_symptoms: BTreeSet::new(),
            energy_level: None,
            pain_level: None,
            sleep_hours: None,
            sleep_quality: None,
            notes: None,
        }
    }

    pub fn validate(&self) -> Result<()> {
        check_range("energy_level", self.energy_level.map(f64::from), 0.0, 4.0)?;
        check_range("pain_level", self.pain_level.map(f64::from), 0.0, 10.0)?;
        check_range("sleep_hours", self.sleep_hours, 0.0, 24.0)?;
        check_range("sleep_quality", self.sleep_quality.map(f64::from), 1.0, 5.0)?;
        Ok(())
    }
}

fn check_range(field: &'static str, value: Option<f64>, min: f64, max: f64) -> Result<()> {
    match value {
        // NaN fails the range check too
        Some(v) if !(min..=max).contains(&v) => Err(CoreError::OutOfRange {
            field,
            value: v,
            min,
            max,
        }),
        _ => Ok(()),
    }
}

/// Inclusive span of calendar dates.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if end < start {
            return Err(CoreError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    pub fn dates(&self) -> Result<Vec<NaiveDate>> {
        date_math::enumerate_dates(self.start, self.end)
    }

    pub fn display(&self) -> String {
        format!(
            "{} - {}",
            date_math::format_human(self.start),
            date_math::format_human(self.end)
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CyclePrediction {
    pub next_period_start: NaiveDate,
    pub next_period_end: NaiveDate,
    pub ovulation_day: NaiveDate,
    pub fertile_window_start: NaiveDate,
    pub fertile_window_end: NaiveDate,
    pub average_cycle_length: i64,
    /// False when the prediction is the generic estimate anchored on today.
    pub from_history: bool,
}

impl CyclePrediction {
    pub fn next_period(&self) -> DateRange {
        DateRange {
            start: self.next_period_start,
            end: self.next_period_end,
        }
    }

    pub fn fertile_window(&self) -> DateRange {
        DateRange {
            start: self.fertile_window_start,
            end: self.fertile_window_end,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum FertilityStatus {
    Fertile,
    Approaching { days_until: i64 },
    NotFertile,
}

impl FertilityStatus {
    pub fn message(&self) -> String {
        match self {
            FertilityStatus::Fertile => "You are in your fertile window".into(),
            FertilityStatus::Approaching { days_until } => {
                format!("Fertile window starts in {days_until} days")
            }
            FertilityStatus::NotFertile => "Not in fertile window".into(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum InsightKind {
    TrackMoreCycles,
    ShortCycles,
    LongCycles,
    NormalCycles,
    IrregularCycles,
    ShortPeriods,
    LongPeriods,
    HeavyFlow,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum InsightType {
    Warning,
    Info,
    Success,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HealthInsight {
    pub id: InsightKind,
    #[serde(rename = "type")]
    pub insight_type: InsightType,
    pub title: String,
    pub description: String,
    pub recommendation: String,
    pub severity: Severity,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CycleAnalysis {
    pub average_cycle_length: i64,
    pub cycle_variability: i64,
    pub average_period_length: i64,
    pub is_regular: bool,
    pub insights: Vec<HealthInsight>,
}

impl CycleAnalysis {
    pub fn has_insight(&self, kind: InsightKind) -> bool {
        self.insights.iter().any(|i| i.id == kind)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CyclePhase {
    Menstrual,
    Follicular,
    Ovulation,
    Luteal,
}

/// Static self-care content for a cycle phase.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PhaseGuide {
    pub title: &'static str,
    pub description: &'static str,
    pub tips: [&'static str; 4],
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Unknown,
    High,
    Low,
    Moderate,
}

/// Rhythm-method estimate. Always carries `disclaimer`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SafeDayEstimate {
    pub risk_level: RiskLevel,
    pub safe_day_ranges: Vec<DateRange>,
    pub next_safe_range: Option<DateRange>,
    pub fertile_window: Option<DateRange>,
    pub disclaimer: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SymptomTrends {
    pub most_common_symptoms: BTreeMap<PhysicalSymptom, usize>,
    pub mood_distribution: BTreeMap<Mood, usize>,
    pub average_pain_level: f64,
    pub average_energy_level: f64,
    pub average_sleep_hours: f64,
    pub average_sleep_quality: f64,
}

/// Dates to highlight on the period calendar.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CalendarMarks {
    pub period_dates: Vec<NaiveDate>,
    pub ovulation_dates: Vec<NaiveDate>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Trimester {
    First,
    Second,
    Third,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FetalMilestone {
    pub week: i64,
    pub size: &'static str,
    pub development: &'static str,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TrimesterGuide {
    pub title: &'static str,
    pub description: &'static str,
    pub common_symptoms: &'static [&'static str],
    pub tips: &'static [&'static str],
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PregnancyProgress {
    pub due_date: NaiveDate,
    pub weeks: i64,
    pub days: i64,
    pub weeks_remaining: i64,
    pub progress_percent: f64,
    pub trimester: Trimester,
    pub size_comparison: &'static str,
    pub milestone: FetalMilestone,
}

/// Everything the in-memory store holds; also the JSON export shape.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrackerData {
    pub periods: Vec<PeriodRecord>,
    pub symptom_logs: Vec<SymptomLogEntry>,
}
