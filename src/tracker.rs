use chrono::NaiveDate;
use uuid::Uuid;

use crate::calendar;
use crate::clock::{Clock, SystemClock};
use crate::config::CycleConfig;
use crate::error::Result;
use crate::health;
use crate::models::*;
use crate::pregnancy;
use crate::prediction;
use crate::safe_days;
use crate::store::DataStore;
use crate::symptoms;

/// Binds a data store and a clock to the prediction core.
/// Every read recomputes from the store's current rows; nothing is cached.
pub struct Tracker<S, C = SystemClock> {
    store: S,
    clock: C,
    config: CycleConfig,
}

impl<S: DataStore> Tracker<S, SystemClock> {
    pub fn with_store(store: S) -> Self {
        Self::new(store, SystemClock, CycleConfig::default())
    }
}

impl<S: DataStore, C: Clock> Tracker<S, C> {
    pub fn new(store: S, clock: C, config: CycleConfig) -> Self {
        Self {
            store,
            clock,
            config,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &CycleConfig {
        &self.config
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn log_period(&self, record: PeriodRecord) -> Result<PeriodRecord> {
        if let Err(e) = record.validate() {
            tracing::warn!(user_id = %record.user_id, "rejected period log: {e}");
            return Err(e);
        }
        let saved = self.store.upsert_period(record)?;
        tracing::info!(user_id = %saved.user_id, start = %saved.start_date, "period logged");
        Ok(saved)
    }

    pub fn log_symptoms(&self, entry: SymptomLogEntry) -> Result<SymptomLogEntry> {
        if let Err(e) = entry.validate() {
            tracing::warn!(user_id = %entry.user_id, "rejected symptom log: {e}");
            return Err(e);
        }
        let saved = self.store.upsert_symptom_log(entry)?;
        tracing::info!(user_id = %saved.user_id, date = %saved.log_date, "symptoms logged");
        Ok(saved)
    }

    pub fn symptoms_on(&self, user_id: Uuid, date: NaiveDate) -> Result<Option<SymptomLogEntry>> {
        Ok(self.store.symptom_log(user_id, date)?)
    }

    pub fn period_history(&self, user_id: Uuid) -> Result<Vec<PeriodRecord>> {
        Ok(self.store.period_history(user_id)?)
    }

    pub fn predictions(&self, user_id: Uuid) -> Result<CyclePrediction> {
        let history = self.store.period_history(user_id)?;
        Ok(prediction::predict(&history, self.today(), &self.config))
    }

    pub fn cycle_health(&self, user_id: Uuid) -> Result<CycleAnalysis> {
        let history = self.store.period_history(user_id)?;
        health::analyze(&history, &self.config)
    }

    /// Phase for today, or `None` before any period is logged.
    pub fn current_phase(&self, user_id: Uuid) -> Result<Option<CyclePhase>> {
        let history = self.store.period_history(user_id)?;
        let Some(last_start) = prediction::latest_period_start(&history) else {
            return Ok(None);
        };
        let analysis = health::analyze(&history, &self.config)?;
        Ok(Some(health::current_cycle_phase(
            last_start,
            analysis.average_cycle_length,
            self.today(),
            &self.config,
        )))
    }

    pub fn fertility_status(&self, user_id: Uuid) -> Result<FertilityStatus> {
        let forecast = self.predictions(user_id)?;
        Ok(prediction::fertility_status(&forecast, self.today()))
    }

    pub fn cycle_progress(&self, user_id: Uuid) -> Result<f64> {
        let history = self.store.period_history(user_id)?;
        let average = prediction::estimate_average_cycle_length(&history, &self.config);
        Ok(prediction::cycle_progress(&history, average, self.today()))
    }

    pub fn safe_days(&self, user_id: Uuid) -> Result<SafeDayEstimate> {
        let history = self.store.period_history(user_id)?;
        Ok(safe_days::estimate(&history, self.today(), &self.config))
    }

    pub fn symptom_trends(&self, user_id: Uuid) -> Result<SymptomTrends> {
        let logs = self.store.symptom_history(user_id)?;
        Ok(symptoms::aggregate(&logs))
    }

    /// Calendar highlights for one month.
    pub fn calendar(&self, user_id: Uuid, year: i32, month: u32) -> Result<CalendarMarks> {
        let range = calendar::month_range(year, month)?;
        let history = self.store.period_history(user_id)?;
        let forecast = prediction::predict(&history, self.today(), &self.config);
        Ok(calendar::calendar_marks(&history, &forecast)?.within(range))
    }

    pub fn start_pregnancy(&self, due_date: NaiveDate) -> Result<PregnancyProgress> {
        let today = self.today();
        pregnancy::validate_due_date(due_date, today)?;
        tracing::info!(due = %due_date, "pregnancy tracking started");
        Ok(pregnancy::progress(due_date, today))
    }

    pub fn pregnancy_progress(&self, due_date: NaiveDate) -> PregnancyProgress {
        pregnancy::progress(due_date, self.today())
    }
}
