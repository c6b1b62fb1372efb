use std::sync::Mutex;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::models::{PeriodRecord, SymptomLogEntry, TrackerData};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store lock poisoned")]
    Poisoned,
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Row storage the tracker reads history from and writes logs to.
///
/// Fetches return records most recent first. Upserts replace an existing
/// row with the same key: the record id for periods, `(user_id, log_date)`
/// for symptom logs.
pub trait DataStore: Send + Sync {
    fn period_history(&self, user_id: Uuid) -> Result<Vec<PeriodRecord>, StoreError>;

    fn upsert_period(&self, record: PeriodRecord) -> Result<PeriodRecord, StoreError>;

    fn symptom_history(&self, user_id: Uuid) -> Result<Vec<SymptomLogEntry>, StoreError>;

    fn symptom_log(&self, user_id: Uuid, date: NaiveDate) -> Result<Option<SymptomLogEntry>, StoreError>;

    fn upsert_symptom_log(&self, entry: SymptomLogEntry) -> Result<SymptomLogEntry, StoreError>;
}

/// Process-local store, mainly for tests and offline use.
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: Mutex<TrackerData>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_data(data: TrackerData) -> Self {
        Self {
            data: Mutex::new(data),
        }
    }

    pub fn export_json(&self) -> Result<String, StoreError> {
        let data = self.data.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(serde_json::to_string_pretty(&*data)?)
    }

    pub fn import_json(json: &str) -> Result<Self, StoreError> {
        let data: TrackerData = serde_json::from_str(json)?;
        Ok(Self::from_data(data))
    }
}

impl DataStore for MemoryStore {
    fn period_history(&self, user_id: Uuid) -> Result<Vec<PeriodRecord>, StoreError> {
        let data = self.data.lock().map_err(|_| StoreError::Poisoned)?;
        let mut periods: Vec<PeriodRecord> = data
            .periods
            .iter()
            .filter(|p| p.user_id == user_id)
            .cloned()
            .collect();
        periods.sort_by(|a, b| b.start_date.cmp(&a.start_date));
        Ok(periods)
    }

    fn upsert_period(&self, record: PeriodRecord) -> Result<PeriodRecord, StoreError> {
        let mut data = self.data.lock().map_err(|_| StoreError::Poisoned)?;
        if let Some(existing) = data.periods.iter_mut().find(|p| p.id == record.id) {
            *existing = record.clone();
        } else {
            data.periods.push(record.clone());
        }
        Ok(record)
    }

    fn symptom_history(&self, user_id: Uuid) -> Result<Vec<SymptomLogEntry>, StoreError> {
        let data = self.data.lock().map_err(|_| StoreError::Poisoned)?;
        let mut logs: Vec<SymptomLogEntry> = data
            .symptom_logs
            .iter()
            .filter(|l| l.user_id == user_id)
            .cloned()
            .collect();
        logs.sort_by(|a, b| b.log_date.cmp(&a.log_date));
        Ok(logs)
    }

    fn symptom_log(&self, user_id: Uuid, date: NaiveDate) -> Result<Option<SymptomLogEntry>, StoreError> {
        let data = self.data.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(data
            .symptom_logs
            .iter()
            .find(|l| l.user_id == user_id && l.log_date == date)
            .cloned())
    }

    fn upsert_symptom_log(&self, entry: SymptomLogEntry) -> Result<SymptomLogEntry, StoreError> {
        let mut data = self.data.lock().map_err(|_| StoreError::Poisoned)?;
        if let Some(existing) = data
            .symptom_logs
            .iter_mut()
            .find(|l| l.user_id == entry.user_id && l.log_date == entry.log_date)
        {
            *existing = entry.clone();
        } else {
            data.symptom_logs.push(entry.clone());
        }
        Ok(entry)
    }
}
