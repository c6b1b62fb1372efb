use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Bound on every day-valued setting; keeps projected dates inside chrono's range.
const MAX_DAY_OFFSET: i64 = 366;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
    #[error("config directory not found")]
    NoConfigDir,
}

/// Population-average heuristics used by the predictors.
/// None of these are personalized; they are tunable only here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CycleConfig {
    pub default_cycle_length: i64,
    pub default_period_length: i64,
    /// Days added to a predicted start to get the predicted end.
    pub assumed_period_duration: i64,
    pub luteal_phase_days: i64,
    pub fertile_days_before_ovulation: i64,
    pub fertile_days_after_ovulation: i64,
    pub min_regular_cycle: i64,
    pub max_regular_cycle: i64,
    pub max_regular_variability: f64,
    pub short_period_days: f64,
    pub long_period_days: f64,
    /// Share of heavy-flow records that must be exceeded to warn.
    pub heavy_flow_share: f64,
    pub menstrual_phase_days: i64,
    pub ovulation_phase_half_width: f64,
    pub safe_days_after_period_start: i64,
    pub safe_gap_after_fertile_window: i64,
    pub safe_margin_before_period: i64,
}

impl Default for CycleConfig {
    fn default() -> Self {
        Self {
            default_cycle_length: 28,
            default_period_length: 5,
            assumed_period_duration: 5,
            luteal_phase_days: 14,
            fertile_days_before_ovulation: 5,
            fertile_days_after_ovulation: 1,
            min_regular_cycle: 21,
            max_regular_cycle: 35,
            max_regular_variability: 7.0,
            short_period_days: 3.0,
            long_period_days: 7.0,
            heavy_flow_share: 0.5,
            menstrual_phase_days: 5,
            ovulation_phase_half_width: 2.0,
            safe_days_after_period_start: 7,
            safe_gap_after_fertile_window: 2,
            safe_margin_before_period: 5,
        }
    }
}

/// Default location of the config file.
pub fn config_file_path() -> Result<PathBuf, ConfigError> {
    let dir = dirs::config_dir()
        .ok_or(ConfigError::NoConfigDir)?
        .join("femina");
    Ok(dir.join("config.json"))
}

impl CycleConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: CycleConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load from the default location, falling back to defaults when no file exists.
    pub fn load_or_default() -> Result<Self, ConfigError> {
        let path = config_file_path()?;
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let config = Self::load(&path)?;
        tracing::info!(path = %path.display(), "loaded cycle config");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_regular_cycle > self.max_regular_cycle {
            return Err(ConfigError::Invalid(format!(
                "min_regular_cycle {} exceeds max_regular_cycle {}",
                self.min_regular_cycle, self.max_regular_cycle
            )));
        }
        if self.short_period_days > self.long_period_days {
            return Err(ConfigError::Invalid(format!(
                "short_period_days {} exceeds long_period_days {}",
                self.short_period_days, self.long_period_days
            )));
        }
        if !(0.0..=1.0).contains(&self.heavy_flow_share) {
            return Err(ConfigError::Invalid(format!(
                "heavy_flow_share {} not in 0..=1",
                self.heavy_flow_share
            )));
        }
        let day_fields = [
            ("default_cycle_length", self.default_cycle_length, 1),
            ("default_period_length", self.default_period_length, 1),
            ("assumed_period_duration", self.assumed_period_duration, 0),
            ("luteal_phase_days", self.luteal_phase_days, 0),
            ("fertile_days_before_ovulation", self.fertile_days_before_ovulation, 0),
            ("fertile_days_after_ovulation", self.fertile_days_after_ovulation, 0),
            ("menstrual_phase_days", self.menstrual_phase_days, 0),
            ("safe_days_after_period_start", self.safe_days_after_period_start, 0),
            ("safe_gap_after_fertile_window", self.safe_gap_after_fertile_window, -MAX_DAY_OFFSET),
            ("safe_margin_before_period", self.safe_margin_before_period, -MAX_DAY_OFFSET),
        ];
        for (name, value, min) in day_fields {
            if !(min..=MAX_DAY_OFFSET).contains(&value) {
                return Err(ConfigError::Invalid(format!(
                    "{name} {value} not in {min}..={MAX_DAY_OFFSET}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(CycleConfig::default().validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = CycleConfig::from_json(r#"{ "luteal_phase_days": 12 }"#).unwrap();
        assert_eq!(config.luteal_phase_days, 12);
        assert_eq!(config.default_cycle_length, 28);
        assert_eq!(config.fertile_days_before_ovulation, 5);
    }

    #[test]
    fn rejects_inverted_regular_range() {
        let result = CycleConfig::from_json(r#"{ "min_regular_cycle": 40 }"#);
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn rejects_heavy_share_above_one() {
        let result = CycleConfig::from_json(r#"{ "heavy_flow_share": 1.5 }"#);
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn rejects_oversized_day_offsets() {
        for json in [
            r#"{ "default_cycle_length": 1000000000000000 }"#,
            r#"{ "safe_margin_before_period": -9000000000000000 }"#,
            r#"{ "luteal_phase_days": 367 }"#,
            r#"{ "default_cycle_length": 0 }"#,
            r#"{ "menstrual_phase_days": -1 }"#,
        ] {
            let result = CycleConfig::from_json(json);
            assert!(matches!(result, Err(ConfigError::Invalid(_))), "{json}");
        }
    }

    #[test]
    fn safe_offsets_may_be_negative() {
        let config = CycleConfig::from_json(r#"{ "safe_gap_after_fertile_window": -6 }"#).unwrap();
        assert_eq!(config.safe_gap_after_fertile_window, -6);
    }

    #[test]
    fn load_reads_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "default_cycle_length": 30 }"#).unwrap();

        let config = CycleConfig::load(&path).unwrap();
        assert_eq!(config.default_cycle_length, 30);
        assert_eq!(config.luteal_phase_days, 14);
        assert_eq!(config.safe_margin_before_period, 5);
    }

    #[test]
    fn load_validates_file_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "heavy_flow_share": 2.0 }"#).unwrap();
        assert!(matches!(CycleConfig::load(&path), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = CycleConfig::load(&dir.path().join("absent.json"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn load_or_default_yields_valid_config() {
        match CycleConfig::load_or_default() {
            Ok(config) => assert!(config.validate().is_ok()),
            Err(e) => assert!(matches!(e, ConfigError::NoConfigDir | ConfigError::Io(_)), "{e}"),
        }
    }

    #[test]
    fn malformed_json_is_parse_error() {
        let result = CycleConfig::from_json("{ not json");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn config_path_ends_with_file_name() {
        if let Ok(path) = config_file_path() {
            assert!(path.ends_with("femina/config.json"));
        }
    }
}
