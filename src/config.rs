//! Service configuration.
//!
//! Everything tunable lives here: the risk threshold table, the two buffer
//! capacities, and the activity multipliers for hydration advice. Loaded
//! from a TOML file with every field optional, so an empty file yields the
//! historical defaults. Validation happens once at load; a config that
//! passes `validate` cannot make the classifier non-monotone or the buffers
//! unbounded.
//!
//! Credentials (LINE channel token and user id) are deliberately *not* part
//! of this file. They come from the environment, see `notify::line`.

use serde::Deserialize;

use crate::advice::Activity;
use crate::alert::ThresholdTable;
use crate::model::ConfigError;

// ---------------------------------------------------------------------------
// Activity factors
// ---------------------------------------------------------------------------

/// Hydration multipliers per activity level.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ActivityFactors {
    pub rest: f64,
    pub light: f64,
    pub normal: f64,
    pub moderate: f64,
    pub heavy: f64,
}

impl Default for ActivityFactors {
    fn default() -> Self {
        ActivityFactors {
            rest: 1.0,
            light: 1.2,
            normal: 1.0,
            moderate: 1.5,
            heavy: 2.0,
        }
    }
}

impl ActivityFactors {
    pub fn factor(&self, activity: Activity) -> f64 {
        match activity {
            Activity::Rest => self.rest,
            Activity::Light => self.light,
            Activity::Normal => self.normal,
            Activity::Moderate => self.moderate,
            Activity::Heavy => self.heavy,
        }
    }
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// Historical defaults: 200 chart points, 50 logged alerts.
const DEFAULT_HISTORY_CAPACITY: usize = 200;
const DEFAULT_ALERT_LOG_CAPACITY: usize = 50;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub thresholds: ThresholdTable,
    pub history_capacity: usize,
    pub alert_log_capacity: usize,
    pub activity_factors: ActivityFactors,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            thresholds: ThresholdTable::default(),
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            alert_log_capacity: DEFAULT_ALERT_LOG_CAPACITY,
            activity_factors: ActivityFactors::default(),
        }
    }
}

impl Config {
    /// Parse and validate a TOML document. Missing fields take defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Config =
            toml::from_str(text).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse, and validate a TOML config file.
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::ParseError(format!("{}: {}", path, e)))?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.thresholds.validate()?;
        if self.history_capacity == 0 {
            return Err(ConfigError::ZeroCapacity("history"));
        }
        if self.alert_log_capacity == 0 {
            return Err(ConfigError::ZeroCapacity("alert log"));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
