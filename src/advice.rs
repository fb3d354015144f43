//! Hydration guidance.
//!
//! Level labels, colors, and advice text live on `RiskLevel` itself
//! (`alert::levels`); this module holds the activity model and the hydration
//! volume recommendation derived from current conditions.

use serde::Deserialize;

// ---------------------------------------------------------------------------
// Activity levels
// ---------------------------------------------------------------------------

/// Physical activity level of the person being advised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Activity {
    Rest,
    Light,
    Normal,
    Moderate,
    Heavy,
}

impl Activity {
    /// Multiplier applied to the base hydration volume.
    pub fn factor(self) -> f64 {
        match self {
            Activity::Rest => 1.0,
            Activity::Light => 1.2,
            Activity::Normal => 1.0,
            Activity::Moderate => 1.5,
            Activity::Heavy => 2.0,
        }
    }
}

impl Default for Activity {
    fn default() -> Self {
        Activity::Rest
    }
}

// ---------------------------------------------------------------------------
// Hydration recommendation
// ---------------------------------------------------------------------------

/// Base recommendation in ml/hour under mild conditions at rest.
const BASE_ML_PER_HOUR: f64 = 200.0;

/// Surcharge per degree Celsius above this temperature.
const TEMP_SURCHARGE_START_C: f64 = 30.0;
const ML_PER_DEGREE: f64 = 20.0;

/// Surcharge per percentage point of relative humidity above this level.
const HUMIDITY_SURCHARGE_START_PCT: f64 = 70.0;
const ML_PER_HUMIDITY_PCT: f64 = 5.0;

/// Recommended water intake in ml per hour, using the built-in activity
/// multipliers.
///
/// base 200 ml, +20 ml per °C above 30, +5 ml per %RH above 70, scaled by
/// the activity factor and truncated to a whole number of ml.
pub fn hydration_ml_per_hour(temp_c: f64, humidity_pct: f64, activity: Activity) -> u32 {
    hydration_ml_per_hour_scaled(temp_c, humidity_pct, activity.factor())
}

/// Same computation with an explicit multiplier, for deployments that
/// override the activity factors in configuration.
pub fn hydration_ml_per_hour_scaled(temp_c: f64, humidity_pct: f64, factor: f64) -> u32 {
    let mut ml = BASE_ML_PER_HOUR;
    if temp_c > TEMP_SURCHARGE_START_C {
        ml += (temp_c - TEMP_SURCHARGE_START_C) * ML_PER_DEGREE;
    }
    if humidity_pct > HUMIDITY_SURCHARGE_START_PCT {
        ml += (humidity_pct - HUMIDITY_SURCHARGE_START_PCT) * ML_PER_HUMIDITY_PCT;
    }
    (ml * factor) as u32
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
