//! Comfort and heat-stress index calculation.
//!
//! Two empirical formulas over (temperature °C, relative humidity %):
//! the discomfort index used on the dashboard and a WBGT approximation used
//! for heat-stroke risk. Both are pure total functions. Out-of-range inputs
//! produce mathematically valid but physically meaningless output rather
//! than an error, so callers wanting domain validation must do it upstream.

use crate::model::{IndexSet, Reading};

/// Round to one decimal place, matching the display precision the rest of
/// the system (thresholds, notifications, history) works in.
fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

/// Discomfort index:
///   DI = 0.81·T + 0.01·H·(0.99·T − 14.3) + 46.3
///
/// Rounded to one decimal. Roughly: below 70 comfortable, 75+ sweaty,
/// 80+ everyone uncomfortable.
pub fn discomfort_index(temp_c: f64, humidity_pct: f64) -> f64 {
    let di = 0.81 * temp_c + 0.01 * humidity_pct * (0.99 * temp_c - 14.3) + 46.3;
    round1(di)
}

/// WBGT approximation from temperature and humidity only:
///   e    = (H/100)·6.105·exp(17.27·T / (237.7 + T))   (vapor pressure, hPa)
///   WBGT = 0.567·T + 0.393·e + 3.94
///
/// Rounded to one decimal. This is the indoor estimation formula, with no
/// solar radiation or wind terms.
pub fn wbgt_approx(temp_c: f64, humidity_pct: f64) -> f64 {
    let e = humidity_pct / 100.0 * 6.105 * (17.27 * temp_c / (237.7 + temp_c)).exp();
    round1(0.567 * temp_c + 0.393 * e + 3.94)
}

/// Compute both indices for a reading.
pub fn compute(reading: &Reading) -> IndexSet {
    IndexSet {
        discomfort: discomfort_index(reading.temperature_c, reading.humidity_pct),
        wbgt: wbgt_approx(reading.temperature_c, reading.humidity_pct),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
