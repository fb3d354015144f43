//! Simulated sensor readings for development and demos.
//!
//! When no device is attached, this produces the same shape of data the
//! dashboard's mock mode always used: a slow sinusoidal drift (temperature
//! 25 ± 10 °C, humidity 60 ± 20 %RH on slightly different periods so the
//! two never lock in phase) plus small uniform jitter, rounded to one
//! decimal like a real DHT-class sensor report.
//!
//! # Clock injection
//! `next_reading` takes `now` as a parameter instead of reading the wall
//! clock, so tests drive the waveform deterministically; pair that with a
//! seeded RNG for fully reproducible traces.

use chrono::{DateTime, Utc};
use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::model::Reading;

/// Sinusoid periods, in milliseconds of wall time.
const TEMP_PERIOD_MS: f64 = 10_000.0;
const HUMIDITY_PERIOD_MS: f64 = 8_000.0;

pub struct SensorSimulator {
    rng: StdRng,
}

impl SensorSimulator {
    /// Simulator with OS-seeded randomness.
    pub fn new() -> Self {
        SensorSimulator {
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic simulator for tests.
    pub fn seeded(seed: u64) -> Self {
        SensorSimulator {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Produce the reading for instant `now`.
    pub fn next_reading(&mut self, now: DateTime<Utc>) -> Reading {
        let t = now.timestamp_millis() as f64;
        let base_temp = 25.0 + (t / TEMP_PERIOD_MS).sin() * 10.0;
        let base_humidity = 60.0 + (t / HUMIDITY_PERIOD_MS).cos() * 20.0;

        let temp = base_temp + self.rng.gen_range(-1.0..1.0);
        let humidity = (base_humidity + self.rng.gen_range(-2.5..2.5)).clamp(0.0, 100.0);

        Reading::new(now, round1(temp), round1(humidity))
    }
}

impl Default for SensorSimulator {
    fn default() -> Self {
        Self::new()
    }
}

fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 8, 1, 9, 0, 0).unwrap()
    }

    #[test]
    fn test_seeded_simulator_is_reproducible() {
        let mut a = SensorSimulator::seeded(42);
        let mut b = SensorSimulator::seeded(42);
        for i in 0..20 {
            let now = t0() + Duration::seconds(i * 2);
            assert_eq!(a.next_reading(now), b.next_reading(now));
        }
    }

    #[test]
    fn test_readings_stay_in_plausible_ranges() {
        let mut sim = SensorSimulator::seeded(7);
        for i in 0..500 {
            let reading = sim.next_reading(t0() + Duration::seconds(i));
            assert!(
                (13.0..=37.0).contains(&reading.temperature_c),
                "temperature out of envelope: {}",
                reading.temperature_c
            );
            assert!(
                (0.0..=100.0).contains(&reading.humidity_pct),
                "humidity out of range: {}",
                reading.humidity_pct
            );
        }
    }

    #[test]
    fn test_readings_are_rounded_to_one_decimal() {
        let mut sim = SensorSimulator::seeded(1);
        let reading = sim.next_reading(t0());
        for value in [reading.temperature_c, reading.humidity_pct] {
            let scaled = value * 10.0;
            assert!(
                (scaled - scaled.round()).abs() < 1e-9,
                "not 1-decimal: {}",
                value
            );
        }
    }

    #[test]
    fn test_reading_carries_the_given_timestamp() {
        let mut sim = SensorSimulator::seeded(3);
        let now = t0() + Duration::minutes(5);
        assert_eq!(sim.next_reading(now).timestamp, now);
    }
}
