//! Core data types for the heat-stress monitoring service.
//!
//! This module defines the shared domain model imported by all other modules.
//! It contains no logic beyond constructors and error formatting; the
//! calculators, classifier, and tracker all live in their own modules.

use chrono::{DateTime, Utc};

// ---------------------------------------------------------------------------
// Reading types
// ---------------------------------------------------------------------------

/// A single temperature/humidity measurement from the sensor source.
///
/// Produced at an arbitrary cadence by whatever feeds the pipeline:
/// a serial-attached sensor, a replayed log, or the simulator. Immutable
/// once created.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    pub timestamp: DateTime<Utc>,
    /// Air temperature in degrees Celsius.
    pub temperature_c: f64,
    /// Relative humidity in percent (0–100).
    pub humidity_pct: f64,
}

impl Reading {
    pub fn new(timestamp: DateTime<Utc>, temperature_c: f64, humidity_pct: f64) -> Self {
        Self {
            timestamp,
            temperature_c,
            humidity_pct,
        }
    }
}

/// Derived comfort/heat-stress indices for one reading.
///
/// Always recomputed from a `Reading` by `indices`; carries no identity of
/// its own and is never mutated after computation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndexSet {
    /// Discomfort index (unitless empirical comfort scale).
    pub discomfort: f64,
    /// WBGT approximation in degrees Celsius.
    pub wbgt: f64,
}

// ---------------------------------------------------------------------------
// History and alert records
// ---------------------------------------------------------------------------

/// One entry in the rolling history: the raw reading plus its derived
/// indices, kept together so every series stays aligned by construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistoryRecord {
    pub reading: Reading,
    pub indices: IndexSet,
}

/// A recorded risk escalation.
///
/// Appended to the capped alert log only on a level change into a
/// notify-tier level; sustained same-level conditions produce exactly one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlertEvent {
    pub timestamp: DateTime<Utc>,
    pub level: crate::alert::RiskLevel,
    pub indices: IndexSet,
    pub reading: Reading,
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that make the service unusable at construction time.
///
/// These are the only fatal-at-startup conditions; everything after
/// construction degrades gracefully.
#[derive(Debug, PartialEq)]
pub enum ConfigError {
    /// The threshold table is not strictly increasing in one of the metrics.
    NonMonotoneThresholds(String),
    /// A capacity was configured as zero.
    ZeroCapacity(&'static str),
    /// The configuration file could not be read or parsed.
    ParseError(String),
    /// A required credential environment variable is unset or empty.
    MissingCredential(&'static str),
    /// The HTTP client for the notification transport could not be built.
    ClientInit(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::NonMonotoneThresholds(detail) => {
                write!(f, "threshold table is not monotone: {}", detail)
            }
            ConfigError::ZeroCapacity(which) => {
                write!(f, "capacity for {} must be at least 1", which)
            }
            ConfigError::ParseError(msg) => write!(f, "config parse error: {}", msg),
            ConfigError::MissingCredential(var) => {
                write!(f, "required environment variable {} is not set", var)
            }
            ConfigError::ClientInit(msg) => {
                write!(f, "failed to build HTTP client: {}", msg)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Errors from the notification transport.
///
/// The pipeline treats every variant as non-fatal: the failure is logged and
/// the alert state still advances, so a flaky transport cannot cause retry
/// storms.
#[derive(Debug)]
pub enum NotifyError {
    /// Non-2xx HTTP response from the push API.
    HttpStatus(u16),
    /// The request could not be sent at all (DNS, TLS, timeout).
    Transport(String),
}

impl std::fmt::Display for NotifyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NotifyError::HttpStatus(code) => write!(f, "push API returned HTTP {}", code),
            NotifyError::Transport(msg) => write!(f, "push request failed: {}", msg),
        }
    }
}

impl std::error::Error for NotifyError {}
