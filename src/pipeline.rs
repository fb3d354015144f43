//! The evaluation pipeline.
//!
//! [`HeatMonitor`] is the context object that owns every piece of mutable
//! state: configuration, the rolling history, the alert tracker, and the
//! optional notifier. There are no process-wide singletons; whoever drives
//! the monitor (a timer loop, a device reader, a test) constructs one and
//! calls [`ingest`](HeatMonitor::ingest) per reading.
//!
//! One `ingest` call is one atomic step: compute indices → append history →
//! classify → detect transition → best-effort dispatch. `&mut self` makes
//! concurrent steps impossible to express, which is exactly the mutual
//! exclusion the read-then-write tracker state needs. The monitor contains
//! no loop and never sleeps; cadence is the caller's concern.

use crate::advice::{self, Activity};
use crate::alert::{AlertTracker, RiskLevel, classify};
use crate::config::Config;
use crate::history::HistoryStore;
use crate::indices;
use crate::logging::{self, Component};
use crate::model::{AlertEvent, ConfigError, HistoryRecord, IndexSet, Reading};
use crate::notify::Notifier;

/// Outcome of one pipeline step.
#[derive(Debug, Clone, Copy)]
pub struct Evaluation {
    pub indices: IndexSet,
    pub level: RiskLevel,
    /// The recorded event when this reading caused a notify-worthy
    /// transition; `None` for steady or non-notify conditions.
    pub alert: Option<AlertEvent>,
    /// Whether a dispatch attempt was made *and* succeeded. A `false` with
    /// `alert: Some(..)` means no notifier is attached or the transport
    /// failed; the alert is still recorded either way.
    pub dispatched: bool,
}

pub struct HeatMonitor {
    config: Config,
    history: HistoryStore,
    tracker: AlertTracker,
    notifier: Option<Box<dyn Notifier>>,
    activity: Activity,
}

impl HeatMonitor {
    /// Build a monitor from validated configuration, with no notifier
    /// attached (alerts are recorded but not dispatched).
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(HeatMonitor {
            history: HistoryStore::new(config.history_capacity),
            tracker: AlertTracker::new(config.alert_log_capacity),
            config,
            notifier: None,
            activity: Activity::default(),
        })
    }

    /// Attach a notification transport.
    pub fn with_notifier(mut self, notifier: Box<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Set the activity level used for hydration recommendations.
    pub fn set_activity(&mut self, activity: Activity) {
        self.activity = activity;
    }

    // -- pipeline ------------------------------------------------------------

    /// Run one reading through the full pipeline.
    pub fn ingest(&mut self, reading: Reading) -> Evaluation {
        let indices = indices::compute(&reading);
        self.history.append(HistoryRecord { reading, indices });

        let level = classify(&self.config.thresholds, indices.discomfort, indices.wbgt);
        logging::debug(
            Component::Sensor,
            &format!(
                "reading {:.1}°C / {:.1}% → DI {} WBGT {} → {}",
                reading.temperature_c, reading.humidity_pct, indices.discomfort, indices.wbgt, level
            ),
        );

        let alert = self.tracker.observe(&reading, indices, level);
        let mut dispatched = false;
        if let Some(event) = alert {
            logging::info(
                Component::Sensor,
                &format!("risk escalated to '{}' at {}", level, event.timestamp),
            );
            dispatched = self.dispatch(&event);
        }

        Evaluation {
            indices,
            level,
            alert,
            dispatched,
        }
    }

    /// One best-effort dispatch attempt. Failure is logged and swallowed;
    /// tracker state has already advanced and is never rolled back, so a
    /// flaky transport cannot cause repeat sends.
    fn dispatch(&self, event: &AlertEvent) -> bool {
        let Some(notifier) = self.notifier.as_ref() else {
            return false;
        };
        let hydration = advice::hydration_ml_per_hour_scaled(
            event.reading.temperature_c,
            event.reading.humidity_pct,
            self.config.activity_factors.factor(self.activity),
        );
        match notifier.send_alert(event, hydration) {
            Ok(()) => {
                logging::info(
                    Component::Line,
                    &format!("alert pushed for level '{}'", event.level),
                );
                true
            }
            Err(err) => {
                logging::log_dispatch_failure(&event.level.to_string(), &err);
                false
            }
        }
    }

    /// Push an ad hoc text message through the attached notifier, if any.
    /// Best-effort like alert dispatch.
    pub fn send_test_message(&self, message: &str) -> bool {
        match self.notifier.as_ref() {
            Some(notifier) => match notifier.send_text(message) {
                Ok(()) => true,
                Err(err) => {
                    logging::log_dispatch_failure("test", &err);
                    false
                }
            },
            None => false,
        }
    }

    // -- read-side surface ---------------------------------------------------

    /// Level of the most recent reading; Safe before the first one.
    pub fn current_risk_level(&self) -> RiskLevel {
        self.tracker.last_level().unwrap_or(RiskLevel::Safe)
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    pub fn alerts(&self) -> impl Iterator<Item = &AlertEvent> {
        self.tracker.events()
    }

    /// Hydration recommendation for given conditions under the configured
    /// activity factors.
    pub fn hydration_ml_per_hour(&self, temp_c: f64, humidity_pct: f64) -> u32 {
        advice::hydration_ml_per_hour_scaled(
            temp_c,
            humidity_pct,
            self.config.activity_factors.factor(self.activity),
        )
    }

    // -- operator actions ----------------------------------------------------

    /// Forget the last alert level so the next notify-tier classification
    /// fires again. Emits nothing.
    pub fn reset_alert_state(&mut self) {
        logging::info(Component::System, "alert state reset by operator");
        self.tracker.reset();
    }

    /// Operator "clear history": drop the rolling history, the alert log,
    /// and the last alert level.
    pub fn clear_history(&mut self) {
        logging::info(Component::System, "history cleared by operator");
        self.history.clear();
        self.tracker.clear_log();
        self.tracker.reset();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NotifyError;
    use chrono::{TimeZone, Utc};
    use std::sync::{Arc, Mutex};

    fn reading(temp: f64, hum: f64) -> Reading {
        Reading::new(Utc.with_ymd_and_hms(2025, 8, 1, 12, 0, 0).unwrap(), temp, hum)
    }

    /// Notifier that records what it was asked to send.
    #[derive(Default)]
    struct Recording {
        sent: Arc<Mutex<Vec<(RiskLevel, u32)>>>,
    }

    impl Notifier for Recording {
        fn send_alert(&self, event: &AlertEvent, hydration_ml: u32) -> Result<(), NotifyError> {
            self.sent.lock().unwrap().push((event.level, hydration_ml));
            Ok(())
        }
        fn send_text(&self, _message: &str) -> Result<(), NotifyError> {
            Ok(())
        }
    }

    /// Notifier whose every attempt fails.
    struct AlwaysFails;

    impl Notifier for AlwaysFails {
        fn send_alert(&self, _: &AlertEvent, _: u32) -> Result<(), NotifyError> {
            Err(NotifyError::HttpStatus(500))
        }
        fn send_text(&self, _: &str) -> Result<(), NotifyError> {
            Err(NotifyError::Transport("connection refused".into()))
        }
    }

    fn monitor_with_recording() -> (HeatMonitor, Arc<Mutex<Vec<(RiskLevel, u32)>>>) {
        let recording = Recording::default();
        let sent = Arc::clone(&recording.sent);
        let monitor = HeatMonitor::new(Config::default())
            .unwrap()
            .with_notifier(Box::new(recording));
        (monitor, sent)
    }

    #[test]
    fn test_danger_reading_dispatches_once() {
        let (mut monitor, sent) = monitor_with_recording();

        // 35 °C / 80 %RH → DI 90.9, WBGT ≈ 41.5 → Danger.
        let eval = monitor.ingest(reading(35.0, 80.0));
        assert_eq!(eval.level, RiskLevel::Danger);
        assert!(eval.alert.is_some());
        assert!(eval.dispatched);

        // Second identical reading: suppressed.
        let eval2 = monitor.ingest(reading(35.0, 80.0));
        assert_eq!(eval2.level, RiskLevel::Danger);
        assert!(eval2.alert.is_none());
        assert!(!eval2.dispatched);

        assert_eq!(sent.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_safe_reading_is_quiet() {
        let (mut monitor, sent) = monitor_with_recording();
        let eval = monitor.ingest(reading(20.0, 50.0));
        assert_eq!(eval.level, RiskLevel::Safe);
        assert!(eval.alert.is_none());
        assert!(sent.lock().unwrap().is_empty());
        assert_eq!(monitor.current_risk_level(), RiskLevel::Safe);
    }

    #[test]
    fn test_failed_dispatch_still_advances_state() {
        let mut monitor = HeatMonitor::new(Config::default())
            .unwrap()
            .with_notifier(Box::new(AlwaysFails));

        let eval = monitor.ingest(reading(35.0, 80.0));
        assert!(eval.alert.is_some(), "alert is recorded despite dispatch failure");
        assert!(!eval.dispatched);
        assert_eq!(monitor.current_risk_level(), RiskLevel::Danger);

        // No retry storm: the failed level is not re-attempted.
        let eval2 = monitor.ingest(reading(35.0, 80.0));
        assert!(eval2.alert.is_none());
    }

    #[test]
    fn test_reset_alert_state_rearms() {
        let (mut monitor, sent) = monitor_with_recording();
        monitor.ingest(reading(35.0, 80.0));
        monitor.reset_alert_state();
        monitor.ingest(reading(35.0, 80.0));
        assert_eq!(sent.lock().unwrap().len(), 2);
    }

    #[test]
    fn test_clear_history_empties_everything() {
        let (mut monitor, _) = monitor_with_recording();
        monitor.ingest(reading(35.0, 80.0));
        monitor.ingest(reading(20.0, 50.0));
        monitor.clear_history();
        assert!(monitor.history().is_empty());
        assert_eq!(monitor.alerts().count(), 0);
        assert_eq!(monitor.current_risk_level(), RiskLevel::Safe);
    }

    #[test]
    fn test_hydration_uses_configured_activity() {
        let (mut monitor, sent) = monitor_with_recording();
        monitor.set_activity(Activity::Heavy);
        monitor.ingest(reading(35.0, 80.0));
        // (200 + 100 + 50) × 2.0 = 700 ml.
        assert_eq!(sent.lock().unwrap()[0], (RiskLevel::Danger, 700));
        assert_eq!(monitor.hydration_ml_per_hour(20.0, 50.0), 400);
    }

    #[test]
    fn test_history_accumulates_per_ingest() {
        let (mut monitor, _) = monitor_with_recording();
        for _ in 0..5 {
            monitor.ingest(reading(22.0, 55.0));
        }
        assert_eq!(monitor.history().len(), 5);
    }

    #[test]
    fn test_no_notifier_records_but_does_not_dispatch() {
        let mut monitor = HeatMonitor::new(Config::default()).unwrap();
        let eval = monitor.ingest(reading(35.0, 80.0));
        assert!(eval.alert.is_some());
        assert!(!eval.dispatched);
        assert!(!monitor.send_test_message("ping"));
    }
}
