//! Alert transition tracking and deduplication.
//!
//! The tracker is an edge detector over the sequence of classified risk
//! levels. Notifications fire only on a *change into* a notify-tier level;
//! a sustained Warning produces exactly one push no matter how many readings
//! arrive at that level. This is deliberate rate limiting, not lossiness:
//! without it a hot afternoon would send a message every sampling interval.
//!
//! Re-arming: dropping to Safe or Caution updates the remembered level, so
//! the next climb back into the same notify tier fires again
//! (Warning → Safe → Warning notifies twice; Warning → Warning never does).

use std::collections::VecDeque;

use crate::alert::RiskLevel;
use crate::model::{AlertEvent, IndexSet, Reading};

/// Stateful transition detector plus the capped alert log.
///
/// Owns the only mutable alert state in the system: the last seen level and
/// the log of emitted events. Construction never fails; capacity comes from
/// validated configuration.
#[derive(Debug)]
pub struct AlertTracker {
    /// Last classified level, `None` until the first observation or after
    /// an operator reset. `None` compares as "not equal to anything", so the
    /// first notify-tier observation always fires.
    last_level: Option<RiskLevel>,
    log: VecDeque<AlertEvent>,
    log_capacity: usize,
}

impl AlertTracker {
    pub fn new(log_capacity: usize) -> Self {
        AlertTracker {
            last_level: None,
            log: VecDeque::with_capacity(log_capacity),
            log_capacity,
        }
    }

    /// Feed one newly classified level through the edge detector.
    ///
    /// Always advances `last_level`. Returns the `AlertEvent` when this
    /// observation is a notification-worthy transition (notify-tier level
    /// different from the previous one); the event has already been appended
    /// to the log. The caller decides whether and how to dispatch it;
    /// dispatch success or failure cannot influence tracker state.
    pub fn observe(
        &mut self,
        reading: &Reading,
        indices: IndexSet,
        level: RiskLevel,
    ) -> Option<AlertEvent> {
        let fire = level.is_notify_tier() && self.last_level != Some(level);
        self.last_level = Some(level);

        if !fire {
            return None;
        }

        let event = AlertEvent {
            timestamp: reading.timestamp,
            level,
            indices,
            reading: *reading,
        };
        if self.log.len() == self.log_capacity {
            self.log.pop_front();
        }
        self.log.push_back(event);
        Some(event)
    }

    /// Last classified level, if any reading has been observed since the
    /// last reset.
    pub fn last_level(&self) -> Option<RiskLevel> {
        self.last_level
    }

    /// Emitted events, oldest first.
    pub fn events(&self) -> impl Iterator<Item = &AlertEvent> {
        self.log.iter()
    }

    pub fn event_count(&self) -> usize {
        self.log.len()
    }

    /// Operator reset: forget the last level without emitting anything.
    /// The next notify-tier classification will fire even if it matches the
    /// level seen just before the reset.
    pub fn reset(&mut self) {
        self.last_level = None;
    }

    /// Drop the recorded events. Used by the operator "clear history"
    /// action together with [`reset`](Self::reset).
    pub fn clear_log(&mut self) {
        self.log.clear();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
