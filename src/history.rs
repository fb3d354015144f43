//! Bounded rolling history of readings and derived indices.
//!
//! The dashboard charts five series (timestamp, temperature, humidity, DI,
//! WBGT) that must stay aligned record-for-record. Storing whole
//! [`HistoryRecord`]s in one deque makes the alignment structural: there is
//! no way to evict a timestamp without evicting its temperature, and the
//! per-series accessors are projections of the same sequence.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};

use crate::model::HistoryRecord;

/// FIFO ring of the most recent records, bounded by a fixed capacity.
///
/// Appends are amortized O(1); once full, each append evicts the single
/// oldest record.
#[derive(Debug)]
pub struct HistoryStore {
    records: VecDeque<HistoryRecord>,
    capacity: usize,
}

impl HistoryStore {
    pub fn new(capacity: usize) -> Self {
        HistoryStore {
            records: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a record, evicting the oldest when at capacity.
    pub fn append(&mut self, record: HistoryRecord) {
        if self.records.len() == self.capacity {
            self.records.pop_front();
        }
        self.records.push_back(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Remove everything; capacity is unchanged.
    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Read-only view of the current contents, oldest first.
    pub fn snapshot(&self) -> impl Iterator<Item = &HistoryRecord> {
        self.records.iter()
    }

    /// Most recent record, if any.
    pub fn latest(&self) -> Option<&HistoryRecord> {
        self.records.back()
    }

    // -- per-series projections for charting ---------------------------------

    pub fn timestamps(&self) -> Vec<DateTime<Utc>> {
        self.records.iter().map(|r| r.reading.timestamp).collect()
    }

    pub fn temperatures(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.reading.temperature_c).collect()
    }

    pub fn humidities(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.reading.humidity_pct).collect()
    }

    pub fn discomfort_indices(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.indices.discomfort).collect()
    }

    pub fn wbgt_values(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.indices.wbgt).collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
