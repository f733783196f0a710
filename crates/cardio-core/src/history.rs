//! Bounded, most-recent-first store for completed measurements

use crate::reading::Reading;

/// Maximum number of records kept before the oldest is evicted
pub const HISTORY_CAPACITY: usize = 20;

/// One stored measurement, derived from a reading at record time
#[derive(Debug, Clone)]
pub struct HistoryRecord {
    /// Wall-clock time of the measurement, formatted `%H:%M:%S`
    pub timestamp: String,
    /// Series average in BPM, one decimal
    pub avg_bpm: f32,
    /// Risk score in [0, 1], two decimals
    pub risk_score: f32,
    /// Series maximum, whole BPM
    pub max_bpm: f32,
    /// Series minimum, whole BPM
    pub min_bpm: f32,
    /// The raw reading the record was derived from
    pub reading: Reading,
}

/// Ordered record store, most recent first, bounded at [`HISTORY_CAPACITY`].
///
/// Exactly one producer may append at a time; the scheduling layer enforces
/// this, so no locking happens here.
#[derive(Debug)]
pub struct HistoryAggregator {
    records: Vec<HistoryRecord>,
    capacity: usize,
}

impl HistoryAggregator {
    pub fn new() -> Self {
        Self::with_capacity(HISTORY_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        HistoryAggregator {
            records: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Insert at the front; the oldest record is dropped once capacity is exceeded
    pub fn append(&mut self, record: HistoryRecord) {
        self.records.insert(0, record);
        self.records.truncate(self.capacity);
    }

    /// Borrow the current ordered sequence, most recent first
    pub fn snapshot(&self) -> &[HistoryRecord] {
        &self.records
    }

    /// Most recent record, if any
    pub fn latest(&self) -> Option<&HistoryRecord> {
        self.records.first()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Default for HistoryAggregator {
    fn default() -> Self {
        Self::new()
    }
}
