use std::sync::atomic::{AtomicU64, Ordering};

/// Thread-safe counters describing store mutations.
#[derive(Default)]
pub struct StoreMetrics {
    records_created: AtomicU64,
    records_updated: AtomicU64,
    records_deleted: AtomicU64,
}

impl StoreMetrics {
    /// Create an empty metrics accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a successful create.
    pub fn record_created(&self) {
        self.records_created.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a successful update.
    pub fn record_updated(&self) {
        self.records_updated.fetch_add(1, Ordering::Relaxed);
    }

    /// Record the number of records removed by a delete call.
    pub fn record_deleted(&self, removed: u64) {
        self.records_deleted.fetch_add(removed, Ordering::Relaxed);
    }

    /// Return a snapshot of the current counters alongside the live record count.
    pub fn snapshot(&self, records_live: u64) -> MetricsSnapshot {
        MetricsSnapshot {
            records_created: self.records_created.load(Ordering::Relaxed),
            records_updated: self.records_updated.load(Ordering::Relaxed),
            records_deleted: self.records_deleted.load(Ordering::Relaxed),
            records_live,
        }
    }
}

/// Immutable view of store counters used for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct MetricsSnapshot {
    /// Records created since startup.
    pub records_created: u64,
    /// Successful updates since startup.
    pub records_updated: u64,
    /// Records removed since startup.
    pub records_deleted: u64,
    /// Records currently held by the store.
    pub records_live: u64,
}
