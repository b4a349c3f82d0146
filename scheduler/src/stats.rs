// Frontier counters and their serializable snapshot

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Statistics for a monitorable scheduler
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulerStats {
    /// Number of requests waiting to be polled
    pub pending: u64,

    /// Number of unique requests ever accepted
    pub total_accepted: u64,

    /// Number of requests reported as successful
    pub success: u64,

    /// Number of requests reported as failed
    pub error: u64,
}

impl SchedulerStats {
    /// Number of requests reported as finished, either way
    pub fn completed(&self) -> u64 {
        self.success + self.error
    }

    /// Share of finished requests that failed
    pub fn error_rate(&self) -> Option<f64> {
        let completed = self.completed();
        if completed == 0 {
            None
        } else {
            Some(self.error as f64 / completed as f64)
        }
    }
}

/// Lock-free success/error counters
#[derive(Debug, Default)]
pub struct RequestCounters {
    success: AtomicU64,
    error: AtomicU64,
}

impl RequestCounters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_success(&self) {
        self.success.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_error(&self) {
        self.error.fetch_add(1, Ordering::Relaxed);
    }

    pub fn success(&self) -> u64 {
        self.success.load(Ordering::Relaxed)
    }

    pub fn error(&self) -> u64 {
        self.error.load(Ordering::Relaxed)
    }

    pub fn reset(&self) {
        self.success.store(0, Ordering::Relaxed);
        self.error.store(0, Ordering::Relaxed);
    }
}
