use std::collections::HashSet;

use crawl_frontier_core::async_trait;
use crawl_frontier_core::error::Result;
use crawl_frontier_core::request::Request;

use crate::stats::SchedulerStats;

/// Trait for request schedulers
#[async_trait]
pub trait Scheduler: Send + Sync + 'static {
    /// Add a request to the scheduler, silently dropping duplicates
    async fn push(&self, request: Request) -> Result<()>;

    /// Get the next request, or `None` when no work is pending
    async fn poll(&self) -> Option<Request>;

    /// Get the number of pending requests
    async fn len(&self) -> usize;

    /// Check if the scheduler is empty
    async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Forget every seen identity and drop all pending requests
    async fn reset_duplicate_check(&self) -> Result<()>;

    /// Replace the pending requests with `requests`.
    ///
    /// Loaded requests bypass the duplicate check; keeping the index
    /// consistent with them is up to the caller.
    async fn load(&self, requests: HashSet<Request>) -> Result<()>;

    /// Copy of the pending requests
    async fn to_snapshot(&self) -> HashSet<Request>;
}

/// Scheduler that exposes counters for telemetry
#[async_trait]
pub trait MonitorableScheduler: Scheduler {
    /// Number of requests waiting to be polled, read under the queue lock
    async fn pending_count(&self) -> u64;

    /// Number of unique requests ever accepted
    fn total_accepted_count(&self) -> u64;

    /// Number of requests the crawl engine reported as successful
    fn success_count(&self) -> u64;

    /// Number of requests the crawl engine reported as failed
    fn error_count(&self) -> u64;

    /// Record one successfully completed request
    fn notify_success(&self);

    /// Record one failed request
    fn notify_error(&self);

    /// Zero the success and error counters
    fn reset_counters(&self);

    /// Point-in-time view of all counters
    async fn stats(&self) -> SchedulerStats {
        SchedulerStats {
            pending: self.pending_count().await,
            total_accepted: self.total_accepted_count(),
            success: self.success_count(),
            error: self.error_count(),
        }
    }
}

/// Pending-work storage behind a deduplicating scheduler.
///
/// Implementations only see requests that already passed the duplicate
/// check. Every operation that reads or changes the contents must go through
/// the same lock.
#[async_trait]
pub trait FrontierQueue: Send + Sync + 'static {
    /// Store a request that passed the duplicate check
    async fn push_when_no_duplicate(&self, request: Request) -> Result<()>;

    /// Remove and return the next request
    async fn poll(&self) -> Option<Request>;

    /// Number of stored requests
    async fn len(&self) -> usize;

    /// Drop every stored request
    async fn clear(&self) -> Result<()>;

    /// Discard the current contents and store `requests` instead
    async fn replace_all(&self, requests: HashSet<Request>) -> Result<()>;

    /// Copy of the stored requests
    async fn snapshot(&self) -> HashSet<Request>;
}
