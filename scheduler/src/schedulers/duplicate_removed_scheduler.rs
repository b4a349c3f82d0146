use std::collections::HashSet;

use crawl_frontier_core::async_trait;
use crawl_frontier_core::error::Result;
use crawl_frontier_core::request::Request;
use log::{debug, info};
use tokio::sync::RwLock;

use crate::duplicate_remover::{DuplicateRemover, HashSetDuplicateRemover};
use crate::scheduler_trait::{FrontierQueue, MonitorableScheduler, Scheduler};
use crate::schedulers::FifoQueue;
use crate::stats::RequestCounters;
use crate::types::SchedulerConfig;

/// Scheduler that filters requests through a duplicate index before handing
/// them to a queue strategy.
///
/// Pushed requests reach the queue only after the index accepts them, so an
/// identity is never pending twice unless a caller of [`Scheduler::load`]
/// hands in requests the index does not know about.
pub struct DuplicateRemovedScheduler<Q = FifoQueue, D = HashSetDuplicateRemover> {
    /// Pending-work storage
    queue: Q,

    /// Index of seen identities
    duplicate_remover: D,

    /// Held shared by pushes and exclusively by resets and loads
    frontier_guard: RwLock<()>,

    /// Completion counters reported by the crawl engine
    counters: RequestCounters,

    log_duplicates: bool,
}

/// The default frontier: FIFO dispatch with an in-memory duplicate index
pub type QueueDuplicateRemovedScheduler =
    DuplicateRemovedScheduler<FifoQueue, HashSetDuplicateRemover>;

impl DuplicateRemovedScheduler<FifoQueue, HashSetDuplicateRemover> {
    /// Create a new FIFO scheduler with an in-memory duplicate index
    pub fn new() -> Self {
        Self::with_config(&SchedulerConfig::default())
    }

    /// Create a new FIFO scheduler from configuration
    pub fn with_config(config: &SchedulerConfig) -> Self {
        let mut scheduler = Self::with_components(
            FifoQueue::with_capacity(config.initial_capacity),
            HashSetDuplicateRemover::with_capacity(config.initial_capacity),
        );
        scheduler.log_duplicates = config.log_duplicates;
        scheduler
    }
}

impl Default for DuplicateRemovedScheduler<FifoQueue, HashSetDuplicateRemover> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Q, D> DuplicateRemovedScheduler<Q, D>
where
    Q: FrontierQueue,
    D: DuplicateRemover,
{
    /// Compose a scheduler from any queue strategy and duplicate index
    pub fn with_components(queue: Q, duplicate_remover: D) -> Self {
        Self {
            queue,
            duplicate_remover,
            frontier_guard: RwLock::new(()),
            counters: RequestCounters::new(),
            log_duplicates: false,
        }
    }

    /// Log dropped duplicates at debug level
    pub fn with_duplicate_logging(mut self, enabled: bool) -> Self {
        self.log_duplicates = enabled;
        self
    }

    /// The duplicate index this scheduler consults
    pub fn duplicate_remover(&self) -> &D {
        &self.duplicate_remover
    }
}

#[async_trait]
impl<Q, D> Scheduler for DuplicateRemovedScheduler<Q, D>
where
    Q: FrontierQueue,
    D: DuplicateRemover,
{
    async fn push(&self, request: Request) -> Result<()> {
        let _guard = self.frontier_guard.read().await;

        if !self.duplicate_remover.is_new_and_record(&request) {
            if self.log_duplicates {
                debug!("Dropping duplicate request: {} {}", request.method, request.url);
            }
            return Ok(());
        }

        self.queue.push_when_no_duplicate(request).await
    }

    async fn poll(&self) -> Option<Request> {
        self.queue.poll().await
    }

    async fn len(&self) -> usize {
        self.queue.len().await
    }

    async fn reset_duplicate_check(&self) -> Result<()> {
        let _guard = self.frontier_guard.write().await;

        self.duplicate_remover.clear();
        self.queue.clear().await?;

        info!("Frontier reset: duplicate index and pending queue cleared");
        Ok(())
    }

    async fn load(&self, requests: HashSet<Request>) -> Result<()> {
        let _guard = self.frontier_guard.write().await;

        let count = requests.len();
        self.queue.replace_all(requests).await?;

        info!("Loaded {} requests into the frontier", count);
        Ok(())
    }

    async fn to_snapshot(&self) -> HashSet<Request> {
        self.queue.snapshot().await
    }
}

#[async_trait]
impl<Q, D> MonitorableScheduler for DuplicateRemovedScheduler<Q, D>
where
    Q: FrontierQueue,
    D: DuplicateRemover,
{
    async fn pending_count(&self) -> u64 {
        self.queue.len().await as u64
    }

    fn total_accepted_count(&self) -> u64 {
        self.duplicate_remover.count()
    }

    fn success_count(&self) -> u64 {
        self.counters.success()
    }

    fn error_count(&self) -> u64 {
        self.counters.error()
    }

    fn notify_success(&self) {
        self.counters.record_success();
    }

    fn notify_error(&self) {
        self.counters.record_error();
    }

    fn reset_counters(&self) {
        self.counters.reset();
    }
}
