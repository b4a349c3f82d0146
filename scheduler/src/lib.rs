use std::sync::Arc;

pub mod duplicate_remover;
pub mod scheduler_trait;
pub mod schedulers;
pub mod stats;
pub mod types;

pub use duplicate_remover::{DuplicateRemover, HashSetDuplicateRemover};
pub use scheduler_trait::{FrontierQueue, MonitorableScheduler, Scheduler};
pub use schedulers::{DuplicateRemovedScheduler, FifoQueue, QueueDuplicateRemovedScheduler};
pub use stats::{RequestCounters, SchedulerStats};
pub use types::SchedulerConfig;

/// Create the default frontier scheduler from configuration
pub fn create_scheduler(config: &SchedulerConfig) -> Arc<QueueDuplicateRemovedScheduler> {
    Arc::new(QueueDuplicateRemovedScheduler::with_config(config))
}

#[cfg(test)]
mod tests;
