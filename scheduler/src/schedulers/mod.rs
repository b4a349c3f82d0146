mod duplicate_removed_scheduler;
mod fifo_queue;

pub use duplicate_removed_scheduler::{DuplicateRemovedScheduler, QueueDuplicateRemovedScheduler};
pub use fifo_queue::FifoQueue;
