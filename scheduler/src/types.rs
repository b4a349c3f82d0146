use serde::{Deserialize, Serialize};

/// Configuration for schedulers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Capacity reserved up front for the queue and the duplicate index
    pub initial_capacity: usize,
    /// Log every dropped duplicate at debug level
    pub log_duplicates: bool,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            initial_capacity: 1024,
            log_duplicates: false,
        }
    }
}
