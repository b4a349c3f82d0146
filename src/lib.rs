//! # Crawl Frontier
//!
//! An in-memory request frontier for crawlers: newly discovered requests are
//! filtered against a duplicate index, held in a FIFO queue, and handed out
//! one at a time to any number of concurrent workers.
//!
//! ## Components
//!
//! - **Core**: the `Request` type and shared error types.
//! - **Scheduler**: the duplicate index, queue strategies and the
//!   deduplicating scheduler with its monitoring counters.
//! - **Settings**: configuration loading for the scheduler and the CLI.
//!
//! ## Example
//!
//! ```rust,no_run
//! use crawl_frontier::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     env_logger::init();
//!
//!     let scheduler = create_scheduler(&SchedulerConfig::default());
//!     scheduler.push(Request::get("https://example.com")?).await?;
//!     scheduler.push(Request::get("https://example.com")?).await?;
//!
//!     while let Some(request) = scheduler.poll().await {
//!         println!("Fetching {}", request.url);
//!         scheduler.notify_success();
//!     }
//!
//!     println!("Unique requests: {}", scheduler.total_accepted_count());
//!     Ok(())
//! }
//! ```

pub use crawl_frontier_core as core;
pub use crawl_frontier_scheduler as scheduler;

// Settings module for configuration management
pub mod settings;

// Config adapters module
pub mod config_adapters;

/// Prelude module that re-exports commonly used types
pub mod prelude {
    pub use crawl_frontier_core::error::{Error, Result};
    pub use crawl_frontier_core::request::{Method, Request};
    pub use crawl_frontier_scheduler::{
        create_scheduler, DuplicateRemovedScheduler, DuplicateRemover, FifoQueue, FrontierQueue,
        HashSetDuplicateRemover, MonitorableScheduler, QueueDuplicateRemovedScheduler, Scheduler,
        SchedulerConfig, SchedulerStats,
    };

    pub use crate::config_adapters::scheduler_config_from_settings;
    pub use crate::settings::{Settings, SettingsError, SettingsFormat};
}
