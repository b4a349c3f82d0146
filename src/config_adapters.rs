use crate::settings::{Result, Settings, SettingsError};
use crawl_frontier_scheduler::SchedulerConfig;

/// Build a scheduler configuration from settings, falling back to defaults
pub fn scheduler_config_from_settings(settings: &Settings) -> Result<SchedulerConfig> {
    let defaults = SchedulerConfig::default();

    let initial_capacity = match settings.get::<usize>("SCHEDULER_INITIAL_CAPACITY") {
        Ok(capacity) => capacity,
        Err(SettingsError::SettingNotFound(_)) => defaults.initial_capacity,
        Err(e) => return Err(e),
    };

    Ok(SchedulerConfig {
        initial_capacity,
        log_duplicates: settings.get_or("SCHEDULER_LOG_DUPLICATES", defaults.log_duplicates),
    })
}
