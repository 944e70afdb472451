use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - At least one fetch worker
/// - Non-empty result buffer
/// - Source base URL is set
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.tracker.worker_count == 0 {
        return Err(ConfigError::ValidationError(
            "tracker.worker_count must be at least 1".to_string(),
        ));
    }

    if config.tracker.result_buffer == 0 {
        return Err(ConfigError::ValidationError(
            "tracker.result_buffer must be at least 1".to_string(),
        ));
    }

    if config.source.base_url.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "source.base_url cannot be empty".to_string(),
        ));
    }

    Ok(())
}
