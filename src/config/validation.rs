use crate::config::types::{Config, FetchConfig, LinksConfig, ParserConfig};
use crate::ConfigError;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_fetch_config(&config.fetch)?;
    validate_links_config(&config.links)?;
    validate_parser_config(&config.parser)?;
    Ok(())
}

/// Validates page fetch configuration
fn validate_fetch_config(config: &FetchConfig) -> Result<(), ConfigError> {
    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "fetch timeout-secs must be >= 1, got {}",
            config.timeout_secs
        )));
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates link probing configuration
fn validate_links_config(config: &LinksConfig) -> Result<(), ConfigError> {
    if config.max_workers < 1 || config.max_workers > 100 {
        return Err(ConfigError::Validation(format!(
            "max-workers must be between 1 and 100, got {}",
            config.max_workers
        )));
    }

    if config.deadline_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "deadline-secs must be >= 1, got {}",
            config.deadline_secs
        )));
    }

    if config.probe_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "probe-timeout-secs must be >= 1, got {}",
            config.probe_timeout_secs
        )));
    }

    // A single probe can never outlive the shared deadline
    if config.probe_timeout_secs > config.deadline_secs {
        return Err(ConfigError::Validation(format!(
            "probe-timeout-secs ({}) cannot exceed deadline-secs ({})",
            config.probe_timeout_secs, config.deadline_secs
        )));
    }

    if config.max_redirects > 10 {
        return Err(ConfigError::Validation(format!(
            "max-redirects must be <= 10, got {}",
            config.max_redirects
        )));
    }

    Ok(())
}

/// Validates document parser configuration
fn validate_parser_config(config: &ParserConfig) -> Result<(), ConfigError> {
    if config.max_depth < 16 || config.max_depth > 10_000 {
        return Err(ConfigError::Validation(format!(
            "max-depth must be between 16 and 10000, got {}",
            config.max_depth
        )));
    }

    Ok(())
}
