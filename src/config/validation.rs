use crate::config::types::{Config, CrawlerConfig, HostConfig, OutputConfig, ScopeConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_host_config(&config.host)?;
    validate_crawler_config(&config.crawler)?;
    validate_scope_config(&config.scope)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates the documentation host configuration
fn validate_host_config(config: &HostConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base-url: {}", e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "base-url must be HTTP or HTTPS, got '{}'",
            url.scheme()
        )));
    }

    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.request_delay_ms > 60_000 {
        return Err(ConfigError::Validation(format!(
            "request_delay_ms must be <= 60000ms, got {}ms",
            config.request_delay_ms
        )));
    }

    if config.request_timeout_secs < 1 {
        return Err(ConfigError::Validation(
            "request_timeout_secs must be >= 1".to_string(),
        ));
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates link scope configuration
fn validate_scope_config(config: &ScopeConfig) -> Result<(), ConfigError> {
    for marker in &config.skip_url_markers {
        if marker.trim().is_empty() {
            return Err(ConfigError::Validation(
                "skip_url_markers entries cannot be empty".to_string(),
            ));
        }
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.downloads_dir.is_empty() {
        return Err(ConfigError::Validation(
            "downloads_dir cannot be empty".to_string(),
        ));
    }

    Ok(())
}
