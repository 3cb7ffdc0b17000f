use crate::config::types::{Config, CrawlConfig, DownloadConfig, HttpConfig, TargetConfig};
use crate::url::is_same_site;
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawl_config(&config.crawl)?;
    validate_target_config(&config.target)?;
    validate_http_config(&config.http)?;
    validate_download_config(&config.download)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates crawl configuration
fn validate_crawl_config(config: &CrawlConfig) -> Result<(), ConfigError> {
    // max_depth >= 0 is always true for u32, so no check needed

    if config.fan_out_cap < 1 {
        return Err(ConfigError::Validation(format!(
            "fan_out_cap must be >= 1, got {}",
            config.fan_out_cap
        )));
    }

    Ok(())
}

/// Validates the target site configuration
///
/// The seed URL must be a well-formed http(s) URL whose host belongs to the
/// configured target domain; a crawl seeded off-site would discover nothing.
fn validate_target_config(config: &TargetConfig) -> Result<(), ConfigError> {
    validate_domain_string(&config.domain)?;

    let seed = Url::parse(&config.seed)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid seed URL '{}': {}", config.seed, e)))?;

    if seed.scheme() != "http" && seed.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "Seed URL '{}' must use the http or https scheme",
            config.seed
        )));
    }

    let host = seed
        .host_str()
        .ok_or_else(|| ConfigError::InvalidUrl(format!("Seed URL '{}' has no host", config.seed)))?;

    if !is_same_site(host, &config.domain) {
        return Err(ConfigError::Validation(format!(
            "Seed URL host '{}' is not on the target domain '{}'",
            host, config.domain
        )));
    }

    Ok(())
}

/// Validates HTTP client configuration
fn validate_http_config(config: &HttpConfig) -> Result<(), ConfigError> {
    if config.user_agent.is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    if config.request_timeout < 1 {
        return Err(ConfigError::Validation(format!(
            "request_timeout must be >= 1 second, got {}",
            config.request_timeout
        )));
    }

    if config.connect_timeout < 1 {
        return Err(ConfigError::Validation(format!(
            "connect_timeout must be >= 1 second, got {}",
            config.connect_timeout
        )));
    }

    Ok(())
}

/// Validates download stage configuration
fn validate_download_config(config: &DownloadConfig) -> Result<(), ConfigError> {
    if config.output_dir.is_empty() {
        return Err(ConfigError::Validation(
            "output_dir cannot be empty".to_string(),
        ));
    }

    if config.max_concurrent < 1 || config.max_concurrent > 32 {
        return Err(ConfigError::Validation(format!(
            "max_concurrent must be between 1 and 32, got {}",
            config.max_concurrent
        )));
    }

    if let Some(session_url) = &config.session_url {
        let url = Url::parse(session_url).map_err(|e| {
            ConfigError::InvalidUrl(format!("Invalid session URL '{}': {}", session_url, e))
        })?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ConfigError::Validation(format!(
                "Session URL '{}' must use the http or https scheme",
                session_url
            )));
        }
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &crate::config::types::OutputConfig) -> Result<(), ConfigError> {
    if config.state_path.is_empty() {
        return Err(ConfigError::Validation(
            "state_path cannot be empty".to_string(),
        ));
    }

    if config.manifest_path.is_empty() {
        return Err(ConfigError::Validation(
            "manifest_path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates a domain string
fn validate_domain_string(domain: &str) -> Result<(), ConfigError> {
    if domain.is_empty() {
        return Err(ConfigError::Validation(
            "Target domain cannot be empty".to_string(),
        ));
    }

    if !domain
        .chars()
        .all(|c| c.is_alphanumeric() || c == '.' || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "Target domain '{}' contains invalid characters",
            domain
        )));
    }

    if domain.starts_with('.')
        || domain.ends_with('.')
        || domain.starts_with('-')
        || domain.ends_with('-')
    {
        return Err(ConfigError::Validation(format!(
            "Target domain '{}' cannot start or end with '.' or '-'",
            domain
        )));
    }

    if domain.contains("..") {
        return Err(ConfigError::Validation(format!(
            "Target domain '{}' cannot contain consecutive dots",
            domain
        )));
    }

    Ok(())
}
