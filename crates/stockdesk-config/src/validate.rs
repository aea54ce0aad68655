//! Validation helpers and parsing utilities for configuration values.

use url::Url;

use crate::defaults::{LOG_LEVELS, MAX_PER_PAGE};
use crate::error::{ConfigError, ConfigResult};
use crate::model::ClientConfig;

/// Check every field of an assembled configuration.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidField`] for the first field that is out of range.
pub fn validate(config: &ClientConfig) -> ConfigResult<()> {
    let url = Url::parse(&config.api_url).map_err(|_| ConfigError::InvalidField {
        field: "api_url",
        value: Some(config.api_url.clone()),
        reason: "must be an absolute URL",
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidField {
            field: "api_url",
            value: Some(config.api_url.clone()),
            reason: "scheme must be http or https",
        });
    }
    if config.per_page == 0 || config.per_page > MAX_PER_PAGE {
        return Err(ConfigError::InvalidField {
            field: "per_page",
            value: Some(config.per_page.to_string()),
            reason: "must be between 1 and 500",
        });
    }
    if config.http_timeout_secs == 0 {
        return Err(ConfigError::InvalidField {
            field: "http_timeout_secs",
            value: Some(config.http_timeout_secs.to_string()),
            reason: "must be greater than zero",
        });
    }
    if !LOG_LEVELS.contains(&config.log_level.to_ascii_lowercase().as_str()) {
        return Err(ConfigError::InvalidField {
            field: "log_level",
            value: Some(config.log_level.clone()),
            reason: "must be one of trace, debug, info, warn, error",
        });
    }
    Ok(())
}

pub(crate) fn parse_number<T: std::str::FromStr>(
    field: &'static str,
    raw: &str,
) -> ConfigResult<T> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidField {
        field,
        value: Some(raw.to_string()),
        reason: "must be a non-negative integer",
    })
}
