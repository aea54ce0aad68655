//! Layered loading: defaults, then an optional JSON file, then the environment.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::defaults::{
    ENV_ALERT_DURATION_MS, ENV_API_URL, ENV_CONFIG_FILE, ENV_HTTP_TIMEOUT_SECS, ENV_LOG_LEVEL,
    ENV_PER_PAGE, ENV_SESSION_FILE,
};
use crate::error::{ConfigError, ConfigResult};
use crate::model::{ClientConfig, ConfigLayer};
use crate::validate::{parse_number, validate};

/// Load configuration from the process environment.
///
/// # Errors
///
/// Returns an error when the configuration file cannot be read or parsed, or when
/// any resulting field fails validation.
pub fn load() -> ConfigResult<ClientConfig> {
    load_with(|key| std::env::var(key).ok())
}

/// Load configuration using `lookup` in place of the process environment.
///
/// # Errors
///
/// Same as [`load`].
pub fn load_with<F>(lookup: F) -> ConfigResult<ClientConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = ClientConfig::default();
    if let Some(path) = lookup(ENV_CONFIG_FILE).filter(|path| !path.trim().is_empty()) {
        config.merge(read_layer(Path::new(&path))?);
    }
    config.merge(env_layer(&lookup)?);
    validate(&config)?;
    debug!(api_url = %config.api_url, per_page = config.per_page, "configuration loaded");
    Ok(config)
}

/// Read a sparse configuration layer from a JSON document.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] or [`ConfigError::Parse`].
pub fn read_layer(path: &Path) -> ConfigResult<ConfigLayer> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn env_layer<F>(lookup: &F) -> ConfigResult<ConfigLayer>
where
    F: Fn(&str) -> Option<String>,
{
    let value = |key: &str| lookup(key).filter(|raw| !raw.trim().is_empty());
    Ok(ConfigLayer {
        api_url: value(ENV_API_URL),
        session_file: value(ENV_SESSION_FILE).map(PathBuf::from),
        alert_duration_ms: value(ENV_ALERT_DURATION_MS)
            .map(|raw| parse_number("alert_duration_ms", &raw))
            .transpose()?,
        per_page: value(ENV_PER_PAGE)
            .map(|raw| parse_number("per_page", &raw))
            .transpose()?,
        http_timeout_secs: value(ENV_HTTP_TIMEOUT_SECS)
            .map(|raw| parse_number("http_timeout_secs", &raw))
            .transpose()?,
        log_level: value(ENV_LOG_LEVEL),
    })
}
