//! Typed configuration model and the partial layer read from disk.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::defaults::{
    DEFAULT_ALERT_DURATION_MS, DEFAULT_API_URL, DEFAULT_HTTP_TIMEOUT_SECS, DEFAULT_LOG_LEVEL,
    DEFAULT_PER_PAGE,
};

/// Effective client configuration after every layer has been applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Backend base URL including the API path prefix.
    pub api_url: String,
    /// Where the session is mirrored between runs; `None` keeps it in memory.
    pub session_file: Option<PathBuf>,
    /// Alert auto-dismiss delay in milliseconds.
    pub alert_duration_ms: u64,
    /// Default rows per page for paginated stores.
    pub per_page: u32,
    /// Upper bound for a single HTTP exchange, in seconds.
    pub http_timeout_secs: u64,
    /// Log level directive handed to the subscriber.
    pub log_level: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            session_file: None,
            alert_duration_ms: DEFAULT_ALERT_DURATION_MS,
            per_page: DEFAULT_PER_PAGE,
            http_timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl ClientConfig {
    /// Alert duration as a [`Duration`].
    #[must_use]
    pub const fn alert_duration(&self) -> Duration {
        Duration::from_millis(self.alert_duration_ms)
    }

    /// HTTP timeout as a [`Duration`].
    #[must_use]
    pub const fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    pub(crate) fn merge(&mut self, layer: ConfigLayer) {
        if let Some(api_url) = layer.api_url {
            self.api_url = api_url;
        }
        if let Some(session_file) = layer.session_file {
            self.session_file = Some(session_file);
        }
        if let Some(alert_duration_ms) = layer.alert_duration_ms {
            self.alert_duration_ms = alert_duration_ms;
        }
        if let Some(per_page) = layer.per_page {
            self.per_page = per_page;
        }
        if let Some(http_timeout_secs) = layer.http_timeout_secs {
            self.http_timeout_secs = http_timeout_secs;
        }
        if let Some(log_level) = layer.log_level {
            self.log_level = log_level;
        }
    }
}

/// Sparse overrides; every member is optional so layers compose.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigLayer {
    /// Backend base URL.
    pub api_url: Option<String>,
    /// Persisted session document.
    pub session_file: Option<PathBuf>,
    /// Alert auto-dismiss delay in milliseconds.
    pub alert_duration_ms: Option<u64>,
    /// Default rows per page.
    pub per_page: Option<u32>,
    /// HTTP timeout in seconds.
    pub http_timeout_secs: Option<u64>,
    /// Log level directive.
    pub log_level: Option<String>,
}
