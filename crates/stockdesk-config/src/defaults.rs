//! Default values applied before any file or environment layer.
//!
//! # Design
//! - Keep every fallback in one place so the loader and the CLI help agree.

/// Backend origin plus the default `/api` base path.
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:3333/api";
/// How long an alert stays visible before it dismisses itself.
pub const DEFAULT_ALERT_DURATION_MS: u64 = 3_000;
/// Rows requested per page when a store has not been told otherwise.
pub const DEFAULT_PER_PAGE: u32 = 10;
/// Upper bound for a single HTTP exchange.
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;
/// Log level used when neither `RUST_LOG` nor configuration sets one.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable naming an optional JSON configuration file.
pub const ENV_CONFIG_FILE: &str = "STOCKDESK_CONFIG";
/// Environment override for the API base URL.
pub const ENV_API_URL: &str = "STOCKDESK_API_URL";
/// Environment override for the persisted session document.
pub const ENV_SESSION_FILE: &str = "STOCKDESK_SESSION_FILE";
/// Environment override for the alert duration.
pub const ENV_ALERT_DURATION_MS: &str = "STOCKDESK_ALERT_DURATION_MS";
/// Environment override for the default page size.
pub const ENV_PER_PAGE: &str = "STOCKDESK_PER_PAGE";
/// Environment override for the HTTP timeout.
pub const ENV_HTTP_TIMEOUT_SECS: &str = "STOCKDESK_HTTP_TIMEOUT_SECS";
/// Environment override for the log level.
pub const ENV_LOG_LEVEL: &str = "STOCKDESK_LOG_LEVEL";

pub(crate) const MAX_PER_PAGE: u32 = 500;
pub(crate) const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
