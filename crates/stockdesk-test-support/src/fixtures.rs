//! Configuration and clock fixtures.

use httpmock::MockServer;
use stockdesk_config::ClientConfig;

/// Path prefix the fixtures mount the API under.
pub const API_PREFIX: &str = "/api";

/// Client configuration pointed at a mock server with an in-memory session.
#[must_use]
pub fn config_for(server: &MockServer) -> ClientConfig {
    ClientConfig {
        api_url: format!("{}{API_PREFIX}", server.base_url()),
        session_file: None,
        http_timeout_secs: 5,
        ..ClientConfig::default()
    }
}

/// Full request path for an endpoint relative to the API prefix.
#[must_use]
pub fn api_path(endpoint: &str) -> String {
    format!("{API_PREFIX}/{endpoint}")
}

/// Unix timestamp `seconds` in the future.
#[must_use]
pub fn valid_until(seconds: i64) -> i64 {
    chrono::Utc::now().timestamp() + seconds
}

/// Unix timestamp `seconds` in the past.
#[must_use]
pub fn expired_at(seconds: i64) -> i64 {
    chrono::Utc::now().timestamp() - seconds
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_path_joins_prefix() {
        assert_eq!(api_path("categories"), "/api/categories");
    }

    #[test]
    fn clock_helpers_straddle_now() {
        let now = chrono::Utc::now().timestamp();
        assert!(valid_until(60) > now);
        assert!(expired_at(60) < now);
    }

    #[test]
    fn config_targets_mock_server() {
        let server = MockServer::start();
        let config = config_for(&server);
        assert!(config.api_url.ends_with("/api"));
        assert!(config.session_file.is_none());
    }
}
