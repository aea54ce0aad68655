//! Error types for the API client.

use std::path::PathBuf;

use thiserror::Error;

/// Failures raised while talking to the backend.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The stored session expired before the request was sent.
    #[error("Token expired")]
    SessionExpired,
    /// The backend answered with a non-2xx status.
    #[error("{message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Classified user-facing message.
        message: String,
        /// Whether the message was already pushed to the alert channel.
        surfaced: bool,
    },
    /// The request never produced a response.
    #[error("request to {path} failed")]
    Transport {
        /// Endpoint path.
        path: String,
        /// Underlying transport error.
        source: reqwest::Error,
    },
    /// The response body did not match the expected shape.
    #[error("unexpected response from {path}")]
    Decode {
        /// Endpoint path.
        path: String,
        /// Underlying JSON error.
        source: serde_json::Error,
    },
    /// The endpoint could not be joined onto the base URL.
    #[error("invalid endpoint '{path}'")]
    InvalidPath {
        /// Endpoint path.
        path: String,
        /// Underlying URL error.
        source: url::ParseError,
    },
    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client")]
    Build {
        /// Underlying builder error.
        source: reqwest::Error,
    },
}

impl ClientError {
    /// Whether the alert channel has already shown this failure.
    #[must_use]
    pub const fn is_surfaced(&self) -> bool {
        matches!(self, Self::Status { surfaced: true, .. })
    }

    /// HTTP status for status failures.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Convenience alias for client results.
pub type ClientResult<T> = Result<T, ClientError>;

/// Failures reading or writing the persisted session document.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem access failed.
    #[error("session storage at {path} is unavailable")]
    Io {
        /// Backing file.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },
    /// Backing document was not a JSON object of strings.
    #[error("session storage at {path} is corrupt")]
    Corrupt {
        /// Backing file.
        path: PathBuf,
        /// Underlying JSON error.
        source: serde_json::Error,
    },
}
