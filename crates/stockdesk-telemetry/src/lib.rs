#![forbid(unsafe_code)]
#![deny(
    unused_must_use,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls
)]
#![warn(missing_docs)]

//! Logging primitives shared across the Stockdesk workspace.
//!
//! Layout: `init.rs` (subscriber installation and format selection), `context.rs`
//! (command and store-action spans), `error.rs` (telemetry errors).

pub mod context;
pub mod error;
pub mod init;

pub use context::{CommandContextGuard, action_span, record_user};
pub use error::{Result, TelemetryError};
pub use init::{DEFAULT_LOG_LEVEL, LogFormat, LoggingConfig, build_sha, init_logging};
