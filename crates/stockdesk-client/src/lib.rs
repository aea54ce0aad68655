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
#![allow(clippy::module_name_repetitions)]

//! Protocol layer for the Stockdesk admin panel.
//!
//! Layout: `api.rs` (authenticated JSON client and status classification),
//! `session.rs` (token store), `storage.rs` (persisted session keys), `alert.rs`
//! (single-slot toast channel), `navigator.rs` (redirect seam), `context.rs`
//! (wiring from configuration), `error.rs` (client and storage errors).

pub mod alert;
pub mod api;
pub mod context;
pub mod error;
pub mod navigator;
pub mod session;
pub mod storage;

pub use alert::{Alert, AlertChannel, AlertColor, AlertOptions, DEFAULT_ALERT_DURATION};
pub use api::{ApiClient, ERROR_TITLE, Upload, status_message};
pub use context::AppContext;
pub use error::{ClientError, ClientResult, StorageError};
pub use navigator::{DASHBOARD_ROUTE, Navigator, ROOT_ROUTE, RecordingNavigator};
pub use session::{Session, SessionStore, unix_now};
pub use storage::{
    ACCESS_TOKEN_KEY, EXPIRY_KEY, FileStorage, MemoryStorage, SessionStorage, USER_KEY,
};
