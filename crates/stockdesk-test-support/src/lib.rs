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

//! Shared test helpers used across the Stockdesk crates.
//! Layout: envelopes.rs (backend reply builders), fixtures.rs (config and clock helpers).

pub mod envelopes;
pub mod fixtures;

pub use envelopes::{
    failure, login_success, paged_record, paged_tuple, session_user, success, success_message,
};
pub use fixtures::{API_PREFIX, api_path, config_for, expired_at, valid_until};
