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

//! Client configuration for Stockdesk.
//!
//! Layout: `defaults.rs` (fallback values and environment keys), `model.rs`
//! (`ClientConfig` and its sparse `ConfigLayer`), `loader.rs` (file + environment
//! layering), `validate.rs` (range and format checks).

pub mod defaults;
pub mod error;
pub mod loader;
pub mod model;
pub mod validate;

pub use error::{ConfigError, ConfigResult};
pub use loader::{load, load_with, read_layer};
pub use model::{ClientConfig, ConfigLayer};
pub use validate::validate;
