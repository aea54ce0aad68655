//! Command handlers, one module per resource family.

pub(crate) mod activity;
pub(crate) mod auth;
pub(crate) mod ledger;
pub(crate) mod matrix;
pub(crate) mod navigation;
pub(crate) mod resources;

use std::fs;
use std::path::Path;

use anyhow::anyhow;
use serde::de::DeserializeOwned;

use crate::client::{CliError, CliResult};

/// Read and decode a JSON document supplied with `--file`.
pub(crate) fn read_json_file<T: DeserializeOwned>(path: &Path) -> CliResult<T> {
    let raw = fs::read_to_string(path).map_err(|err| {
        CliError::failure(anyhow!("failed to read '{}': {err}", path.display()))
    })?;
    serde_json::from_str(&raw).map_err(|err| {
        CliError::validation(format!("'{}' is not a valid document: {err}", path.display()))
    })
}
