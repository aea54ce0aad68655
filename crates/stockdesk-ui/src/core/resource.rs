//! Capabilities a backend resource can opt into.
//!
//! # Design
//! - `Resource` names the endpoint family; the other traits unlock store actions.
//! - Endpoint suffixes are constants so irregular backends are a one-line override.
//! - Each capability carries the toast titles of the actions it unlocks.

use serde::Serialize;
use serde::de::DeserializeOwned;
use stockdesk_api_models::Validate;

/// Row type served under one endpoint family.
pub trait Resource: DeserializeOwned + Serialize + Clone + Send + Sync + 'static {
    /// Endpoint family relative to the API base (`categories`).
    const PATH: &'static str;
}

/// Resource with a list endpoint at [`Resource::PATH`].
pub trait Listable: Resource {
    /// `true` for `{page, per_page}` lists, `false` for plain arrays.
    const PAGINATED: bool = true;
}

/// Resource whose active rows are listed at `{PATH}/active`.
pub trait ActiveListing: Resource {}

/// Resource identified by a key field and mutated through the generic actions.
pub trait Mutable: Listable {
    /// Key field sent in delete/restore/status bodies.
    const ID_FIELD: &'static str;
}

/// Resource created from a validated draft posted to `{PATH}/create`.
pub trait Creatable: Mutable {
    /// Create form.
    type Draft: Serialize + Validate + Send + Sync;
    /// Title of the create toast.
    const CREATE_LABEL: &'static str;
}

/// Resource updated by sending the whole row.
pub trait Updatable: Mutable {
    /// Update endpoint suffix.
    const UPDATE_ENDPOINT: &'static str = "update";
    /// Title of the update toast.
    const UPDATE_LABEL: &'static str;
}

/// Resource soft-deleted via `{PATH}/delete` and restored via `{PATH}/restore`.
pub trait SoftDeletable: Mutable {
    /// Title of the delete toast.
    const DELETE_LABEL: &'static str;
    /// Title of the restore toast.
    const RESTORE_LABEL: &'static str;
}

/// Resource toggled active/inactive through a status endpoint.
pub trait StatusToggle: Mutable {
    /// Status endpoint suffix.
    const STATUS_ENDPOINT: &'static str = "updateStatus";
    /// Body field carrying `1`/`0`.
    const STATUS_FIELD: &'static str = "active";
    /// Title of the activate toast.
    const ACTIVATE_LABEL: &'static str;
    /// Title of the deactivate toast.
    const DEACTIVATE_LABEL: &'static str;
}

/// `{PATH}/{suffix}`.
#[must_use]
pub fn endpoint<R: Resource>(suffix: &str) -> String {
    format!("{}/{suffix}", R::PATH)
}
