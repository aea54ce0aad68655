//! Debtors, suppliers and payment collectors.

use stockdesk_api_models::{Collector, Debtor, NewDebtor, NewSupplier, Supplier};

use crate::core::resource::{
    ActiveListing, Creatable, Listable, Mutable, Resource, SoftDeletable,
    StatusToggle, Updatable,
};
use crate::core::store::ResourceStore;

/// Debtor list and actions.
pub type DebtorStore = ResourceStore<Debtor>;
/// Supplier list and actions.
pub type SupplierStore = ResourceStore<Supplier>;
/// Active collectors; only `fetch_active` is available.
pub type CollectorStore = ResourceStore<Collector>;

impl Resource for Debtor {
    const PATH: &'static str = "debtors";
}

impl Listable for Debtor {}

impl Mutable for Debtor {
    const ID_FIELD: &'static str = "debtor_uuid";
}

impl Creatable for Debtor {
    type Draft = NewDebtor;
    const CREATE_LABEL: &'static str = "Create New Debtor";
}

impl Updatable for Debtor {
    const UPDATE_LABEL: &'static str = "Update Debtor Details";
}

impl SoftDeletable for Debtor {
    const DELETE_LABEL: &'static str = "Delete Debtor";
    const RESTORE_LABEL: &'static str = "Restore Debtor";
}

impl StatusToggle for Debtor {
    const ACTIVATE_LABEL: &'static str = "Activate Debtor";
    const DEACTIVATE_LABEL: &'static str = "Deactivate Debtor";
}

impl Resource for Supplier {
    const PATH: &'static str = "suppliers";
}

impl Listable for Supplier {}

impl Mutable for Supplier {
    const ID_FIELD: &'static str = "supplier_uuid";
}

impl Creatable for Supplier {
    type Draft = NewSupplier;
    const CREATE_LABEL: &'static str = "Create Supplier";
}

impl Updatable for Supplier {
    const UPDATE_LABEL: &'static str = "Update Supplier";
}

impl SoftDeletable for Supplier {
    const DELETE_LABEL: &'static str = "Delete Supplier";
    const RESTORE_LABEL: &'static str = "Restore Supplier";
}

impl StatusToggle for Supplier {
    const ACTIVATE_LABEL: &'static str = "Activate Supplier";
    const DEACTIVATE_LABEL: &'static str = "Deactivate Supplier";
}

impl Resource for Collector {
    const PATH: &'static str = "collectors";
}

impl ActiveListing for Collector {}
