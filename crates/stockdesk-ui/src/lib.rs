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
//! State layer of the Stockdesk admin panel.
//!
//! Stores own list state for one resource and drive the shared alert slot; the
//! rendering layer reads them and calls their actions. Layout: `core/` (generic
//! store, capability traits, outcomes, optimistic helper), `features/` (one module
//! per resource family), `navigation.rs` (menu trees).

pub mod core;
pub mod features;
pub mod navigation;

pub use crate::core::optimistic::optimistic;
pub use crate::core::outcome::{ActionOutcome, FALLBACK_ERROR, failure_text, report_failure};
pub use crate::core::resource::{
    ActiveListing, Creatable, Listable, Mutable, Resource, SoftDeletable,
    StatusToggle, Updatable, endpoint,
};
pub use crate::core::store::ResourceStore;
pub use features::access::{PermissionStore, RoleStore, UserStore};
pub use features::audit_logs::{AuditLogFilter, AuditLogStore};
pub use features::auth::AuthStore;
pub use features::catalog::{CategoryStore, ProductInventoryStore, ProductStore};
pub use features::dashboard::DashboardStore;
pub use features::directory::{CollectorStore, DebtorStore, SupplierStore};
pub use features::ledger::{PaymentStore, TransactionStore};
pub use features::notifications::NotificationStore;
pub use features::permission_matrix::{Grants, PermissionMatrix};
pub use navigation::{HORIZONTAL, NavIcon, NavItem, NavLink, VERTICAL, title_for};
