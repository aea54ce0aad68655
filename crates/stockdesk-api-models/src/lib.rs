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
//! Shared HTTP DTOs for the Stockdesk admin API.
//!
//! These types are re-used by the client, the UI stores and the CLI so the wire
//! contract lives in one place. Layout: `envelope.rs` (response envelopes and list
//! normalization), `catalog.rs`, `directory.rs`, `access.rs`, `ledger.rs` and
//! `activity.rs` (resource rows and their create forms), `validate.rs` (field
//! rules shared by every form).

pub mod access;
pub mod activity;
pub mod catalog;
pub mod directory;
pub mod envelope;
pub mod ledger;
pub mod validate;

pub use access::{
    LoginData, LoginForm, LoginResponse, NewPermission, NewRole, NewUser, Permission, Role,
    RoleWithPermissions, SessionUser, User,
};
pub use activity::{
    AuditLog, AuditLogDetails, DashboardStats, Notification, NotificationDetail, PaymentStat,
    ProductStat, TransactionStat,
};
pub use catalog::{Category, NewCategory, NewProduct, NewProductInventory, Product, ProductInventory};
pub use directory::{Collector, Debtor, NewDebtor, NewSupplier, Supplier};
pub use envelope::{
    ApiEnvelope, DEFAULT_PER_PAGE, ListPage, ListPayload, MessageEnvelope, PageInfo, PageMeta,
    PageRequest, Pagination, PlainList,
};
pub use ledger::{
    InventoryUnit, NewPayment, NewRunner, NewTransaction, NewTransactionItem, Payment,
    PaymentSummary, PaymentTransaction, Transaction, TransactionItem, TransactionParty,
    UpdatePaymentStatus,
};
pub use validate::{FieldError, FormErrors, Validate};
