//! One module per backend resource family.
pub mod access;
pub mod audit_logs;
pub mod auth;
pub mod catalog;
pub mod dashboard;
pub mod directory;
pub mod ledger;
pub mod notifications;
pub mod permission_matrix;
