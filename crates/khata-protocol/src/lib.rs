//! Due-ledger transaction protocol for khata.
//!
//! This crate orchestrates the other khata crates into the user-facing
//! operations: record a transaction, register a customer, delete a log
//! entry, delete a customer. Each operation mutates two independent
//! aggregates (the customer's due ledger and the shared cash drawer) in a
//! strict awaited sequence, with a compensating action when the second
//! persistence step fails so the two ledgers cannot silently diverge.
//!
//! Residual divergence (compensation itself failed, or an external writer
//! interfered) is a detectable state: [`Reconciler`] audits both ledgers
//! against each other and can repair what it finds.

pub mod error;
pub mod notify;
pub mod protocol;
pub mod reconcile;
pub mod session;

pub use error::{ProtocolError, ValidationError};
pub use notify::{NotificationSink, NullSink, Severity, TracingSink};
pub use protocol::{DueProtocol, NewCustomer};
pub use reconcile::{
    Discrepancy, DiscrepancyKind, ReconcileReport, Reconciler, RepairSummary,
};
pub use session::Session;
