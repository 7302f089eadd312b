//! Core due-ledger logic for khata.
//!
//! This crate is the heart of khata. It provides:
//! - The immutable [`Log`] transaction record
//! - The [`DueLedger`] per-customer aggregate with cached totals that are
//!   recomputed together with every log mutation
//! - Deterministic balance replay over a log collection ([`balance`])
//! - Per-record invariant auditing ([`LedgerValidator`])

pub mod balance;
pub mod entry;
pub mod error;
pub mod ledger;
pub mod validation;

pub use balance::{closing, replay, statement, BalanceLine};
pub use entry::Log;
pub use error::LedgerError;
pub use ledger::{DueLedger, Totals};
pub use validation::{LedgerValidator, ValidationReport, Violation, ViolationKind};
