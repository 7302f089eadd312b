//! Foundation types for khata.
//!
//! This crate provides the identifier, money, and transaction-kind types used
//! throughout the khata system. Every other khata crate depends on
//! `khata-types`.
//!
//! # Key Types
//!
//! - [`CustomerId`] / [`LogId`] / [`EntryId`] — time-ordered UUID v7 identifiers
//! - [`Money`] — exact decimal currency amount
//! - [`LogKind`] — `Due` (debt increase) or `Add` (payment received)
//! - [`CashDirection`] — movement recorded in the shared cash drawer

pub mod error;
pub mod id;
pub mod kind;
pub mod money;
pub mod temporal;

pub use error::TypeError;
pub use id::{CustomerId, EntryId, LogId};
pub use kind::{CashDirection, LogKind};
pub use money::Money;
pub use temporal::{today, wall_clock_hm};
