//! Shared cash-drawer ledger for khata.
//!
//! The drawer is a separate, schema-free ledger of money movements. A due
//! transaction is paired with exactly one drawer entry, linked by the
//! reference tag embedded in the entry's free-text note; the drawer itself
//! knows nothing about due-ledger ids.
//!
//! This crate provides:
//! - The [`CashEntry`] record and [`RefTag`] wire format
//! - The [`CashDrawer`] store boundary
//! - [`InMemoryDrawer`] for tests and embedding
//! - [`JsonFileDrawer`] for local single-user persistence

pub mod entry;
pub mod error;
pub mod file;
pub mod memory;
pub mod tag;
pub mod traits;

pub use entry::{CashEntry, NewCashEntry};
pub use error::DrawerError;
pub use file::JsonFileDrawer;
pub use memory::InMemoryDrawer;
pub use tag::RefTag;
pub use traits::CashDrawer;
