//! Due-ledger persistence boundary for khata.
//!
//! The transaction protocol talks to customer records only through the
//! [`DueStore`] trait. Two backends ship with the crate:
//! - [`InMemoryDueStore`] for tests and embedding
//! - [`JsonFileDueStore`] for local single-user persistence
//!
//! [`DuePatch`] deliberately carries the log collection and both cached
//! totals as one value: a caller cannot persist mutated logs without the
//! matching recomputed aggregate.

pub mod error;
pub mod file;
pub mod memory;
pub mod traits;

pub use error::StoreError;
pub use file::JsonFileDueStore;
pub use memory::InMemoryDueStore;
pub use traits::{DuePatch, DueStore, NewDueLedger};
