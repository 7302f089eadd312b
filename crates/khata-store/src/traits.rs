use async_trait::async_trait;
use chrono::NaiveDate;

use khata_ledger::{DueLedger, Log, Totals};
use khata_types::{CustomerId, Money};

use crate::error::StoreResult;

/// Fields of a customer record before the store assigns its id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewDueLedger {
    pub customer_name: String,
    pub mobile: Option<String>,
    pub image: Option<String>,
    pub date: NaiveDate,
    pub amount: Money,
    pub paid: Money,
    pub logs: Vec<Log>,
}

impl NewDueLedger {
    pub fn into_ledger(self, id: CustomerId) -> DueLedger {
        DueLedger {
            id,
            customer_name: self.customer_name,
            mobile: self.mobile,
            image: self.image,
            date: self.date,
            amount: self.amount,
            paid: self.paid,
            logs: self.logs,
        }
    }
}

/// The mutable slice of a customer record.
///
/// Logs and both totals travel together so no caller can persist one
/// without the other. Descriptive fields are not patchable here.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DuePatch {
    pub amount: Money,
    pub paid: Money,
    pub logs: Vec<Log>,
}

impl DuePatch {
    pub fn new(logs: Vec<Log>, totals: Totals) -> Self {
        Self {
            amount: totals.amount,
            paid: totals.paid,
            logs,
        }
    }
}

/// Store boundary for customer due-ledger records.
///
/// All implementations must satisfy these invariants:
/// - `create` assigns the id; callers never pick one.
/// - `update` replaces logs and totals atomically from the store's point
///   of view; a reader never observes one without the other.
/// - `fetch_all` returns the latest snapshot in a deterministic order:
///   registration date ascending, id as the tie-break.
/// - All I/O errors are propagated, never silently ignored.
#[async_trait]
pub trait DueStore: Send + Sync {
    /// Register a customer and return the record with its assigned id.
    async fn create(&self, ledger: NewDueLedger) -> StoreResult<DueLedger>;

    /// Apply a patch to an existing record.
    async fn update(&self, patch: DuePatch, id: &CustomerId) -> StoreResult<()>;

    /// Remove a record. `display_name` is carried for operator-facing logs.
    async fn delete(&self, id: &CustomerId, display_name: &str) -> StoreResult<()>;

    /// One record by id, or `None` if it does not exist.
    async fn fetch(&self, id: &CustomerId) -> StoreResult<Option<DueLedger>>;

    /// The full customer list, freshly loaded from the store.
    async fn fetch_all(&self) -> StoreResult<Vec<DueLedger>>;
}
