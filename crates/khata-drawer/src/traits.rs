use async_trait::async_trait;

use khata_types::LogId;

use crate::entry::{CashEntry, NewCashEntry};
use crate::error::DrawerResult;

/// Store boundary for the shared cash drawer.
///
/// All implementations must satisfy these invariants:
/// - Entries are immutable once created; there is no update operation.
/// - `create` assigns the id; callers never pick one.
/// - `delete_by_reference` matches by parsing the embedded reference tag
///   out of stored notes; the drawer has no foreign-key column.
/// - All I/O errors are propagated, never silently ignored.
#[async_trait]
pub trait CashDrawer: Send + Sync {
    /// Record a movement and return it with its assigned id.
    async fn create(&self, entry: NewCashEntry) -> DrawerResult<CashEntry>;

    /// Remove the entry whose note references `log`.
    ///
    /// Returns `Ok(false)` if no stored note carries a matching tag; the
    /// caller decides whether that is fatal.
    async fn delete_by_reference(&self, log: &LogId) -> DrawerResult<bool>;

    /// All entries, oldest first.
    async fn entries(&self) -> DrawerResult<Vec<CashEntry>>;
}
