use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use khata_types::{CashDirection, EntryId, Money};

/// One movement recorded in the shared cash drawer.
///
/// The `direction` field serializes as `"type"` with the fixed
/// `"ADD"` / `"WITHDRAW"` vocabulary of stored documents. The note is free
/// text; entries paired with a due transaction carry a [`crate::RefTag`]
/// inside it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CashEntry {
    pub id: EntryId,
    #[serde(rename = "type")]
    pub direction: CashDirection,
    pub amount: Money,
    pub date: NaiveDate,
    pub note: String,
}

/// Fields of a drawer entry before the store assigns its id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewCashEntry {
    pub direction: CashDirection,
    pub amount: Money,
    pub date: NaiveDate,
    pub note: String,
}

impl NewCashEntry {
    pub fn into_entry(self, id: EntryId) -> CashEntry {
        CashEntry {
            id,
            direction: self.direction,
            amount: self.amount,
            date: self.date,
            note: self.note,
        }
    }
}
