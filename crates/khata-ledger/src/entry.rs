use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use khata_types::{wall_clock_hm, LogId, LogKind, Money};

/// One immutable transaction entry in a customer's due ledger.
///
/// A log is never edited in place; a correction is a delete followed by a
/// recreate under a fresh id. The `kind` field serializes as `"type"` with
/// the fixed `"DUE"` / `"ADD"` vocabulary shared with stored documents.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Log {
    pub id: LogId,
    /// Business date of the transaction; the user may back-date it.
    pub date: NaiveDate,
    /// Wall-clock `HH:MM` at creation, local to the recording device.
    /// Display only; ordering uses `(date, id)`.
    pub time: String,
    #[serde(rename = "type")]
    pub kind: LogKind,
    pub amount: Money,
}

impl Log {
    /// Create a new entry stamped with the current wall-clock time.
    pub fn new(kind: LogKind, amount: Money, date: NaiveDate) -> Self {
        Self {
            id: LogId::new(),
            date,
            time: wall_clock_hm(),
            kind,
            amount,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn new_assigns_fresh_id_and_time() {
        let a = Log::new(LogKind::Due, Money::from_units(500), date("2024-03-01"));
        let b = Log::new(LogKind::Due, Money::from_units(500), date("2024-03-01"));
        assert_ne!(a.id, b.id);
        assert_eq!(a.time.len(), 5);
    }

    #[test]
    fn serde_uses_wire_field_names() {
        let log = Log::new(LogKind::Add, Money::from_units(200), date("2024-03-02"));
        let json = serde_json::to_value(&log).unwrap();
        assert_eq!(json["type"], "ADD");
        assert!(json.get("kind").is_none());
        assert_eq!(json["date"], "2024-03-02");
    }

    #[test]
    fn serde_roundtrip() {
        let log = Log::new(LogKind::Due, "150.25".parse().unwrap(), date("2024-01-15"));
        let json = serde_json::to_string(&log).unwrap();
        let parsed: Log = serde_json::from_str(&json).unwrap();
        assert_eq!(log, parsed);
    }
}
