use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use khata_types::{CustomerId, LogId, LogKind, Money};

use crate::entry::Log;
use crate::error::LedgerError;

/// Cached aggregate of a log collection: total owed and total paid.
///
/// Always derived from the full collection in one pass; call sites receive
/// the mutated logs and the refreshed totals as a single value so neither
/// can be persisted without the other.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    pub amount: Money,
    pub paid: Money,
}

impl Totals {
    /// Recompute both totals from a log collection.
    pub fn from_logs(logs: &[Log]) -> Self {
        let mut totals = Totals::default();
        for log in logs {
            match log.kind {
                LogKind::Due => totals.amount += log.amount,
                LogKind::Add => totals.paid += log.amount,
            }
        }
        totals
    }

    /// Outstanding balance: owed minus paid.
    pub fn balance(&self) -> Money {
        self.amount - self.paid
    }
}

/// One customer's due ledger: descriptive fields, cached totals, and the
/// insertion-ordered transaction log collection.
///
/// Invariant: `amount` and `paid` always equal [`Totals::from_logs`] over
/// `logs`. The mutation helpers uphold this by construction; stored records
/// can be audited with [`crate::LedgerValidator`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DueLedger {
    pub id: CustomerId,
    pub customer_name: String,
    pub mobile: Option<String>,
    /// Optional portrait, binary-as-text encoded. Opaque to this crate.
    pub image: Option<String>,
    /// Registration date, used for most-recent-first list display.
    pub date: NaiveDate,
    pub amount: Money,
    pub paid: Money,
    pub logs: Vec<Log>,
}

impl DueLedger {
    /// Outstanding balance. Computed, never stored.
    pub fn balance(&self) -> Money {
        self.amount - self.paid
    }

    /// The cached totals as a value.
    pub fn totals(&self) -> Totals {
        Totals {
            amount: self.amount,
            paid: self.paid,
        }
    }

    pub fn find_log(&self, id: &LogId) -> Option<&Log> {
        self.logs.iter().find(|l| &l.id == id)
    }

    /// The log collection with `log` appended, plus freshly recomputed
    /// totals. Rejects a duplicate id; logs are unique by id.
    pub fn with_log(&self, log: Log) -> Result<(Vec<Log>, Totals), LedgerError> {
        if self.find_log(&log.id).is_some() {
            return Err(LedgerError::DuplicateLogId(log.id));
        }
        let mut logs = self.logs.clone();
        logs.push(log);
        let totals = Totals::from_logs(&logs);
        Ok((logs, totals))
    }

    /// The log collection with the entry `id` removed, plus freshly
    /// recomputed totals.
    pub fn without_log(&self, id: &LogId) -> Result<(Vec<Log>, Totals), LedgerError> {
        if self.find_log(id).is_none() {
            return Err(LedgerError::UnknownLog(*id));
        }
        let logs: Vec<Log> = self.logs.iter().filter(|l| &l.id != id).cloned().collect();
        let totals = Totals::from_logs(&logs);
        Ok((logs, totals))
    }

    /// Returns `true` if the cached totals match a recomputation.
    pub fn is_consistent(&self) -> bool {
        self.totals() == Totals::from_logs(&self.logs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn log(kind: LogKind, units: i64) -> Log {
        Log::new(kind, Money::from_units(units), date("2024-03-01"))
    }

    fn customer(logs: Vec<Log>) -> DueLedger {
        let totals = Totals::from_logs(&logs);
        DueLedger {
            id: CustomerId::new(),
            customer_name: "Rahim".into(),
            mobile: Some("01700000000".into()),
            image: None,
            date: date("2024-03-01"),
            amount: totals.amount,
            paid: totals.paid,
            logs,
        }
    }

    #[test]
    fn totals_split_by_kind() {
        let logs = vec![
            log(LogKind::Due, 500),
            log(LogKind::Add, 200),
            log(LogKind::Due, 150),
        ];
        let totals = Totals::from_logs(&logs);
        assert_eq!(totals.amount, Money::from_units(650));
        assert_eq!(totals.paid, Money::from_units(200));
        assert_eq!(totals.balance(), Money::from_units(450));
    }

    #[test]
    fn empty_logs_have_zero_totals() {
        let totals = Totals::from_logs(&[]);
        assert_eq!(totals.amount, Money::ZERO);
        assert_eq!(totals.paid, Money::ZERO);
        assert_eq!(totals.balance(), Money::ZERO);
    }

    #[test]
    fn balance_is_amount_minus_paid() {
        let c = customer(vec![log(LogKind::Due, 500), log(LogKind::Add, 200)]);
        assert_eq!(c.balance(), Money::from_units(300));
    }

    #[test]
    fn with_log_recomputes_totals() {
        let c = customer(vec![log(LogKind::Due, 500), log(LogKind::Add, 200)]);
        let (logs, totals) = c.with_log(log(LogKind::Due, 150)).unwrap();
        assert_eq!(logs.len(), 3);
        assert_eq!(totals.amount, Money::from_units(650));
        assert_eq!(totals.paid, Money::from_units(200));
        assert_eq!(totals.balance(), Money::from_units(450));
    }

    #[test]
    fn with_log_rejects_duplicate_id() {
        let seed = log(LogKind::Due, 500);
        let c = customer(vec![seed.clone()]);
        let err = c.with_log(seed.clone()).unwrap_err();
        assert_eq!(err, LedgerError::DuplicateLogId(seed.id));
    }

    #[test]
    fn without_log_recomputes_totals() {
        let payment = log(LogKind::Add, 200);
        let c = customer(vec![log(LogKind::Due, 500), payment.clone()]);
        let (logs, totals) = c.without_log(&payment.id).unwrap();
        assert_eq!(logs.len(), 1);
        assert_eq!(totals.amount, Money::from_units(500));
        assert_eq!(totals.paid, Money::ZERO);
        assert_eq!(totals.balance(), Money::from_units(500));
    }

    #[test]
    fn without_unknown_log_fails() {
        let c = customer(vec![log(LogKind::Due, 500)]);
        let missing = LogId::new();
        let err = c.without_log(&missing).unwrap_err();
        assert_eq!(err, LedgerError::UnknownLog(missing));
    }

    #[test]
    fn delete_then_equivalent_readd_restores_totals() {
        let payment = log(LogKind::Add, 200);
        let c = customer(vec![log(LogKind::Due, 500), payment.clone()]);
        let before = c.totals();

        let (logs, totals) = c.without_log(&payment.id).unwrap();
        let shrunk = DueLedger {
            amount: totals.amount,
            paid: totals.paid,
            logs,
            ..c.clone()
        };

        // Same kind/amount/date, necessarily a fresh id.
        let replacement = Log::new(payment.kind, payment.amount, payment.date);
        assert_ne!(replacement.id, payment.id);
        let (_, restored) = shrunk.with_log(replacement).unwrap();
        assert_eq!(restored, before);
    }

    #[test]
    fn consistency_check_detects_drift() {
        let mut c = customer(vec![log(LogKind::Due, 500)]);
        assert!(c.is_consistent());
        c.amount = Money::from_units(999);
        assert!(!c.is_consistent());
    }

    #[test]
    fn serde_keeps_wire_field_names() {
        let c = customer(vec![log(LogKind::Due, 500)]);
        let json = serde_json::to_value(&c).unwrap();
        assert!(json.get("customer_name").is_some());
        assert!(json.get("mobile").is_some());
        assert!(json.get("logs").is_some());
        assert_eq!(json["logs"][0]["type"], "DUE");
    }
}
