use std::collections::HashSet;

use khata_types::{CustomerId, LogId, Money};

use crate::ledger::{DueLedger, Totals};

/// Result of auditing one customer record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationReport {
    pub customer: CustomerId,
    pub log_count: u64,
    pub aggregate_consistent: bool,
    pub ids_unique: bool,
    pub amounts_positive: bool,
    pub violations: Vec<Violation>,
}

impl ValidationReport {
    /// Returns `true` if all checks passed.
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }
}

/// A specific invariant violation detected during validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Violation {
    pub kind: ViolationKind,
    pub description: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViolationKind {
    /// Cached `amount`/`paid` disagree with recomputation over the logs.
    AggregateDrift,
    /// Two logs share an id.
    DuplicateLogId(LogId),
    /// A log carries a zero or negative amount.
    NonPositiveAmount(LogId),
}

/// Due-ledger record auditor.
pub struct LedgerValidator;

impl LedgerValidator {
    /// Audit a single customer record for all invariants.
    pub fn validate(ledger: &DueLedger) -> ValidationReport {
        let mut violations = Vec::new();
        let mut aggregate_consistent = true;
        let mut ids_unique = true;
        let mut amounts_positive = true;

        let recomputed = Totals::from_logs(&ledger.logs);
        if recomputed != ledger.totals() {
            aggregate_consistent = false;
            violations.push(Violation {
                kind: ViolationKind::AggregateDrift,
                description: format!(
                    "cached amount={} paid={}, recomputed amount={} paid={}",
                    ledger.amount, ledger.paid, recomputed.amount, recomputed.paid
                ),
            });
        }

        let mut seen = HashSet::new();
        for log in &ledger.logs {
            if !seen.insert(log.id) {
                ids_unique = false;
                violations.push(Violation {
                    kind: ViolationKind::DuplicateLogId(log.id),
                    description: format!("log id {} appears more than once", log.id),
                });
            }
            if log.amount <= Money::ZERO {
                amounts_positive = false;
                violations.push(Violation {
                    kind: ViolationKind::NonPositiveAmount(log.id),
                    description: format!("log {} has non-positive amount {}", log.id, log.amount),
                });
            }
        }

        ValidationReport {
            customer: ledger.id,
            log_count: ledger.logs.len() as u64,
            aggregate_consistent,
            ids_unique,
            amounts_positive,
            violations,
        }
    }

    /// Audit every record in a snapshot.
    pub fn validate_all(ledgers: &[DueLedger]) -> Vec<ValidationReport> {
        ledgers.iter().map(Self::validate).collect()
    }
}
