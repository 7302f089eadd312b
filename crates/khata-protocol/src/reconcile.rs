use std::collections::HashSet;

use tracing::{info, warn};

use khata_drawer::{CashDrawer, NewCashEntry, RefTag};
use khata_ledger::Totals;
use khata_store::{DuePatch, DueStore};
use khata_types::{CustomerId, EntryId, LogId};

use crate::error::ProtocolError;
use crate::protocol::drawer_note;

/// One disagreement between the due ledger and the cash drawer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Discrepancy {
    pub kind: DiscrepancyKind,
    pub description: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DiscrepancyKind {
    /// A due log has no drawer entry carrying its reference tag.
    MissingCashEntry { customer: CustomerId, log: LogId },
    /// A tagged drawer entry references a log that no longer exists.
    OrphanedCashEntry { entry: EntryId, log: LogId },
    /// A record's cached totals disagree with recomputation.
    AggregateDrift { customer: CustomerId },
}

/// Result of a cross-ledger audit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReconcileReport {
    pub customers_checked: u64,
    pub entries_checked: u64,
    pub discrepancies: Vec<Discrepancy>,
}

impl ReconcileReport {
    /// Returns `true` if the two ledgers agree everywhere.
    pub fn is_clean(&self) -> bool {
        self.discrepancies.is_empty()
    }
}

/// What a repair pass actually changed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RepairSummary {
    pub entries_recreated: u64,
    pub entries_removed: u64,
    pub aggregates_repaired: u64,
}

/// Cross-ledger auditor.
///
/// Walks every customer record and every drawer entry, matching the two
/// sides through the embedded reference tags. Untagged drawer entries are
/// manual till movements and are left alone.
pub struct Reconciler;

impl Reconciler {
    /// Compare both ledgers and report every disagreement.
    pub async fn audit<S: DueStore, D: CashDrawer>(
        store: &S,
        drawer: &D,
    ) -> Result<ReconcileReport, ProtocolError> {
        let customers = store.fetch_all().await?;
        let entries = drawer.entries().await?;

        let mut referenced_logs = HashSet::new();
        for entry in &entries {
            if let Some(tag) = RefTag::parse(&entry.note) {
                referenced_logs.insert(tag.log);
            }
        }

        let mut discrepancies = Vec::new();

        let mut live_logs = HashSet::new();
        for customer in &customers {
            if !customer.is_consistent() {
                discrepancies.push(Discrepancy {
                    kind: DiscrepancyKind::AggregateDrift { customer: customer.id },
                    description: format!(
                        "cached totals of {} disagree with the log collection",
                        customer.customer_name
                    ),
                });
            }
            for log in &customer.logs {
                live_logs.insert(log.id);
                if !referenced_logs.contains(&log.id) {
                    discrepancies.push(Discrepancy {
                        kind: DiscrepancyKind::MissingCashEntry {
                            customer: customer.id,
                            log: log.id,
                        },
                        description: format!(
                            "log {} of {} has no paired cash entry",
                            log.id, customer.customer_name
                        ),
                    });
                }
            }
        }

        for entry in &entries {
            if let Some(tag) = RefTag::parse(&entry.note) {
                if !live_logs.contains(&tag.log) {
                    discrepancies.push(Discrepancy {
                        kind: DiscrepancyKind::OrphanedCashEntry {
                            entry: entry.id,
                            log: tag.log,
                        },
                        description: format!(
                            "cash entry {} references deleted log {}",
                            entry.id, tag.log
                        ),
                    });
                }
            }
        }

        Ok(ReconcileReport {
            customers_checked: customers.len() as u64,
            entries_checked: entries.len() as u64,
            discrepancies,
        })
    }

    /// Audit, then repair everything found.
    ///
    /// Missing entries are recreated from their logs, orphaned entries are
    /// removed, and drifted aggregates are recomputed and re-persisted.
    pub async fn repair<S: DueStore, D: CashDrawer>(
        store: &S,
        drawer: &D,
    ) -> Result<RepairSummary, ProtocolError> {
        let report = Self::audit(store, drawer).await?;
        let mut summary = RepairSummary::default();

        for discrepancy in &report.discrepancies {
            match discrepancy.kind {
                DiscrepancyKind::MissingCashEntry { customer, log } => {
                    let Some(record) = store.fetch(&customer).await? else {
                        warn!(customer = %customer, "record vanished mid-repair");
                        continue;
                    };
                    let Some(log_entry) = record.find_log(&log).cloned() else {
                        warn!(customer = %customer, log = %log, "log vanished mid-repair");
                        continue;
                    };
                    let tag = RefTag::new(customer, log);
                    drawer
                        .create(NewCashEntry {
                            direction: log_entry.kind.drawer_direction(),
                            amount: log_entry.amount,
                            date: log_entry.date,
                            note: drawer_note(log_entry.kind, &record.customer_name, &tag),
                        })
                        .await?;
                    summary.entries_recreated += 1;
                }
                DiscrepancyKind::OrphanedCashEntry { log, .. } => {
                    if drawer.delete_by_reference(&log).await? {
                        summary.entries_removed += 1;
                    }
                }
                DiscrepancyKind::AggregateDrift { customer } => {
                    let Some(record) = store.fetch(&customer).await? else {
                        warn!(customer = %customer, "record vanished mid-repair");
                        continue;
                    };
                    let totals = Totals::from_logs(&record.logs);
                    store
                        .update(DuePatch::new(record.logs.clone(), totals), &customer)
                        .await?;
                    summary.aggregates_repaired += 1;
                }
            }
        }

        info!(
            recreated = summary.entries_recreated,
            removed = summary.entries_removed,
            repatched = summary.aggregates_repaired,
            "reconciliation repair finished"
        );
        Ok(summary)
    }
}
