use chrono::NaiveDate;
use tracing::{error, info, warn};

use khata_drawer::{CashDrawer, NewCashEntry, RefTag};
use khata_ledger::{DueLedger, Log, Totals};
use khata_store::{DuePatch, DueStore, NewDueLedger};
use khata_types::{CustomerId, LogId, LogKind, Money};

use crate::error::{ProtocolError, ValidationError};
use crate::notify::{NotificationSink, Severity};
use crate::session::Session;

/// Input for registering a customer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewCustomer {
    pub name: String,
    pub mobile: Option<String>,
    pub image: Option<String>,
    pub initial_amount: Money,
    pub date: NaiveDate,
}

/// The due-ledger transaction protocol.
///
/// Owns the store boundaries, the latest customer snapshot, and the
/// session. Operations run their steps strictly in sequence, each awaited
/// before the next; there is no mid-operation cancellation and no retry.
/// One user drives one protocol instance; concurrent edits to the same
/// record are outside the model.
pub struct DueProtocol<S, D, N> {
    store: S,
    drawer: D,
    sink: N,
    session: Session,
    customers: Vec<DueLedger>,
}

impl<S: DueStore, D: CashDrawer, N: NotificationSink> DueProtocol<S, D, N> {
    pub fn new(store: S, drawer: D, sink: N) -> Self {
        Self {
            store,
            drawer,
            sink,
            session: Session::new(),
            customers: Vec::new(),
        }
    }

    /// Reload the customer list from the store.
    ///
    /// The session keeps its id across the swap; [`Self::selected`]
    /// re-resolves against the fresh snapshot.
    pub async fn refresh(&mut self) -> Result<(), ProtocolError> {
        self.customers = self.store.fetch_all().await?;
        Ok(())
    }

    /// The latest refreshed snapshot.
    pub fn customers(&self) -> &[DueLedger] {
        &self.customers
    }

    /// The currently open customer, resolved against the latest snapshot.
    pub fn selected(&self) -> Option<&DueLedger> {
        self.session.resolve(&self.customers)
    }

    pub fn select(&mut self, id: CustomerId) {
        self.session.select(id);
    }

    pub fn deselect(&mut self) {
        self.session.clear();
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn drawer(&self) -> &D {
        &self.drawer
    }

    /// Record a transaction on an existing customer.
    ///
    /// Persists the updated due ledger, then the paired drawer entry, then
    /// refreshes and re-selects the customer. See the module docs for the
    /// partial-failure behavior.
    pub async fn add_transaction(
        &mut self,
        customer: CustomerId,
        kind: LogKind,
        amount: Money,
        date: NaiveDate,
    ) -> Result<LogId, ProtocolError> {
        let outcome = self.add_transaction_inner(customer, kind, amount, date).await;
        self.report(&outcome, "transaction saved");
        outcome
    }

    async fn add_transaction_inner(
        &mut self,
        customer: CustomerId,
        kind: LogKind,
        amount: Money,
        date: NaiveDate,
    ) -> Result<LogId, ProtocolError> {
        if !amount.is_positive() {
            return Err(ValidationError::NonPositiveAmount(amount).into());
        }
        let record = self
            .store
            .fetch(&customer)
            .await?
            .ok_or(ValidationError::UnknownCustomer(customer))?;

        let log = Log::new(kind, amount, date);
        let log_id = log.id;
        let prior = DuePatch::new(record.logs.clone(), record.totals());
        let (logs, totals) = record.with_log(log)?;

        // Step A: due ledger.
        self.store.update(DuePatch::new(logs, totals), &customer).await?;
        info!(customer = %customer, log = %log_id, kind = %kind, %amount, "due ledger updated");

        // Step B: paired drawer entry.
        let tag = RefTag::new(customer, log_id);
        let entry = NewCashEntry {
            direction: kind.drawer_direction(),
            amount,
            date,
            note: drawer_note(kind, &record.customer_name, &tag),
        };
        if let Err(drawer_err) = self.drawer.create(entry).await {
            warn!(customer = %customer, log = %log_id, error = %drawer_err,
                "drawer write failed after ledger update; rolling back");
            if let Err(undo_err) = self.store.update(prior, &customer).await {
                error!(customer = %customer, log = %log_id, error = %undo_err,
                    "rollback failed; ledgers have diverged");
                return Err(ProtocolError::Drift {
                    customer,
                    detail: format!(
                        "drawer write failed ({drawer_err}) and rollback failed ({undo_err})"
                    ),
                });
            }
            return Err(drawer_err.into());
        }

        self.refresh().await?;
        self.session.select(customer);
        Ok(log_id)
    }

    /// Register a customer with an opening credit amount.
    ///
    /// Creates the record with one seed `Due` log, then the paired drawer
    /// entry, then refreshes and selects the new customer.
    pub async fn new_customer(&mut self, input: NewCustomer) -> Result<CustomerId, ProtocolError> {
        let outcome = self.new_customer_inner(input).await;
        self.report(&outcome, "customer added");
        outcome
    }

    async fn new_customer_inner(&mut self, input: NewCustomer) -> Result<CustomerId, ProtocolError> {
        let name = input.name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        if !input.initial_amount.is_positive() {
            return Err(ValidationError::NonPositiveAmount(input.initial_amount).into());
        }

        let seed = Log::new(LogKind::Due, input.initial_amount, input.date);
        let seed_id = seed.id;
        let logs = vec![seed];
        let totals = Totals::from_logs(&logs);

        // Step A: the record itself. The store assigns the id the tag needs.
        let created = self
            .store
            .create(NewDueLedger {
                customer_name: name.to_string(),
                mobile: input.mobile,
                image: input.image,
                date: input.date,
                amount: totals.amount,
                paid: totals.paid,
                logs,
            })
            .await?;
        info!(customer = %created.id, name = %created.customer_name, "customer registered");

        // Step B: paired drawer entry for the opening credit.
        let tag = RefTag::new(created.id, seed_id);
        let entry = NewCashEntry {
            direction: LogKind::Due.drawer_direction(),
            amount: input.initial_amount,
            date: input.date,
            note: format!("credit opened: {} {tag}", created.customer_name),
        };
        if let Err(drawer_err) = self.drawer.create(entry).await {
            warn!(customer = %created.id, error = %drawer_err,
                "drawer write failed after registration; rolling back");
            if let Err(undo_err) = self
                .store
                .delete(&created.id, &created.customer_name)
                .await
            {
                error!(customer = %created.id, error = %undo_err,
                    "rollback failed; ledgers have diverged");
                return Err(ProtocolError::Drift {
                    customer: created.id,
                    detail: format!(
                        "drawer write failed ({drawer_err}) and rollback failed ({undo_err})"
                    ),
                });
            }
            return Err(drawer_err.into());
        }

        self.refresh().await?;
        self.session.select(created.id);
        Ok(created.id)
    }

    /// Delete one log entry and its paired drawer entry.
    ///
    /// The drawer side goes first, matched by the embedded reference tag; a
    /// tag that no longer exists is non-fatal and the due-ledger side still
    /// proceeds.
    pub async fn delete_entry(
        &mut self,
        customer: CustomerId,
        log: LogId,
    ) -> Result<(), ProtocolError> {
        let outcome = self.delete_entry_inner(customer, log).await;
        self.report(&outcome, "entry deleted");
        outcome
    }

    async fn delete_entry_inner(
        &mut self,
        customer: CustomerId,
        log_id: LogId,
    ) -> Result<(), ProtocolError> {
        let record = self
            .store
            .fetch(&customer)
            .await?
            .ok_or(ValidationError::UnknownCustomer(customer))?;
        let log = record
            .find_log(&log_id)
            .cloned()
            .ok_or(khata_ledger::LedgerError::UnknownLog(log_id))?;
        let (logs, totals) = record.without_log(&log_id)?;

        // Step 1: drawer entry, matched by reference tag.
        let removed = self.drawer.delete_by_reference(&log_id).await?;
        if !removed {
            warn!(customer = %customer, log = %log_id,
                "paired cash entry already missing; deleting due-ledger side only");
        }

        // Steps 2-3: log removal and aggregate recomputation, one update.
        if let Err(store_err) = self.store.update(DuePatch::new(logs, totals), &customer).await {
            if removed {
                warn!(customer = %customer, log = %log_id, error = %store_err,
                    "ledger update failed after drawer removal; restoring drawer entry");
                let tag = RefTag::new(customer, log_id);
                let entry = NewCashEntry {
                    direction: log.kind.drawer_direction(),
                    amount: log.amount,
                    date: log.date,
                    note: drawer_note(log.kind, &record.customer_name, &tag),
                };
                if let Err(redo_err) = self.drawer.create(entry).await {
                    error!(customer = %customer, log = %log_id, error = %redo_err,
                        "drawer restore failed; ledgers have diverged");
                    return Err(ProtocolError::Drift {
                        customer,
                        detail: format!(
                            "ledger update failed ({store_err}) and drawer restore failed ({redo_err})"
                        ),
                    });
                }
            }
            return Err(store_err.into());
        }
        info!(customer = %customer, log = %log_id, "log entry deleted");

        self.refresh().await?;
        self.session.select(customer);
        Ok(())
    }

    /// Delete a customer: every log's paired drawer entry, then the record.
    pub async fn delete_customer(&mut self, customer: CustomerId) -> Result<(), ProtocolError> {
        let outcome = self.delete_customer_inner(customer).await;
        self.report(&outcome, "customer deleted");
        outcome
    }

    async fn delete_customer_inner(&mut self, customer: CustomerId) -> Result<(), ProtocolError> {
        let record = self
            .store
            .fetch(&customer)
            .await?
            .ok_or(ValidationError::UnknownCustomer(customer))?;

        for log in &record.logs {
            let removed = self.drawer.delete_by_reference(&log.id).await?;
            if !removed {
                warn!(customer = %customer, log = %log.id, "paired cash entry already missing");
            }
        }

        self.store.delete(&customer, &record.customer_name).await?;
        info!(customer = %customer, name = %record.customer_name, "customer deleted");

        if self.session.selected_id() == Some(customer) {
            self.session.clear();
        }
        self.refresh().await?;
        Ok(())
    }

    fn report<T>(&self, outcome: &Result<T, ProtocolError>, success_message: &str) {
        match outcome {
            Ok(_) => self.sink.notify(success_message, Severity::Success),
            Err(e) => self.sink.notify(&e.to_string(), Severity::Error),
        }
    }
}

/// Human-readable note for a paired drawer entry, tag included.
pub(crate) fn drawer_note(kind: LogKind, customer_name: &str, tag: &RefTag) -> String {
    let label = match kind {
        LogKind::Due => "credit issued",
        LogKind::Add => "payment received",
    };
    format!("{label}: {customer_name} {tag}")
}
