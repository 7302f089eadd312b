use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use tracing::{debug, info};

use khata_ledger::DueLedger;
use khata_types::CustomerId;

use crate::error::{StoreError, StoreResult};
use crate::traits::{DuePatch, DueStore, NewDueLedger};

/// In-memory due store for tests, local demos, and embedding.
#[derive(Default)]
pub struct InMemoryDueStore {
    inner: RwLock<HashMap<CustomerId, DueLedger>>,
}

impl InMemoryDueStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DueStore for InMemoryDueStore {
    async fn create(&self, ledger: NewDueLedger) -> StoreResult<DueLedger> {
        let record = ledger.into_ledger(CustomerId::new());
        let mut map = self.inner.write().map_err(|_| StoreError::LockPoisoned)?;
        map.insert(record.id, record.clone());
        debug!(customer = %record.id, name = %record.customer_name, "customer registered");
        Ok(record)
    }

    async fn update(&self, patch: DuePatch, id: &CustomerId) -> StoreResult<()> {
        let mut map = self.inner.write().map_err(|_| StoreError::LockPoisoned)?;
        let record = map.get_mut(id).ok_or(StoreError::UnknownCustomer(*id))?;
        record.amount = patch.amount;
        record.paid = patch.paid;
        record.logs = patch.logs;
        debug!(customer = %id, logs = record.logs.len(), "customer record updated");
        Ok(())
    }

    async fn delete(&self, id: &CustomerId, display_name: &str) -> StoreResult<()> {
        let mut map = self.inner.write().map_err(|_| StoreError::LockPoisoned)?;
        map.remove(id).ok_or(StoreError::UnknownCustomer(*id))?;
        info!(customer = %id, name = display_name, "customer removed");
        Ok(())
    }

    async fn fetch(&self, id: &CustomerId) -> StoreResult<Option<DueLedger>> {
        let map = self.inner.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(map.get(id).cloned())
    }

    async fn fetch_all(&self) -> StoreResult<Vec<DueLedger>> {
        let map = self.inner.read().map_err(|_| StoreError::LockPoisoned)?;
        let mut records: Vec<DueLedger> = map.values().cloned().collect();
        records.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.id.cmp(&b.id)));
        Ok(records)
    }
}
