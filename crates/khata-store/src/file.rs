use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;
use tracing::{debug, info};

use khata_ledger::DueLedger;
use khata_types::CustomerId;

use crate::error::{StoreError, StoreResult};
use crate::traits::{DuePatch, DueStore, NewDueLedger};

/// Due store persisted as a single JSON document on disk.
///
/// Suited to the single-user model: every operation loads the document,
/// applies the change, and writes it back via a temp file + rename so a
/// crash mid-write never leaves a torn document behind.
pub struct JsonFileDueStore {
    path: PathBuf,
    // Serializes load-modify-save cycles within this process.
    write_guard: Mutex<()>,
}

impl JsonFileDueStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_guard: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> StoreResult<Vec<DueLedger>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let data = fs::read_to_string(&self.path).map_err(|e| StoreError::Io(e.to_string()))?;
        serde_json::from_str(&data).map_err(|e| StoreError::Serialization(e.to_string()))
    }

    fn save(&self, records: &[DueLedger]) -> StoreResult<()> {
        let data = serde_json::to_string_pretty(records)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, data).map_err(|e| StoreError::Io(e.to_string()))?;
        fs::rename(&tmp, &self.path).map_err(|e| StoreError::Io(e.to_string()))?;
        Ok(())
    }
}

#[async_trait]
impl DueStore for JsonFileDueStore {
    async fn create(&self, ledger: NewDueLedger) -> StoreResult<DueLedger> {
        let _guard = self.write_guard.lock().map_err(|_| StoreError::LockPoisoned)?;
        let mut records = self.load()?;
        let record = ledger.into_ledger(CustomerId::new());
        records.push(record.clone());
        self.save(&records)?;
        debug!(customer = %record.id, path = %self.path.display(), "customer persisted");
        Ok(record)
    }

    async fn update(&self, patch: DuePatch, id: &CustomerId) -> StoreResult<()> {
        let _guard = self.write_guard.lock().map_err(|_| StoreError::LockPoisoned)?;
        let mut records = self.load()?;
        let record = records
            .iter_mut()
            .find(|r| &r.id == id)
            .ok_or(StoreError::UnknownCustomer(*id))?;
        record.amount = patch.amount;
        record.paid = patch.paid;
        record.logs = patch.logs;
        self.save(&records)?;
        debug!(customer = %id, "customer record updated");
        Ok(())
    }

    async fn delete(&self, id: &CustomerId, display_name: &str) -> StoreResult<()> {
        let _guard = self.write_guard.lock().map_err(|_| StoreError::LockPoisoned)?;
        let mut records = self.load()?;
        let before = records.len();
        records.retain(|r| &r.id != id);
        if records.len() == before {
            return Err(StoreError::UnknownCustomer(*id));
        }
        self.save(&records)?;
        info!(customer = %id, name = display_name, "customer removed");
        Ok(())
    }

    async fn fetch(&self, id: &CustomerId) -> StoreResult<Option<DueLedger>> {
        Ok(self.load()?.into_iter().find(|r| &r.id == id))
    }

    async fn fetch_all(&self) -> StoreResult<Vec<DueLedger>> {
        let mut records = self.load()?;
        records.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.id.cmp(&b.id)));
        Ok(records)
    }
}
