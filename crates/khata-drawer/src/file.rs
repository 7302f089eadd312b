use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;
use tracing::debug;

use khata_types::{EntryId, LogId};

use crate::entry::{CashEntry, NewCashEntry};
use crate::error::{DrawerError, DrawerResult};
use crate::tag::RefTag;
use crate::traits::CashDrawer;

/// Drawer persisted as a single JSON document on disk.
///
/// Suited to the single-user model: every operation loads the document,
/// applies the change, and writes it back via a temp file + rename so a
/// crash mid-write never leaves a torn document behind.
pub struct JsonFileDrawer {
    path: PathBuf,
    // Serializes load-modify-save cycles within this process.
    write_guard: Mutex<()>,
}

impl JsonFileDrawer {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_guard: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> DrawerResult<Vec<CashEntry>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let data = fs::read_to_string(&self.path).map_err(|e| DrawerError::Io(e.to_string()))?;
        serde_json::from_str(&data).map_err(|e| DrawerError::Serialization(e.to_string()))
    }

    fn save(&self, entries: &[CashEntry]) -> DrawerResult<()> {
        let data = serde_json::to_string_pretty(entries)
            .map_err(|e| DrawerError::Serialization(e.to_string()))?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, data).map_err(|e| DrawerError::Io(e.to_string()))?;
        fs::rename(&tmp, &self.path).map_err(|e| DrawerError::Io(e.to_string()))?;
        Ok(())
    }
}

#[async_trait]
impl CashDrawer for JsonFileDrawer {
    async fn create(&self, entry: NewCashEntry) -> DrawerResult<CashEntry> {
        let _guard = self.write_guard.lock().map_err(|_| DrawerError::LockPoisoned)?;
        let mut entries = self.load()?;
        let entry = entry.into_entry(EntryId::new());
        entries.push(entry.clone());
        self.save(&entries)?;
        debug!(id = %entry.id, path = %self.path.display(), "drawer entry persisted");
        Ok(entry)
    }

    async fn delete_by_reference(&self, log: &LogId) -> DrawerResult<bool> {
        let _guard = self.write_guard.lock().map_err(|_| DrawerError::LockPoisoned)?;
        let mut entries = self.load()?;
        let before = entries.len();
        entries.retain(|e| !RefTag::note_references(&e.note, log));
        let removed = entries.len() < before;
        if removed {
            self.save(&entries)?;
        }
        debug!(log = %log, removed, "drawer delete by reference");
        Ok(removed)
    }

    async fn entries(&self) -> DrawerResult<Vec<CashEntry>> {
        self.load()
    }
}
