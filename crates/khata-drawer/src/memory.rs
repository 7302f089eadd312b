use std::sync::RwLock;

use async_trait::async_trait;
use tracing::debug;

use khata_types::{EntryId, LogId};

use crate::entry::{CashEntry, NewCashEntry};
use crate::error::{DrawerError, DrawerResult};
use crate::tag::RefTag;
use crate::traits::CashDrawer;

/// In-memory drawer for tests, local demos, and embedding.
#[derive(Default)]
pub struct InMemoryDrawer {
    inner: RwLock<Vec<CashEntry>>,
}

impl InMemoryDrawer {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CashDrawer for InMemoryDrawer {
    async fn create(&self, entry: NewCashEntry) -> DrawerResult<CashEntry> {
        let entry = entry.into_entry(EntryId::new());
        let mut entries = self.inner.write().map_err(|_| DrawerError::LockPoisoned)?;
        entries.push(entry.clone());
        debug!(id = %entry.id, direction = %entry.direction, "drawer entry recorded");
        Ok(entry)
    }

    async fn delete_by_reference(&self, log: &LogId) -> DrawerResult<bool> {
        let mut entries = self.inner.write().map_err(|_| DrawerError::LockPoisoned)?;
        let before = entries.len();
        entries.retain(|e| !RefTag::note_references(&e.note, log));
        let removed = entries.len() < before;
        debug!(log = %log, removed, "drawer delete by reference");
        Ok(removed)
    }

    async fn entries(&self) -> DrawerResult<Vec<CashEntry>> {
        let entries = self.inner.read().map_err(|_| DrawerError::LockPoisoned)?;
        Ok(entries.clone())
    }
}

#[cfg(test)]
mod tests {
    use khata_types::{CashDirection, CustomerId, Money};

    use super::*;

    fn tagged_entry(log: &LogId) -> NewCashEntry {
        let tag = RefTag::new(CustomerId::new(), *log);
        NewCashEntry {
            direction: CashDirection::Withdraw,
            amount: Money::from_units(150),
            date: "2024-03-01".parse().unwrap(),
            note: format!("credit issued: Rahim {tag}"),
        }
    }

    #[tokio::test]
    async fn create_assigns_unique_ids() {
        let drawer = InMemoryDrawer::new();
        let log = LogId::new();
        let a = drawer.create(tagged_entry(&log)).await.unwrap();
        let b = drawer.create(tagged_entry(&log)).await.unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(drawer.entries().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn delete_by_reference_removes_only_the_match() {
        let drawer = InMemoryDrawer::new();
        let target = LogId::new();
        let other = LogId::new();
        drawer.create(tagged_entry(&target)).await.unwrap();
        drawer.create(tagged_entry(&other)).await.unwrap();

        assert!(drawer.delete_by_reference(&target).await.unwrap());

        let remaining = drawer.entries().await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert!(RefTag::note_references(&remaining[0].note, &other));
    }

    #[tokio::test]
    async fn delete_missing_reference_reports_not_found() {
        let drawer = InMemoryDrawer::new();
        assert!(!drawer.delete_by_reference(&LogId::new()).await.unwrap());
    }

    #[tokio::test]
    async fn entries_preserve_insertion_order() {
        let drawer = InMemoryDrawer::new();
        let first = drawer.create(tagged_entry(&LogId::new())).await.unwrap();
        let second = drawer.create(tagged_entry(&LogId::new())).await.unwrap();
        let all = drawer.entries().await.unwrap();
        assert_eq!(all[0].id, first.id);
        assert_eq!(all[1].id, second.id);
    }
}
