use std::{
    collections::HashMap,
    sync::{Mutex, MutexGuard, PoisonError},
};

use async_trait::async_trait;
use uuid::Uuid;

use super::TransactionStore;
use crate::{StoreError, Transaction};

/// In-memory document collection.
///
/// Backs the dev store and unit tests; ids are v4 uuids, like the remote
/// store would assign.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<HashMap<String, Transaction>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn records(&self) -> MutexGuard<'_, HashMap<String, Transaction>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl TransactionStore for MemoryStore {
    async fn create(&self, tx: &Transaction) -> Result<Transaction, StoreError> {
        let mut created = tx.clone();
        created.id = Uuid::new_v4().to_string();
        self.records().insert(created.id.clone(), created.clone());
        Ok(created)
    }

    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<Transaction>, StoreError> {
        Ok(self
            .records()
            .values()
            .filter(|tx| tx.owner_id == owner_id)
            .cloned()
            .collect())
    }

    async fn update(&self, tx: &Transaction) -> Result<(), StoreError> {
        let mut records = self.records();
        match records.get_mut(&tx.id) {
            Some(existing) => {
                *existing = tx.clone();
                Ok(())
            }
            None => Err(StoreError::NotFound(tx.id.clone())),
        }
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        self.records().remove(id);
        Ok(())
    }
}
