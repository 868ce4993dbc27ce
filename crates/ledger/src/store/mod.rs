//! Adapters for the remote transaction collection.

use async_trait::async_trait;

pub use http::HttpStore;
pub use memory::MemoryStore;

use crate::{StoreError, Transaction};

mod http;
mod memory;

/// Narrow CRUD contract against a single logical collection of transactions,
/// always scoped to the caller-supplied owner for reads.
///
/// Object-safe so the state store can be injected with any backing
/// implementation as `Arc<dyn TransactionStore>`. No partial-field updates
/// are supported; every write is whole-record.
#[async_trait]
pub trait TransactionStore: Send + Sync {
    /// Persists a draft (empty id) and returns the entity enriched with the
    /// store-assigned id.
    async fn create(&self, tx: &Transaction) -> Result<Transaction, StoreError>;

    /// Returns every transaction whose `owner_id` matches exactly.
    ///
    /// An unknown owner yields an empty list, not an error. Ordering is
    /// unspecified.
    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<Transaction>, StoreError>;

    /// Whole-record replacement of the record identified by `tx.id`.
    ///
    /// Fails with [`StoreError::NotFound`] when no such id exists.
    async fn update(&self, tx: &Transaction) -> Result<(), StoreError>;

    /// Removes a record. Deleting a missing id is idempotent, not an error.
    async fn delete(&self, id: &str) -> Result<(), StoreError>;
}
