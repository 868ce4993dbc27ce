//! The ledger state store: the single authoritative holder of one owner's
//! transaction set, and the serialization point for every mutating operation.
//!
//! Every successful write ends with a full reload from the store. The one
//! extra round-trip buys guaranteed consistency with the store's canonical
//! state; applying server-confirmed entities locally is deliberately not
//! attempted.

use std::{future::Future, sync::Arc, time::Duration};

use tokio::sync::{Mutex, watch};

use crate::{
    LedgerError, ResultLedger, SessionGate, StoreError, Transaction, TransactionDraft,
    TransactionStore,
    summary::{LedgerSummary, summarize},
};

const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(10);

/// Snapshot published to the presentation layer.
///
/// `loading` marks a reload in flight; `error` carries the last failure
/// while `transactions` retain their last-known value.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LedgerState {
    pub transactions: Vec<Transaction>,
    pub summary: LedgerSummary,
    pub loading: bool,
    pub error: Option<String>,
}

/// The cache plus the owner it was loaded for.
///
/// Only ever touched while holding the operation lock.
#[derive(Debug, Default)]
struct Cache {
    owner: Option<String>,
    transactions: Vec<Transaction>,
}

pub struct LedgerStore {
    store: Arc<dyn TransactionStore>,
    session: Arc<dyn SessionGate>,
    call_timeout: Duration,
    // Serializes whole operation sequences (validate, adapter calls, reload,
    // publish): at most one in-flight mutating sequence per store, queued
    // FIFO, so a faster reload can never clobber a slower write's refresh.
    cache: Mutex<Cache>,
    state: watch::Sender<LedgerState>,
}

impl LedgerStore {
    /// Returns a builder for `LedgerStore`.
    pub fn builder(
        store: Arc<dyn TransactionStore>,
        session: Arc<dyn SessionGate>,
    ) -> LedgerStoreBuilder {
        LedgerStoreBuilder {
            store,
            session,
            call_timeout: DEFAULT_CALL_TIMEOUT,
        }
    }

    /// Returns the current published snapshot.
    #[must_use]
    pub fn state(&self) -> LedgerState {
        self.state.borrow().clone()
    }

    /// Subscribes to snapshot updates.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<LedgerState> {
        self.state.subscribe()
    }

    /// Reloads the cache from the store for the active owner.
    ///
    /// With no session this only clears any leftover cache and returns `Ok`.
    /// On failure the cache keeps its last-known value and the error is
    /// published.
    pub async fn load(&self) -> ResultLedger<()> {
        let mut cache = self.cache.lock().await;
        let Some(owner) = self.sync_session(&mut cache) else {
            return Ok(());
        };
        self.reload(&mut cache, &owner).await
    }

    /// Validates a draft, persists it, then reloads.
    ///
    /// Validation failures never reach the adapter and leave the published
    /// state untouched. No session is a silent no-op.
    pub async fn add(&self, draft: TransactionDraft) -> ResultLedger<()> {
        let mut cache = self.cache.lock().await;
        let Some(owner) = self.sync_session(&mut cache) else {
            return Ok(());
        };
        let tx = draft.into_transaction(&owner)?;

        if let Err(err) = self.call(self.store.create(&tx)).await {
            return Err(self.fail(&cache, err));
        }
        self.reload(&mut cache, &owner).await
    }

    /// Whole-record replacement keyed by `tx.id`, then a reload.
    ///
    /// The record's owner is forced to the session owner, so records cannot
    /// migrate between owners through this API. A missing target surfaces as
    /// [`StoreError::NotFound`].
    pub async fn update(&self, tx: Transaction) -> ResultLedger<()> {
        let mut cache = self.cache.lock().await;
        let Some(owner) = self.sync_session(&mut cache) else {
            return Ok(());
        };
        validate_record(&tx)?;
        let mut tx = tx;
        tx.owner_id = owner.clone();

        if let Err(err) = self.call(self.store.update(&tx)).await {
            return Err(self.fail(&cache, err));
        }
        self.reload(&mut cache, &owner).await
    }

    /// Deletes by id, then reloads. Deleting a missing id is not an error.
    pub async fn delete(&self, id: &str) -> ResultLedger<()> {
        let mut cache = self.cache.lock().await;
        let Some(owner) = self.sync_session(&mut cache) else {
            return Ok(());
        };

        if let Err(err) = self.call(self.store.delete(id)).await {
            return Err(self.fail(&cache, err));
        }
        self.reload(&mut cache, &owner).await
    }

    /// Drops the cached transactions and publishes an empty snapshot.
    ///
    /// The session gate is re-read on the next operation, so this is safe to
    /// call eagerly on sign-out.
    pub async fn clear(&self) {
        let mut cache = self.cache.lock().await;
        cache.owner = None;
        cache.transactions.clear();
        self.publish(&cache, false, None);
    }

    /// Compares the session's current owner with the owner the cache was
    /// loaded for; any change (sign-out included) drops the cache before the
    /// operation proceeds.
    fn sync_session(&self, cache: &mut Cache) -> Option<String> {
        let owner = self.session.owner_id();
        if cache.owner != owner {
            cache.owner = owner.clone();
            cache.transactions.clear();
            self.publish(cache, false, None);
        }
        owner
    }

    async fn reload(&self, cache: &mut Cache, owner: &str) -> ResultLedger<()> {
        let last_error = self.state.borrow().error.clone();
        self.publish(cache, true, last_error);

        match self.call(self.store.list_by_owner(owner)).await {
            Ok(transactions) => {
                cache.transactions = transactions;
                self.publish(cache, false, None);
                Ok(())
            }
            Err(err) => Err(self.fail(cache, err)),
        }
    }

    /// Publishes the failure and keeps the cache untouched. No retry.
    fn fail(&self, cache: &Cache, err: StoreError) -> LedgerError {
        tracing::warn!("store operation failed: {err}");
        self.publish(cache, false, Some(err.to_string()));
        LedgerError::Store(err)
    }

    fn publish(&self, cache: &Cache, loading: bool, error: Option<String>) {
        self.state.send_replace(LedgerState {
            transactions: cache.transactions.clone(),
            summary: summarize(&cache.transactions),
            loading,
            error,
        });
    }

    async fn call<T>(
        &self,
        fut: impl Future<Output = Result<T, StoreError>>,
    ) -> Result<T, StoreError> {
        match tokio::time::timeout(self.call_timeout, fut).await {
            Ok(res) => res,
            Err(_) => Err(StoreError::Unavailable(format!(
                "store call timed out after {:?}",
                self.call_timeout
            ))),
        }
    }
}

fn validate_record(tx: &Transaction) -> ResultLedger<()> {
    if tx.id.is_empty() {
        return Err(LedgerError::InvalidDraft(
            "missing transaction id".to_string(),
        ));
    }
    if tx.amount.is_zero() {
        return Err(LedgerError::InvalidDraft("amount must be > 0".to_string()));
    }
    if tx.category.trim().is_empty() {
        return Err(LedgerError::InvalidDraft(
            "category must not be blank".to_string(),
        ));
    }
    Ok(())
}

/// The builder for `LedgerStore`.
pub struct LedgerStoreBuilder {
    store: Arc<dyn TransactionStore>,
    session: Arc<dyn SessionGate>,
    call_timeout: Duration,
}

impl LedgerStoreBuilder {
    /// Bounds every adapter call; an elapsed timeout surfaces as
    /// [`StoreError::Unavailable`].
    #[must_use]
    pub fn call_timeout(mut self, timeout: Duration) -> Self {
        self.call_timeout = timeout;
        self
    }

    /// Construct the `LedgerStore`: idle, cache empty.
    #[must_use]
    pub fn build(self) -> LedgerStore {
        let (state, _) = watch::channel(LedgerState::default());
        LedgerStore {
            store: self.store,
            session: self.session,
            call_timeout: self.call_timeout,
            cache: Mutex::new(Cache::default()),
            state,
        }
    }
}
