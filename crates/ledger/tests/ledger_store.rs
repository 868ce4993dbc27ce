use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};
use std::time::Duration;

use async_trait::async_trait;
use ledger::{
    Amount, LedgerError, LedgerStore, MemoryStore, SessionHandle, StoreError, Transaction,
    TransactionDraft, TransactionKind, TransactionStore,
};

fn draft(
    title: &str,
    category: &str,
    amount_minor: i64,
    kind: TransactionKind,
    date: &str,
) -> TransactionDraft {
    TransactionDraft {
        title: title.to_string(),
        category: category.to_string(),
        amount: Amount::from_minor(amount_minor).unwrap(),
        kind,
        date: date.parse().unwrap(),
    }
}

fn coffee() -> TransactionDraft {
    draft("Coffee", "food", 50_00, TransactionKind::Expense, "01-01-2025")
}

fn ledger_for(owner: &str) -> (Arc<MemoryStore>, Arc<SessionHandle>, LedgerStore) {
    let backing = Arc::new(MemoryStore::new());
    let session = Arc::new(SessionHandle::new());
    session.sign_in(owner);
    let store = LedgerStore::builder(backing.clone(), session.clone()).build();
    (backing, session, store)
}

/// Store that can be flipped into an unavailable state mid-test.
struct FlakyStore {
    inner: MemoryStore,
    fail: AtomicBool,
}

impl FlakyStore {
    fn new() -> Self {
        Self {
            inner: MemoryStore::new(),
            fail: AtomicBool::new(false),
        }
    }

    fn set_failing(&self, failing: bool) {
        self.fail.store(failing, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("store offline".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl TransactionStore for FlakyStore {
    async fn create(&self, tx: &Transaction) -> Result<Transaction, StoreError> {
        self.check()?;
        self.inner.create(tx).await
    }

    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<Transaction>, StoreError> {
        self.check()?;
        self.inner.list_by_owner(owner_id).await
    }

    async fn update(&self, tx: &Transaction) -> Result<(), StoreError> {
        self.check()?;
        self.inner.update(tx).await
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        self.check()?;
        self.inner.delete(id).await
    }
}

/// Store whose calls never complete; only the call timeout gets them back.
struct StalledStore;

#[async_trait]
impl TransactionStore for StalledStore {
    async fn create(&self, _tx: &Transaction) -> Result<Transaction, StoreError> {
        std::future::pending().await
    }

    async fn list_by_owner(&self, _owner_id: &str) -> Result<Vec<Transaction>, StoreError> {
        std::future::pending().await
    }

    async fn update(&self, _tx: &Transaction) -> Result<(), StoreError> {
        std::future::pending().await
    }

    async fn delete(&self, _id: &str) -> Result<(), StoreError> {
        std::future::pending().await
    }
}

#[tokio::test]
async fn add_reloads_and_aggregates_a_single_expense() {
    let (_, _, store) = ledger_for("u1");

    store.add(coffee()).await.unwrap();

    let state = store.state();
    assert_eq!(state.transactions.len(), 1);
    assert!(!state.transactions[0].id.is_empty());
    assert_eq!(state.transactions[0].title, "Coffee");
    assert_eq!(state.summary.expense_total.minor(), 50_00);
    assert_eq!(state.summary.balance_minor, -50_00);
    assert!(!state.loading);
    assert_eq!(state.error, None);
}

#[tokio::test]
async fn income_and_expense_balance_out() {
    let (_, _, store) = ledger_for("u1");

    store
        .add(draft("Salary", "other", 1000_00, TransactionKind::Income, "01-01-2025"))
        .await
        .unwrap();
    store
        .add(draft("Groceries", "food", 300_00, TransactionKind::Expense, "02-01-2025"))
        .await
        .unwrap();

    let summary = store.state().summary;
    assert_eq!(summary.income_total.minor(), 1000_00);
    assert_eq!(summary.expense_total.minor(), 300_00);
    assert_eq!(summary.balance_minor, 700_00);
}

#[tokio::test]
async fn update_replaces_the_record_instead_of_adding() {
    let (_, _, store) = ledger_for("u1");
    store.add(coffee()).await.unwrap();

    let mut tx = store.state().transactions[0].clone();
    tx.amount = Amount::from_minor(80_00).unwrap();
    store.update(tx).await.unwrap();

    let state = store.state();
    assert_eq!(state.transactions.len(), 1);
    assert_eq!(state.summary.expense_total.minor(), 80_00);
}

#[tokio::test]
async fn concurrent_adds_both_land() {
    let (_, _, store) = ledger_for("u1");

    let first = draft("One", "food", 10_00, TransactionKind::Expense, "01-01-2025");
    let second = draft("Two", "food", 20_00, TransactionKind::Expense, "01-01-2025");
    let (a, b) = tokio::join!(store.add(first), store.add(second));
    a.unwrap();
    b.unwrap();

    let state = store.state();
    assert_eq!(state.transactions.len(), 2);
    assert_eq!(state.summary.expense_total.minor(), 30_00);
}

#[tokio::test]
async fn added_record_matches_the_draft_except_for_the_id() {
    let (_, _, store) = ledger_for("u1");
    store.add(coffee()).await.unwrap();

    let tx = &store.state().transactions[0];
    assert_eq!(tx.title, "Coffee");
    assert_eq!(tx.category, "food");
    assert_eq!(tx.amount.minor(), 50_00);
    assert_eq!(tx.kind, TransactionKind::Expense);
    assert_eq!(tx.date.to_string(), "01-01-2025");
    assert_eq!(tx.owner_id, "u1");
    assert!(!tx.id.is_empty());
}

#[tokio::test]
async fn invalid_draft_never_reaches_the_adapter() {
    let (backing, _, store) = ledger_for("u1");

    let err = store
        .add(draft("Coffee", "food", 0, TransactionKind::Expense, "01-01-2025"))
        .await
        .unwrap_err();
    assert!(matches!(err, LedgerError::InvalidDraft(_)));

    let err = store
        .add(draft("Coffee", "", 50_00, TransactionKind::Expense, "01-01-2025"))
        .await
        .unwrap_err();
    assert!(matches!(err, LedgerError::InvalidDraft(_)));

    assert!(backing.list_by_owner("u1").await.unwrap().is_empty());
    // Rejected locally: the published state never saw an error either.
    assert_eq!(store.state().error, None);
}

#[tokio::test]
async fn no_session_is_a_silent_no_op() {
    let backing = Arc::new(MemoryStore::new());
    let session = Arc::new(SessionHandle::new());
    let store = LedgerStore::builder(backing.clone(), session).build();

    store.load().await.unwrap();
    store.add(coffee()).await.unwrap();
    store.delete("anything").await.unwrap();

    assert!(backing.list_by_owner("u1").await.unwrap().is_empty());
    assert!(store.state().transactions.is_empty());
}

#[tokio::test]
async fn sign_out_clears_the_cache() {
    let (_, session, store) = ledger_for("u1");
    store.add(coffee()).await.unwrap();
    assert_eq!(store.state().transactions.len(), 1);

    session.sign_out();
    store.load().await.unwrap();

    let state = store.state();
    assert!(state.transactions.is_empty());
    assert_eq!(state.summary.balance_minor, 0);
}

#[tokio::test]
async fn explicit_clear_publishes_an_empty_snapshot() {
    let (_, _, store) = ledger_for("u1");
    store.add(coffee()).await.unwrap();

    store.clear().await;
    let state = store.state();
    assert!(state.transactions.is_empty());
    assert_eq!(state.summary.balance_minor, 0);

    // The record itself survives in the remote store; a reload brings it back.
    store.load().await.unwrap();
    assert_eq!(store.state().transactions.len(), 1);
}

#[tokio::test]
async fn owner_switch_does_not_leak_records() {
    let (_, session, store) = ledger_for("u1");
    store.add(coffee()).await.unwrap();

    session.sign_in("u2");
    store.load().await.unwrap();
    assert!(store.state().transactions.is_empty());

    session.sign_in("u1");
    store.load().await.unwrap();
    assert_eq!(store.state().transactions.len(), 1);
}

#[tokio::test]
async fn deleting_a_missing_id_changes_nothing() {
    let (_, _, store) = ledger_for("u1");
    store.add(coffee()).await.unwrap();

    store.delete("never-existed").await.unwrap();

    let state = store.state();
    assert_eq!(state.transactions.len(), 1);
    assert_eq!(state.error, None);
}

#[tokio::test]
async fn update_of_a_missing_target_surfaces_not_found_and_keeps_cache() {
    let (_, _, store) = ledger_for("u1");
    store.add(coffee()).await.unwrap();

    let mut tx = store.state().transactions[0].clone();
    tx.id = "missing".to_string();
    let err = store.update(tx).await.unwrap_err();
    assert_eq!(
        err,
        LedgerError::Store(StoreError::NotFound("missing".to_string()))
    );

    let state = store.state();
    assert_eq!(state.transactions.len(), 1);
    assert!(state.error.is_some());
}

#[tokio::test]
async fn adapter_failure_preserves_last_known_data() {
    let backing = Arc::new(FlakyStore::new());
    let session = Arc::new(SessionHandle::new());
    session.sign_in("u1");
    let store = LedgerStore::builder(backing.clone(), session).build();

    store.add(coffee()).await.unwrap();
    backing.set_failing(true);

    let err = store.load().await.unwrap_err();
    assert!(matches!(err, LedgerError::Store(StoreError::Unavailable(_))));

    let state = store.state();
    assert_eq!(state.transactions.len(), 1);
    assert_eq!(state.summary.expense_total.minor(), 50_00);
    assert!(state.error.is_some());
    assert!(!state.loading);

    // Recovery clears the published error.
    backing.set_failing(false);
    store.load().await.unwrap();
    assert_eq!(store.state().error, None);
}

#[tokio::test]
async fn stalled_store_calls_hit_the_bounded_timeout() {
    let session = Arc::new(SessionHandle::new());
    session.sign_in("u1");
    let store = LedgerStore::builder(Arc::new(StalledStore), session)
        .call_timeout(Duration::from_millis(50))
        .build();

    let err = store.load().await.unwrap_err();
    assert!(matches!(err, LedgerError::Store(StoreError::Unavailable(_))));
}

#[tokio::test]
async fn subscribers_observe_the_final_snapshot() {
    let (_, _, store) = ledger_for("u1");
    let mut rx = store.subscribe();

    store.add(coffee()).await.unwrap();

    rx.changed().await.unwrap();
    let state = rx.borrow_and_update().clone();
    assert_eq!(state.transactions.len(), 1);
}
