pub use amount::Amount;
pub use date::TxDate;
pub use error::{LedgerError, StoreError};
pub use session::{SessionGate, SessionHandle};
pub use state::{LedgerState, LedgerStore, LedgerStoreBuilder};
pub use store::{HttpStore, MemoryStore, TransactionStore};
pub use summary::{LedgerSummary, summarize};
pub use transaction::{
    CATEGORIES, CategoryInfo, Transaction, TransactionDraft, TransactionKind,
};

mod amount;
mod date;
mod error;
mod session;
mod state;
mod store;
mod summary;
mod transaction;

type ResultLedger<T> = Result<T, LedgerError>;
