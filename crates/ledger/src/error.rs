//! The errors the ledger engine can surface.
//!
//! Two layers:
//!
//! - [`StoreError`] is the adapter taxonomy: the remote store is unreachable
//!   (or denied the call), or an update/delete target does not exist.
//! - [`LedgerError`] is what state-store operations return: a draft rejected
//!   before any I/O, or a wrapped store failure.
use thiserror::Error;

/// Failures at the remote store boundary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error("\"{0}\" not found")]
    NotFound(String),
}

/// Ledger state store errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("invalid draft: {0}")]
    InvalidDraft(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}
