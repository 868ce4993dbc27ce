use serde::{Deserialize, Serialize};

pub mod transaction {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum TransactionKind {
        Income,
        Expense,
    }

    impl TransactionKind {
        /// Returns the canonical kind string used on the wire.
        pub fn as_str(self) -> &'static str {
            match self {
                Self::Income => "income",
                Self::Expense => "expense",
            }
        }
    }

    /// A transaction record as stored in the document collection.
    ///
    /// `id` is assigned by the store; clients send an empty string when
    /// creating and receive the enriched document back.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct TransactionDoc {
        #[serde(default)]
        pub id: String,
        pub title: String,
        pub category: String,
        /// Amount in integer minor units (cents); never negative.
        pub amount_minor: i64,
        pub kind: TransactionKind,
        /// Calendar date in the fixed `dd-mm-yyyy` encoding (no time,
        /// no timezone).
        pub date: String,
        pub owner_id: String,
    }

    /// Response body for listing one owner's transactions.
    ///
    /// Ordering is unspecified; callers re-sort for display if they care.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransactionListResponse {
        pub transactions: Vec<TransactionDoc>,
    }

    /// Query parameters for the list endpoint.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransactionListQuery {
        pub owner_id: String,
    }
}

/// Error payload returned by the store on every non-success status.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
