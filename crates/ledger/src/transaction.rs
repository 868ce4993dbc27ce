//! Transaction primitives.
//!
//! A `Transaction` is a single income or expense record belonging to one
//! owner; a `TransactionDraft` is the presentation-layer input before the
//! remote store has assigned an id.

use api_types::transaction::{TransactionDoc, TransactionKind as WireKind};
use serde::{Deserialize, Serialize};

use crate::{Amount, LedgerError, ResultLedger, TxDate};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl TryFrom<&str> for TransactionKind {
    type Error = LedgerError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            other => Err(LedgerError::InvalidDraft(format!(
                "invalid transaction kind: {other}"
            ))),
        }
    }
}

impl From<TransactionKind> for WireKind {
    fn from(kind: TransactionKind) -> Self {
        match kind {
            TransactionKind::Income => WireKind::Income,
            TransactionKind::Expense => WireKind::Expense,
        }
    }
}

impl From<WireKind> for TransactionKind {
    fn from(kind: WireKind) -> Self {
        match kind {
            WireKind::Income => TransactionKind::Income,
            WireKind::Expense => TransactionKind::Expense,
        }
    }
}

/// A well-known category with the label pickers display for it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CategoryInfo {
    pub name: &'static str,
    pub label: &'static str,
}

/// Fixed registry of well-known categories.
///
/// `Transaction::category` stays free text; this slice only feeds pickers
/// and display labels.
pub const CATEGORIES: &[CategoryInfo] = &[
    CategoryInfo { name: "food", label: "Food & Dining" },
    CategoryInfo { name: "rent", label: "Rent & Housing" },
    CategoryInfo { name: "travel", label: "Travel & Transport" },
    CategoryInfo { name: "shopping", label: "Shopping" },
    CategoryInfo { name: "entertainment", label: "Entertainment" },
    CategoryInfo { name: "utilities", label: "Utilities" },
    CategoryInfo { name: "healthcare", label: "Healthcare" },
    CategoryInfo { name: "other", label: "Other" },
];

/// A transaction record owned by one session principal.
///
/// `id` is empty until the store assigns one on creation; afterwards it is
/// immutable and the sole identity key for update/delete. `owner_id` is set
/// exactly once at creation and never transferred.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub title: String,
    pub category: String,
    pub amount: Amount,
    pub kind: TransactionKind,
    pub date: TxDate,
    pub owner_id: String,
}

impl Transaction {
    /// `true` until the store has assigned an id.
    #[must_use]
    pub fn is_draft(&self) -> bool {
        self.id.is_empty()
    }
}

/// Presentation-layer input for a new transaction: no id, no owner.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransactionDraft {
    pub title: String,
    pub category: String,
    pub amount: Amount,
    pub kind: TransactionKind,
    pub date: TxDate,
}

impl TransactionDraft {
    /// Validates the draft and binds it to `owner_id`.
    ///
    /// Rules: `amount > 0`, `category` non-blank. A blank title defaults to
    /// the category name.
    pub fn into_transaction(self, owner_id: &str) -> ResultLedger<Transaction> {
        if self.amount.is_zero() {
            return Err(LedgerError::InvalidDraft("amount must be > 0".to_string()));
        }
        if self.category.trim().is_empty() {
            return Err(LedgerError::InvalidDraft(
                "category must not be blank".to_string(),
            ));
        }
        let title = if self.title.trim().is_empty() {
            self.category.clone()
        } else {
            self.title
        };
        Ok(Transaction {
            id: String::new(),
            title,
            category: self.category,
            amount: self.amount,
            kind: self.kind,
            date: self.date,
            owner_id: owner_id.to_string(),
        })
    }
}

impl From<&Transaction> for TransactionDoc {
    fn from(tx: &Transaction) -> Self {
        Self {
            id: tx.id.clone(),
            title: tx.title.clone(),
            category: tx.category.clone(),
            amount_minor: tx.amount.minor(),
            kind: tx.kind.into(),
            date: tx.date.to_string(),
            owner_id: tx.owner_id.clone(),
        }
    }
}

impl TryFrom<TransactionDoc> for Transaction {
    type Error = LedgerError;

    fn try_from(doc: TransactionDoc) -> Result<Self, Self::Error> {
        Ok(Self {
            id: doc.id,
            title: doc.title,
            category: doc.category,
            amount: Amount::from_minor(doc.amount_minor)?,
            kind: doc.kind.into(),
            date: doc.date.parse()?,
            owner_id: doc.owner_id,
        })
    }
}
