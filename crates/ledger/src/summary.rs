use crate::{Amount, Transaction, TransactionKind};

/// Derived totals over one owner's transaction set.
///
/// `balance_minor` is signed: income minus expenses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LedgerSummary {
    pub income_total: Amount,
    pub expense_total: Amount,
    pub balance_minor: i64,
}

/// Computes income total, expense total, and their balance.
///
/// Pure: no I/O, order-independent, and calling it twice on the same input
/// yields identical output. An empty slice yields all zeros.
#[must_use]
pub fn summarize(transactions: &[Transaction]) -> LedgerSummary {
    let mut income_total = Amount::ZERO;
    let mut expense_total = Amount::ZERO;

    for tx in transactions {
        match tx.kind {
            TransactionKind::Income => income_total = income_total.saturating_add(tx.amount),
            TransactionKind::Expense => expense_total = expense_total.saturating_add(tx.amount),
        }
    }

    LedgerSummary {
        income_total,
        expense_total,
        balance_minor: income_total.minor() - expense_total.minor(),
    }
}
