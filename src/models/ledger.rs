use serde::{Deserialize, Serialize};

use crate::models::transaction::Transaction;

/// Persisted aggregate: running totals plus the append-only transaction log.
///
/// `total_spent` covers every transaction ever recorded; `monthly_spent`
/// covers those recorded since the last explicit monthly reset. Both are
/// maintained incrementally by [`LedgerState::append`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LedgerState {
    #[serde(default)]
    pub total_spent: f64,
    #[serde(default)]
    pub monthly_spent: f64,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
}

impl LedgerState {
    pub fn append(&mut self, transaction: Transaction) {
        self.total_spent += transaction.cost;
        self.monthly_spent += transaction.cost;
        self.transactions.push(transaction);
    }

    /// Sum of `cost` over the full history, recomputed from scratch.
    pub fn reconciled_total(&self) -> f64 {
        self.transactions.iter().map(|t| t.cost).sum()
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}
