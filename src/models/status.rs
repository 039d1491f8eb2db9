use serde::Serialize;

use crate::models::ledger::LedgerState;
use crate::models::transaction::Transaction;

/// Read-only snapshot of the budget position.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BudgetStatus {
    pub monthly_limit: f64,
    pub monthly_spent: f64,
    /// `monthly_limit - monthly_spent`; negative once over budget.
    pub remaining: f64,
    pub total_spent: f64,
    pub transaction_count: usize,
}

impl BudgetStatus {
    pub fn new(monthly_limit: f64, state: &LedgerState) -> Self {
        Self {
            monthly_limit,
            monthly_spent: state.monthly_spent,
            remaining: monthly_limit - state.monthly_spent,
            total_spent: state.total_spent,
            transaction_count: state.transactions.len(),
        }
    }

    pub fn is_over_budget(&self) -> bool {
        self.monthly_spent > self.monthly_limit
    }
}

/// Result of a successful `record` call.
#[derive(Clone, Debug, Serialize)]
pub struct RecordOutcome {
    pub transaction: Transaction,
    pub monthly_spent: f64,
    pub monthly_limit: f64,
    /// Advisory only: the expense is already recorded.
    pub budget_exceeded: bool,
}
