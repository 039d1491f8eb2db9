pub mod ledger;
pub mod status;
pub mod transaction;

pub use ledger::LedgerState;
pub use status::{BudgetStatus, RecordOutcome};
pub use transaction::Transaction;
