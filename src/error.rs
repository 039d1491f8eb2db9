//! Error kinds surfaced by the cost ledger.
//!
//! Budget overruns are deliberately absent: they are reported through
//! [`crate::models::RecordOutcome`] and a log warning, never as an error.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LedgerError {
    /// Rejected before any mutation; the store is untouched.
    #[error("invalid {field}: {reason}")]
    InvalidInput {
        field: &'static str,
        reason: String,
    },

    /// The store (or its lock file) could not be read, written or replaced.
    #[error("ledger store {}: {source}", path.display())]
    Persistence {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The store exists but is not a valid ledger document.
    #[error("ledger store {} is corrupt: {source}", path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode ledger state: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("failed to export ledger to {}: {source}", path.display())]
    Export {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

impl LedgerError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field,
            reason: reason.into(),
        }
    }

    pub(crate) fn persistence(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Persistence {
            path: path.into(),
            source,
        }
    }

    /// True for failures that threaten durability (store unreadable/unwritable).
    pub fn is_persistence(&self) -> bool {
        matches!(self, Self::Persistence { .. } | Self::Corrupt { .. })
    }
}

pub type LedgerResult<T> = Result<T, LedgerError>;
