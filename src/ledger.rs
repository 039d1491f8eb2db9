//! Durable cost ledger with budget advisories.
//!
//! The ledger is a single JSON document (`expenses.json`) holding running
//! totals and the append-only transaction log. It provides:
//! - load-once caching for the lifetime of a [`CostLedger`]
//! - whole-file atomic persistence after every mutation
//! - an advisory file lock around each load-mutate-persist cycle, so
//!   concurrent pipeline processes never lose each other's updates
//! - CSV export of the full history

use fs2::FileExt;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::error::{LedgerError, LedgerResult};
use crate::models::{BudgetStatus, LedgerState, RecordOutcome, Transaction};
use crate::utils::write_atomic;

pub const DEFAULT_MONTHLY_LIMIT: f64 = 100.0;

pub const CSV_HEADER: [&str; 5] = ["Date", "Service", "Cost", "Description", "Transaction ID"];

/// Advisory lock on `<store>.lock`, released on drop.
///
/// Writers take it exclusively. Readers take it shared and never create it,
/// so read-only commands leave the data directory untouched.
struct StoreLock {
    file: File,
}

impl StoreLock {
    fn exclusive(store: &Path) -> LedgerResult<Self> {
        let lock_path = store.with_extension("lock");
        if let Some(parent) = lock_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| LedgerError::persistence(parent, e))?;
        }
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .read(true)
            .write(true)
            .open(&lock_path)
            .map_err(|e| LedgerError::persistence(&lock_path, e))?;
        file.lock_exclusive()
            .map_err(|e| LedgerError::persistence(&lock_path, e))?;
        Ok(Self { file })
    }

    /// `None` when no writer has created the lock file yet.
    fn shared(store: &Path) -> LedgerResult<Option<Self>> {
        let lock_path = store.with_extension("lock");
        let file = match File::open(&lock_path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(LedgerError::persistence(&lock_path, e)),
        };
        file.lock_shared()
            .map_err(|e| LedgerError::persistence(&lock_path, e))?;
        Ok(Some(Self { file }))
    }
}

impl Drop for StoreLock {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.file);
    }
}

/// Read the store under a shared lock. A missing store needs no lock.
fn read_state(path: &Path) -> LedgerResult<LedgerState> {
    if !path.exists() {
        return load_state(path);
    }
    let _lock = StoreLock::shared(path)?;
    load_state(path)
}

/// Read the store. A missing file is an empty ledger; anything else that
/// goes wrong is an error, never a silent reset.
fn load_state(path: &Path) -> LedgerResult<LedgerState> {
    match fs::read(path) {
        Ok(bytes) => {
            let state: LedgerState =
                serde_json::from_slice(&bytes).map_err(|source| LedgerError::Corrupt {
                    path: path.to_path_buf(),
                    source,
                })?;
            debug!(
                path = %path.display(),
                transactions = state.transactions.len(),
                "loaded ledger"
            );
            Ok(state)
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "no ledger yet, starting empty");
            Ok(LedgerState::default())
        }
        Err(e) => Err(LedgerError::persistence(path, e)),
    }
}

fn save_state(path: &Path, state: &LedgerState) -> LedgerResult<()> {
    let body = serde_json::to_vec_pretty(state).map_err(LedgerError::Encode)?;
    write_atomic(path, &body).map_err(|e| LedgerError::persistence(path, e))?;
    debug!(
        path = %path.display(),
        transactions = state.transactions.len(),
        "saved ledger"
    );
    Ok(())
}

/// Process-wide handle on the persisted ledger.
///
/// Construct once with [`CostLedger::open`] and pass by reference to every
/// pipeline stage that incurs cost.
#[derive(Debug)]
pub struct CostLedger {
    path: PathBuf,
    state: LedgerState,
    monthly_limit: f64,
}

impl CostLedger {
    /// Load the ledger at `path` (empty if the file does not exist yet).
    pub fn open(path: impl Into<PathBuf>, monthly_limit: f64) -> LedgerResult<Self> {
        let path = path.into();
        let state = read_state(&path)?;
        Ok(Self {
            path,
            state,
            monthly_limit,
        })
    }

    /// Run `mutate` against the freshest on-disk state while holding the
    /// store lock, persist the result, then refresh the cache. On any
    /// failure the cache is left as it was.
    fn update<T>(&mut self, mutate: impl FnOnce(&mut LedgerState) -> T) -> LedgerResult<T> {
        let _lock = StoreLock::exclusive(&self.path)?;
        let mut state = load_state(&self.path)?;
        let out = mutate(&mut state);
        save_state(&self.path, &state)?;
        self.state = state;
        Ok(out)
    }

    /// Append a billable event and persist it before returning.
    ///
    /// The monthly limit is checked after the write: exceeding it logs a
    /// warning and sets [`RecordOutcome::budget_exceeded`], but the
    /// transaction stays recorded.
    pub fn record(
        &mut self,
        service: &str,
        cost: f64,
        description: &str,
    ) -> LedgerResult<RecordOutcome> {
        let service = service.trim();
        if service.is_empty() {
            return Err(LedgerError::invalid("service", "must not be empty"));
        }
        if !cost.is_finite() {
            return Err(LedgerError::invalid("cost", format!("{cost} is not a number")));
        }
        if cost < 0.0 {
            return Err(LedgerError::invalid("cost", format!("{cost} is negative")));
        }
        // Normalize -0.0
        let cost = cost.abs();

        let transaction = Transaction::new(service, cost, description);
        let appended = transaction.clone();
        let monthly_spent = self.update(move |state| {
            state.append(appended);
            state.monthly_spent
        })?;

        debug!(
            id = %transaction.id,
            service = %transaction.service,
            cost,
            monthly_spent,
            "recorded expense"
        );

        let budget_exceeded = monthly_spent > self.monthly_limit;
        if budget_exceeded {
            warn!(
                monthly_spent,
                monthly_limit = self.monthly_limit,
                service = %transaction.service,
                "monthly budget exceeded"
            );
        }

        Ok(RecordOutcome {
            transaction,
            monthly_spent,
            monthly_limit: self.monthly_limit,
            budget_exceeded,
        })
    }

    /// Zero the monthly counter. History and lifetime total are kept.
    pub fn reset_monthly(&mut self) -> LedgerResult<()> {
        self.update(|state| state.monthly_spent = 0.0)?;
        debug!(path = %self.path.display(), "monthly spend reset");
        Ok(())
    }

    /// Re-read the store, picking up writes from other processes.
    pub fn reload(&mut self) -> LedgerResult<()> {
        self.state = read_state(&self.path)?;
        Ok(())
    }

    pub fn status(&self) -> BudgetStatus {
        BudgetStatus::new(self.monthly_limit, &self.state)
    }

    /// The last `n` transactions, oldest first.
    pub fn recent_transactions(&self, n: usize) -> &[Transaction] {
        let all = &self.state.transactions;
        &all[all.len().saturating_sub(n)..]
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.state.transactions
    }

    pub fn state(&self) -> &LedgerState {
        &self.state
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn monthly_limit(&self) -> f64 {
        self.monthly_limit
    }

    pub fn set_monthly_limit(&mut self, monthly_limit: f64) {
        self.monthly_limit = monthly_limit;
    }

    /// Write every transaction as CSV to `writer`. Returns the row count.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<usize, csv::Error> {
        let mut out = csv::Writer::from_writer(writer);
        out.write_record(CSV_HEADER)?;
        for t in &self.state.transactions {
            out.write_record([
                t.timestamp.to_rfc3339().as_str(),
                t.service.as_str(),
                format!("{:?}", t.cost).as_str(),
                t.description.as_str(),
                t.id.as_str(),
            ])?;
        }
        out.flush()?;
        Ok(self.state.transactions.len())
    }

    /// Export the full history to a CSV file at `destination`.
    pub fn export_csv(&self, destination: &Path) -> LedgerResult<usize> {
        if let Some(parent) = destination.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| LedgerError::persistence(parent, e))?;
        }
        let file = File::create(destination).map_err(|e| LedgerError::persistence(destination, e))?;
        let rows = self
            .write_csv(io::BufWriter::new(file))
            .map_err(|source| LedgerError::Export {
                path: destination.to_path_buf(),
                source,
            })?;
        debug!(path = %destination.display(), rows, "exported ledger");
        Ok(rows)
    }
}
