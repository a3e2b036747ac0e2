use std::path::Path;

use chrono::NaiveDate;
use tracing::{error, info};

use crate::errors::TrackerError;
use crate::ledger::{Journal, TransactionId, TransactionKind};
use crate::storage::{export_csv, StorageBackend};

/// Outcome of opening a journal from storage.
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    pub loaded: usize,
    pub warnings: Vec<String>,
}

/// Facade that coordinates the in-memory journal with its storage backend.
///
/// Every mutation persists the whole journal immediately. Persistence
/// failures never roll the in-memory change back; the `Result` half of each
/// mutation return value carries them so callers can warn the user.
pub struct JournalManager {
    journal: Journal,
    storage: Box<dyn StorageBackend>,
}

impl JournalManager {
    /// Loads the journal from storage. An unreadable backend degrades to an
    /// empty journal with a warning instead of failing startup.
    pub fn open(storage: Box<dyn StorageBackend>) -> (Self, LoadReport) {
        let mut report = LoadReport::default();
        let journal = match storage.load() {
            Ok(entries) => {
                report.loaded = entries.len();
                Journal::from_entries(entries)
            }
            Err(err) => {
                error!(error = %err, "failed to load journal, starting empty");
                report
                    .warnings
                    .push(format!("could not load saved transactions: {err}"));
                Journal::new()
            }
        };
        info!(count = report.loaded, "journal opened");
        (Self { journal, storage }, report)
    }

    pub fn journal(&self) -> &Journal {
        &self.journal
    }

    /// Mutable access for in-place edits. Call [`persist`](Self::persist)
    /// afterwards to write the change out.
    pub fn journal_mut(&mut self) -> &mut Journal {
        &mut self.journal
    }

    /// Records a transaction and saves the journal.
    pub fn add(
        &mut self,
        title: impl Into<String>,
        category: impl Into<String>,
        amount: f64,
        date: NaiveDate,
        kind: TransactionKind,
    ) -> (TransactionId, Result<(), TrackerError>) {
        let id = self.journal.add(title, category, amount, date, kind);
        (id, self.persist())
    }

    /// Removes a transaction and saves the journal. The journal is only
    /// rewritten when something was actually removed.
    pub fn remove(&mut self, id: TransactionId) -> (bool, Result<(), TrackerError>) {
        if !self.journal.remove(id) {
            return (false, Ok(()));
        }
        (true, self.persist())
    }

    pub fn export_csv(&self, path: &Path) -> Result<(), TrackerError> {
        export_csv(path, self.journal.entries())
    }

    /// Writes the current journal snapshot through the storage backend.
    pub fn persist(&self) -> Result<(), TrackerError> {
        if let Err(err) = self.storage.save(self.journal.entries()) {
            error!(error = %err, "failed to persist journal");
            return Err(err);
        }
        Ok(())
    }
}
