pub mod csv_export;
pub mod json_store;

use crate::errors::TrackerError;
use crate::ledger::Transaction;

pub type Result<T> = std::result::Result<T, TrackerError>;

/// Abstraction over persistence backends capable of storing a full journal.
///
/// Backends replace the stored snapshot wholesale on every save; there is no
/// incremental update path.
pub trait StorageBackend: Send + Sync {
    fn load(&self) -> Result<Vec<Transaction>>;
    fn save(&self, entries: &[Transaction]) -> Result<()>;
}

pub use csv_export::export_csv;
pub use json_store::JsonStore;
