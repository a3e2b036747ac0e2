//! Transaction records and the in-memory journal that owns them.

pub mod journal;
pub mod transaction;

pub use journal::Journal;
pub use transaction::{Transaction, TransactionId, TransactionKind};
