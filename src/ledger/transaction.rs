use std::fmt;
use std::hash::{Hash, Hasher};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Stable identity of a recorded transaction.
///
/// Ids are assigned by the owning [`Journal`](super::Journal) from a
/// monotonically increasing sequence and are never reassigned.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct TransactionId(pub u64);

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Whether a transaction adds to or draws from the balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    /// Parses the user-facing spelling, case-insensitively.
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "income" => Some(Self::Income),
            "expense" => Some(Self::Expense),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Income => "INCOME",
            Self::Expense => "EXPENSE",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single income or expense record.
///
/// Every field except the id is freely mutable. The amount carries no
/// enforced sign relationship to the kind; an expense may hold a negative
/// amount.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    id: TransactionId,
    pub title: String,
    pub category: String,
    pub amount: f64,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
}

impl Transaction {
    /// Assembles a record under a journal-assigned id. Performs no
    /// validation; callers reject empty titles and unparsable input first.
    pub fn new(
        id: TransactionId,
        title: impl Into<String>,
        category: impl Into<String>,
        amount: f64,
        date: NaiveDate,
        kind: TransactionKind,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            category: category.into(),
            amount,
            date,
            kind,
        }
    }

    pub fn id(&self) -> TransactionId {
        self.id
    }
}

/// Two transactions are the same record exactly when their ids match.
impl PartialEq for Transaction {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Transaction {}

impl Hash for Transaction {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Monotonic id source owned by a journal. Reseeding happens exactly once,
/// right after a bulk load, so fresh ids never collide with persisted ones.
#[derive(Debug, Clone, Default)]
pub(crate) struct IdSequence {
    last: u64,
}

impl IdSequence {
    pub(crate) fn seeded(last: u64) -> Self {
        Self { last }
    }

    pub(crate) fn next(&mut self) -> TransactionId {
        self.last += 1;
        TransactionId(self.last)
    }
}
