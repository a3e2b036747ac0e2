use chrono::NaiveDate;

use super::transaction::{IdSequence, Transaction, TransactionId, TransactionKind};

/// Ordered collection of transactions plus the id counter that feeds it.
///
/// Entries keep their insertion order; nothing here sorts by date. The
/// journal is purely in-memory, persistence lives behind
/// [`StorageBackend`](crate::storage::StorageBackend).
#[derive(Debug, Clone, Default)]
pub struct Journal {
    entries: Vec<Transaction>,
    ids: IdSequence,
}

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a journal from persisted entries, reseeding the id counter
    /// to the highest id present so fresh ids never collide.
    pub fn from_entries(entries: Vec<Transaction>) -> Self {
        let last = entries.iter().map(|tx| tx.id().0).max().unwrap_or(0);
        Self {
            entries,
            ids: IdSequence::seeded(last),
        }
    }

    /// Records a new transaction and returns its assigned id.
    pub fn add(
        &mut self,
        title: impl Into<String>,
        category: impl Into<String>,
        amount: f64,
        date: NaiveDate,
        kind: TransactionKind,
    ) -> TransactionId {
        let id = self.ids.next();
        self.entries
            .push(Transaction::new(id, title, category, amount, date, kind));
        id
    }

    /// Removes the transaction with the given id. Returns whether anything
    /// was removed; ids of the survivors are untouched.
    pub fn remove(&mut self, id: TransactionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|tx| tx.id() != id);
        self.entries.len() != before
    }

    pub fn get(&self, id: TransactionId) -> Option<&Transaction> {
        self.entries.iter().find(|tx| tx.id() == id)
    }

    pub fn get_mut(&mut self, id: TransactionId) -> Option<&mut Transaction> {
        self.entries.iter_mut().find(|tx| tx.id() == id)
    }

    /// All entries in insertion order.
    pub fn entries(&self) -> &[Transaction] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample(id: u64) -> Transaction {
        Transaction::new(
            TransactionId(id),
            format!("tx-{id}"),
            "Others",
            10.0,
            date(2024, 6, 1),
            TransactionKind::Expense,
        )
    }

    #[test]
    fn ids_start_at_one_and_stay_monotonic() {
        let mut journal = Journal::new();
        let a = journal.add("Coffee", "Food", 4.5, date(2024, 1, 2), TransactionKind::Expense);
        let b = journal.add("Salary", "Salary", 2000.0, date(2024, 1, 31), TransactionKind::Income);
        assert_eq!(a, TransactionId(1));
        assert_eq!(b, TransactionId(2));
    }

    #[test]
    fn reseeding_uses_the_highest_persisted_id() {
        let mut journal = Journal::from_entries(vec![sample(3), sample(7), sample(2)]);
        let next = journal.add("Bus", "Transport", 2.1, date(2024, 5, 5), TransactionKind::Expense);
        assert_eq!(next, TransactionId(8));
    }

    #[test]
    fn removing_frees_no_ids() {
        let mut journal = Journal::new();
        let first = journal.add("A", "Others", 1.0, date(2024, 1, 1), TransactionKind::Expense);
        let second = journal.add("B", "Others", 2.0, date(2024, 1, 2), TransactionKind::Expense);
        assert!(journal.remove(second));

        let third = journal.add("C", "Others", 3.0, date(2024, 1, 3), TransactionKind::Expense);
        assert_eq!(third, TransactionId(3));
        assert!(journal.get(first).is_some());
        assert!(journal.get(second).is_none());
    }

    #[test]
    fn remove_of_unknown_id_reports_false() {
        let mut journal = Journal::new();
        journal.add("A", "Others", 1.0, date(2024, 1, 1), TransactionKind::Expense);
        assert!(!journal.remove(TransactionId(42)));
        assert_eq!(journal.len(), 1);
    }

    #[test]
    fn entries_keep_insertion_order() {
        let mut journal = Journal::new();
        journal.add("first", "Others", 1.0, date(2024, 3, 1), TransactionKind::Expense);
        journal.add("second", "Others", 2.0, date(2024, 1, 1), TransactionKind::Expense);
        journal.add("third", "Others", 3.0, date(2024, 2, 1), TransactionKind::Income);

        let titles: Vec<_> = journal.entries().iter().map(|tx| tx.title.as_str()).collect();
        assert_eq!(titles, ["first", "second", "third"]);
    }

    #[test]
    fn get_mut_allows_field_edits_in_place() {
        let mut journal = Journal::new();
        let id = journal.add("Cofee", "Food", 4.5, date(2024, 1, 2), TransactionKind::Expense);
        journal.get_mut(id).unwrap().title = "Coffee".into();
        assert_eq!(journal.get(id).unwrap().title, "Coffee");
    }
}
