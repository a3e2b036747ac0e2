use std::path::Path;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::info;

use crate::ledger::{Transaction, TransactionKind};
use crate::utils::ensure_dir;

use super::Result;

/// One exported line. Field order fixes the column order and the serde
/// renames fix the header spelling.
#[derive(Debug, Serialize)]
struct Row<'a> {
    #[serde(rename = "ID")]
    id: u64,
    #[serde(rename = "Title")]
    title: &'a str,
    #[serde(rename = "Category")]
    category: &'a str,
    #[serde(rename = "Amount")]
    amount: f64,
    #[serde(rename = "Date")]
    date: NaiveDate,
    #[serde(rename = "Type")]
    kind: TransactionKind,
}

impl<'a> From<&'a Transaction> for Row<'a> {
    fn from(tx: &'a Transaction) -> Self {
        Self {
            id: tx.id().0,
            title: &tx.title,
            category: &tx.category,
            amount: tx.amount,
            date: tx.date,
            kind: tx.kind,
        }
    }
}

/// Writes the journal to `path` as CSV, header first, entries in journal
/// order. Fields are quoted only when they contain a delimiter, quote, or
/// line break.
pub fn export_csv(path: &Path, entries: &[Transaction]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_dir(parent)?;
        }
    }
    let mut writer = csv::Writer::from_path(path)?;
    if entries.is_empty() {
        // serialize() only emits the header alongside the first record.
        writer.write_record(["ID", "Title", "Category", "Amount", "Date", "Type"])?;
    }
    for tx in entries {
        writer.serialize(Row::from(tx))?;
    }
    writer.flush()?;
    info!(path = %path.display(), count = entries.len(), "exported journal to CSV");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::TransactionId;
    use std::fs;
    use tempfile::TempDir;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn header_and_rows_follow_journal_order() {
        let temp = TempDir::new().expect("temp dir");
        let path = temp.path().join("export.csv");
        let entries = vec![
            Transaction::new(
                TransactionId(1),
                "Groceries",
                "Food",
                32.4,
                date(2024, 2, 29),
                TransactionKind::Expense,
            ),
            Transaction::new(
                TransactionId(2),
                "Salary",
                "Salary",
                2500.0,
                date(2024, 2, 1),
                TransactionKind::Income,
            ),
        ];

        export_csv(&path, &entries).expect("export");
        let raw = fs::read_to_string(&path).expect("read csv");
        let mut lines = raw.lines();

        assert_eq!(lines.next(), Some("ID,Title,Category,Amount,Date,Type"));
        assert_eq!(lines.next(), Some("1,Groceries,Food,32.4,2024-02-29,EXPENSE"));
        assert_eq!(lines.next(), Some("2,Salary,Salary,2500.0,2024-02-01,INCOME"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn fields_with_commas_or_quotes_are_escaped() {
        let temp = TempDir::new().expect("temp dir");
        let path = temp.path().join("export.csv");
        let entries = vec![Transaction::new(
            TransactionId(3),
            "Dinner, drinks and \"dessert\"",
            "Entertainment",
            58.2,
            date(2024, 3, 9),
            TransactionKind::Expense,
        )];

        export_csv(&path, &entries).expect("export");
        let raw = fs::read_to_string(&path).expect("read csv");

        assert!(raw.contains("\"Dinner, drinks and \"\"dessert\"\"\""));
        assert!(raw.contains(",Entertainment,"));
    }

    #[test]
    fn empty_journal_exports_just_the_header() {
        let temp = TempDir::new().expect("temp dir");
        let path = temp.path().join("export.csv");

        export_csv(&path, &[]).expect("export");
        let raw = fs::read_to_string(&path).expect("read csv");

        assert_eq!(raw.trim_end(), "ID,Title,Category,Amount,Date,Type");
    }
}
