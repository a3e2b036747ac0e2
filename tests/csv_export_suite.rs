use chrono::NaiveDate;
use std::fs;
use tempfile::tempdir;

use fintrack_core::ledger::{Transaction, TransactionId, TransactionKind};
use fintrack_core::storage::export_csv;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn export_writes_header_and_one_line_per_entry() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("out.csv");
    let entries = vec![
        Transaction::new(
            TransactionId(1),
            "Coffee",
            "Food",
            4.5,
            date(2024, 1, 10),
            TransactionKind::Expense,
        ),
        Transaction::new(
            TransactionId(2),
            "Paycheck",
            "Salary",
            2000.0,
            date(2024, 1, 31),
            TransactionKind::Income,
        ),
    ];

    export_csv(&path, &entries).expect("export");
    let raw = fs::read_to_string(&path).expect("read csv");

    let expected = "ID,Title,Category,Amount,Date,Type\n\
                    1,Coffee,Food,4.5,2024-01-10,EXPENSE\n\
                    2,Paycheck,Salary,2000.0,2024-01-31,INCOME\n";
    assert_eq!(raw, expected);
}

#[test]
fn comma_in_a_title_forces_quoting() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("out.csv");
    let entries = vec![Transaction::new(
        TransactionId(1),
        "Rent, March",
        "Bills",
        800.0,
        date(2024, 3, 1),
        TransactionKind::Expense,
    )];

    export_csv(&path, &entries).expect("export");
    let raw = fs::read_to_string(&path).expect("read csv");

    assert!(raw.contains("\"Rent, March\""));
}

#[test]
fn quotes_in_a_title_are_doubled() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("out.csv");
    let entries = vec![Transaction::new(
        TransactionId(1),
        "Bob's \"big\" sale",
        "Shopping",
        19.99,
        date(2024, 5, 20),
        TransactionKind::Expense,
    )];

    export_csv(&path, &entries).expect("export");
    let raw = fs::read_to_string(&path).expect("read csv");

    assert!(raw.contains("\"Bob's \"\"big\"\" sale\""));
}

#[test]
fn plain_fields_stay_unquoted() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("out.csv");
    let entries = vec![Transaction::new(
        TransactionId(9),
        "Groceries",
        "Food",
        32.4,
        date(2024, 2, 29),
        TransactionKind::Expense,
    )];

    export_csv(&path, &entries).expect("export");
    let raw = fs::read_to_string(&path).expect("read csv");

    assert!(raw.contains("9,Groceries,Food,32.4,2024-02-29,EXPENSE"));
    assert!(!raw.contains('"'));
}
