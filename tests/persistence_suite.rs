use chrono::NaiveDate;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

use fintrack_core::ledger::{Journal, TransactionId, TransactionKind};
use fintrack_core::manager::JournalManager;
use fintrack_core::storage::{JsonStore, StorageBackend};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn tmp_path_for(path: &Path) -> std::path::PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.tmp", existing),
        None => String::from("tmp"),
    };
    tmp.set_extension(ext);
    tmp
}

#[test]
fn save_then_load_matches_the_in_memory_journal() {
    let temp = tempdir().unwrap();
    let store = JsonStore::new(temp.path().join("transactions.json"));

    let mut journal = Journal::new();
    journal.add("Coffee", "Food", 4.5, date(2024, 1, 10), TransactionKind::Expense);
    journal.add("Salary", "Salary", 2000.0, date(2024, 1, 31), TransactionKind::Income);
    journal.remove(TransactionId(1));
    journal.add("Bus", "Transport", 2.1, date(2024, 2, 2), TransactionKind::Expense);

    store.save(journal.entries()).expect("save journal");
    let reloaded = store.load().expect("load journal");

    assert_eq!(reloaded.len(), journal.len());
    for (saved, live) in reloaded.iter().zip(journal.entries()) {
        assert_eq!(saved.id(), live.id());
        assert_eq!(saved.title, live.title);
        assert_eq!(saved.category, live.category);
        assert_eq!(saved.amount, live.amount);
        assert_eq!(saved.date, live.date);
        assert_eq!(saved.kind, live.kind);
    }
}

#[test]
fn reload_reseeds_ids_above_the_highest_persisted_one() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("transactions.json");
    fs::write(
        &path,
        r#"[
            {"id": 3, "title": "A", "category": "Food", "amount": 1.0, "date": "2024-01-01", "type": "EXPENSE"},
            {"id": 7, "title": "B", "category": "Bills", "amount": 2.0, "date": "2024-01-02", "type": "EXPENSE"},
            {"id": 2, "title": "C", "category": "Food", "amount": 3.0, "date": "2024-01-03", "type": "INCOME"}
        ]"#,
    )
    .unwrap();

    let store = JsonStore::new(path);
    let mut journal = Journal::from_entries(store.load().expect("load journal"));
    assert_eq!(journal.len(), 3);

    let next = journal.add("D", "Others", 4.0, date(2024, 1, 4), TransactionKind::Expense);
    assert_eq!(next, TransactionId(8));
}

#[test]
fn empty_file_round_trip_assigns_id_one() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("transactions.json");

    let store = JsonStore::new(path.clone());
    let (mut manager, report) = JournalManager::open(Box::new(store));
    assert_eq!(report.loaded, 0);

    let (id, saved) = manager.add("Coffee", "Food", 4.5, date(2024, 1, 10), TransactionKind::Expense);
    saved.expect("persist add");
    assert_eq!(id, TransactionId(1));

    let (reopened, report) = JournalManager::open(Box::new(JsonStore::new(path)));
    assert_eq!(report.loaded, 1);
    let tx = reopened.journal().get(TransactionId(1)).expect("entry");
    assert_eq!(tx.title, "Coffee");
    assert_eq!(tx.category, "Food");
    assert_eq!(tx.amount, 4.5);
    assert_eq!(tx.date, date(2024, 1, 10));
    assert_eq!(tx.kind, TransactionKind::Expense);
}

#[test]
fn corrupt_journal_degrades_to_empty_without_touching_the_file() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("transactions.json");
    fs::write(&path, "{\"definitely\": \"not an array\"").unwrap();

    let store = JsonStore::new(path.clone());
    let (manager, _) = JournalManager::open(Box::new(store));
    assert!(manager.journal().is_empty());

    // the broken file stays on disk until the next successful save
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "{\"definitely\": \"not an array\""
    );
}

#[test]
fn failed_save_leaves_the_previous_snapshot_intact() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("transactions.json");
    let store = JsonStore::new(path.clone());

    let mut journal = Journal::new();
    journal.add("Coffee", "Food", 4.5, date(2024, 1, 10), TransactionKind::Expense);
    store.save(journal.entries()).expect("initial save");
    let original = fs::read_to_string(&path).expect("read original");

    // collide the tmp file name with a directory so the write fails
    let tmp = tmp_path_for(&path);
    fs::create_dir_all(&tmp).unwrap();

    journal.add("Rent", "Bills", 800.0, date(2024, 2, 1), TransactionKind::Expense);
    assert!(store.save(journal.entries()).is_err());

    let current = fs::read_to_string(&path).expect("read after failure");
    assert_eq!(current, original);

    let _ = fs::remove_dir_all(&tmp);
}
