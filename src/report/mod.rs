//! Pure aggregations over a journal snapshot. Nothing here mutates or
//! persists; callers pass the entry slice and render the result.

use std::collections::{BTreeMap, HashMap};

use chrono::Datelike;

use crate::ledger::{Transaction, TransactionKind};

/// Income and expense totals for one calendar month.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MonthlyTotals {
    pub income: f64,
    pub expense: f64,
}

/// Sums expense amounts per category. Income entries are ignored and
/// categories without any expense do not appear at all.
pub fn expense_by_category(entries: &[Transaction]) -> HashMap<String, f64> {
    let mut totals = HashMap::new();
    for tx in entries {
        if tx.kind != TransactionKind::Expense {
            continue;
        }
        *totals.entry(tx.category.clone()).or_insert(0.0) += tx.amount;
    }
    totals
}

/// Splits totals per calendar month, combining the same month across years.
/// Every month 1..=12 is present, zeroed when nothing was recorded, so
/// consumers always see a fixed twelve-point series.
pub fn income_and_expense_by_month(entries: &[Transaction]) -> BTreeMap<u32, MonthlyTotals> {
    let mut months: BTreeMap<u32, MonthlyTotals> =
        (1..=12).map(|m| (m, MonthlyTotals::default())).collect();
    for tx in entries {
        let slot = months.entry(tx.date.month()).or_default();
        match tx.kind {
            TransactionKind::Income => slot.income += tx.amount,
            TransactionKind::Expense => slot.expense += tx.amount,
        }
    }
    months
}
