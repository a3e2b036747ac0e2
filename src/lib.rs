#![doc(test(attr(deny(warnings))))]

//! Fintrack Core records personal income and expense transactions, persists
//! them as a whole-file JSON journal, and derives the aggregate views that
//! back the reporting front end.

pub mod cli;
pub mod config;
pub mod errors;
pub mod ledger;
pub mod manager;
pub mod report;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Fintrack tracing initialized.");
    });
}
