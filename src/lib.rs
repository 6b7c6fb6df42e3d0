//! Personal finance tracker: income, categorized expenses and the savings
//! left between them, persisted as a single JSON document.

pub mod error;
pub mod logging;
pub mod models;
pub mod operations;
pub mod storage;

pub use error::{LedgerError, Result};
pub use models::expense::Expense;
pub use models::ledger::Ledger;
pub use models::report::CategoryReport;
pub use storage::JsonStore;
