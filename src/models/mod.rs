pub mod expense;
pub mod ledger;
pub mod report;
