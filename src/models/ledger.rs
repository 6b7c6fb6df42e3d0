use crate::error::{LedgerError, Result};
use crate::models::expense::Expense;
use crate::models::report::CategoryReport;
use chrono::Local;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::{info, warn};

/// Income, the expenses recorded against it and the savings left over.
///
/// `savings` is always `income - sum(expense amounts)`; every mutation
/// recomputes it before returning.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Ledger {
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    income: Decimal,
    expenses: Vec<Expense>,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    savings: Decimal,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn income(&self) -> Decimal {
        self.income
    }

    pub fn savings(&self) -> Decimal {
        self.savings
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn add_income(&mut self, amount: Decimal) -> Result<Decimal> {
        if amount <= Decimal::ZERO {
            return Err(LedgerError::InvalidAmount {
                subject: "Income",
                amount,
                line: None,
            });
        }
        self.income += amount;
        self.recompute_savings();
        Ok(self.income)
    }

    /// Records an expense dated today.
    pub fn add_expense(&mut self, amount: Decimal, category: &str, description: &str) -> Result<()> {
        if amount <= Decimal::ZERO {
            return Err(LedgerError::InvalidAmount {
                subject: "Expense amount",
                amount,
                line: None,
            });
        }
        let expense = Expense::new(
            description.to_string(),
            amount,
            category.to_string(),
            Local::now().date_naive(),
        );
        self.expenses.push(expense);
        self.recompute_savings();
        Ok(())
    }

    pub fn recompute_savings(&mut self) -> Decimal {
        self.savings = self.income - self.total_spent();
        info!(savings = %self.savings, "You have {} savings.", self.savings);
        self.savings
    }

    pub fn total_spent(&self) -> Decimal {
        self.expenses
            .iter()
            .fold(Decimal::ZERO, |acc, expense| acc + expense.amount)
    }

    /// Distinct categories, sorted.
    pub fn list_categories(&self) -> Vec<String> {
        self.expenses
            .iter()
            .map(|expense| expense.category.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Expenses of one category, or all of them when `category` is `None` or empty.
    ///
    /// An unknown category is not an error: it yields an empty report with a
    /// zero total.
    pub fn report_by_category(&self, category: Option<&str>) -> CategoryReport<'_> {
        let category = category.filter(|c| !c.is_empty());

        let Some(category) = category else {
            return CategoryReport::new("All", self.expenses.iter().collect());
        };

        if !self.expenses.iter().any(|expense| expense.category == category) {
            warn!(category, "Category '{}' not found", category);
            return CategoryReport::new(category, Vec::new());
        }

        let matching = self
            .expenses
            .iter()
            .filter(|expense| expense.category == category)
            .collect();
        CategoryReport::new(category, matching)
    }

    /// Total spent per category, in the order each category first appeared.
    pub fn category_totals(&self) -> Vec<(String, Decimal)> {
        let mut totals: Vec<(String, Decimal)> = Vec::new();
        for expense in &self.expenses {
            match totals.iter_mut().find(|(category, _)| *category == expense.category) {
                Some((_, total)) => *total += expense.amount,
                None => totals.push((expense.category.clone(), expense.amount)),
            }
        }
        totals
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn capture_logs(f: impl FnOnce()) -> String {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .without_time()
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        let bytes = logs.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    fn sample_ledger() -> Ledger {
        let mut ledger = Ledger::new();
        ledger.add_expense(Decimal::new(200, 0), "Food", "Groceries").unwrap();
        ledger.add_expense(Decimal::new(100, 0), "Transport", "Bus pass").unwrap();
        ledger.add_expense(Decimal::new(35, 0), "Food", "veges").unwrap();
        ledger
    }

    #[test]
    fn test_new_ledger_is_empty() {
        let ledger = Ledger::new();
        assert_eq!(ledger.income(), Decimal::ZERO);
        assert_eq!(ledger.savings(), Decimal::ZERO);
        assert!(ledger.expenses().is_empty());
    }

    #[test]
    fn test_add_income_success() {
        let mut ledger = Ledger::new();
        let result = ledger.add_income(Decimal::new(1500, 0));
        assert_eq!(result.unwrap(), Decimal::new(1500, 0));
        assert_eq!(ledger.savings(), Decimal::new(1500, 0));
    }

    #[test]
    fn test_add_income_accumulates() {
        let mut ledger = Ledger::new();
        ledger.add_income(Decimal::new(1500, 0)).unwrap();
        let total = ledger.add_income(Decimal::new(25050, 2)).unwrap();
        assert_eq!(total, Decimal::new(175050, 2));
    }

    #[test]
    fn test_add_income_rejects_zero_and_negative() {
        let mut ledger = Ledger::new();

        let zero = ledger.add_income(Decimal::ZERO);
        assert!(matches!(zero, Err(LedgerError::InvalidAmount { .. })));

        let negative = ledger.add_income(Decimal::new(-5, 0));
        assert!(matches!(negative, Err(LedgerError::InvalidAmount { .. })));

        assert_eq!(ledger.income(), Decimal::ZERO);
    }

    #[test]
    fn test_add_expense_rejects_zero() {
        let mut ledger = Ledger::new();
        let result = ledger.add_expense(Decimal::ZERO, "Food", "x");
        assert!(matches!(result, Err(LedgerError::InvalidAmount { .. })));
        assert!(ledger.expenses().is_empty());
    }

    #[test]
    fn test_add_expense_is_dated_today() {
        let mut ledger = Ledger::new();
        let today = Local::now().date_naive();
        ledger.add_expense(Decimal::new(50, 0), "Entertainment", "Movies").unwrap();

        let expense = ledger.expenses().last().unwrap();
        assert_eq!(expense.amount, Decimal::new(50, 0));

        assert_eq!(expense.description, "Movies");
        assert_eq!(expense.category, "Entertainment");
        // tolerate a midnight rollover between the two clock reads
        assert!(expense.date >= today);
    }

    #[test]
    fn test_savings_tracks_every_mutation() {
        let mut ledger = Ledger::new();
        let steps: [(bool, i64); 6] = [(true, 1500), (false, 200), (false, 100), (true, 300), (false, 35), (false, 2000)];

        for (is_income, amount) in steps {
            let amount = Decimal::new(amount, 0);
            if is_income {
                ledger.add_income(amount).unwrap();
            } else {
                ledger.add_expense(amount, "Misc", "step").unwrap();
            }
            assert_eq!(ledger.savings(), ledger.income() - ledger.total_spent());
        }
        assert_eq!(ledger.savings(), Decimal::new(-535, 0));
    }

    #[test]
    fn test_list_categories_sorted_and_deduplicated() {
        let ledger = sample_ledger();
        assert_eq!(ledger.list_categories(), vec!["Food", "Transport"]);
    }

    #[test]
    fn test_report_by_category_filters_in_order() {
        let ledger = sample_ledger();
        let report = ledger.report_by_category(Some("Food"));

        assert_eq!(report.category, "Food");
        assert_eq!(report.total_amount, Decimal::new(235, 0));
        assert_eq!(report.expenses.len(), 2);
        assert_eq!(report.expenses[0].description, "Groceries");
        assert_eq!(report.expenses[1].description, "veges");
    }

    #[test]
    fn test_report_by_category_unknown_is_empty() {
        let ledger = sample_ledger();
        let report = ledger.report_by_category(Some("Nonexistent"));

        assert_eq!(report.category, "Nonexistent");
        assert_eq!(report.total_amount, Decimal::ZERO);
        assert!(report.expenses.is_empty());
    }

    #[test]
    fn test_report_without_category_covers_everything() {
        let ledger = sample_ledger();

        for category in [None, Some("")] {
            let report = ledger.report_by_category(category);
            assert_eq!(report.category, "All");
            assert_eq!(report.total_amount, Decimal::new(335, 0));
            assert_eq!(report.expenses.len(), 3);
        }
    }

    #[test]
    fn test_report_category_match_is_case_sensitive() {
        let ledger = sample_ledger();
        let report = ledger.report_by_category(Some("food"));
        assert!(report.expenses.is_empty());
    }

    #[test]
    fn test_category_totals_keep_first_seen_order() {
        let ledger = sample_ledger();
        assert_eq!(
            ledger.category_totals(),
            vec![
                ("Food".to_string(), Decimal::new(235, 0)),
                ("Transport".to_string(), Decimal::new(100, 0)),
            ]
        );
    }

    #[test]
    fn test_recompute_savings_announces_balance() {
        let output = capture_logs(|| {
            let mut ledger = Ledger::new();
            ledger.add_income(Decimal::new(1500, 0)).unwrap();
            ledger.add_expense(Decimal::new(200, 0), "Food", "Groceries").unwrap();
        });

        assert!(output.contains("INFO"));
        assert!(output.contains("You have 1500 savings."));
        assert!(output.contains("You have 1300 savings."));
    }

    #[test]
    fn test_report_unknown_category_logs_warning() {
        let ledger = sample_ledger();
        let output = capture_logs(|| {
            let report = ledger.report_by_category(Some("Nonexistent"));
            assert!(report.expenses.is_empty());
        });

        assert!(output.contains("WARN"));
        assert!(output.contains("Category 'Nonexistent' not found"));
    }

    #[test]
    fn test_report_known_category_does_not_warn() {
        let ledger = sample_ledger();
        let output = capture_logs(|| {
            ledger.report_by_category(Some("Food"));
        });

        assert!(!output.contains("WARN"));
    }
}
