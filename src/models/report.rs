use crate::models::expense::Expense;
use rust_decimal::Decimal;
use std::fmt;

/// Expenses selected for one category (or `All`) and their total.
#[derive(Debug, PartialEq)]
pub struct CategoryReport<'a> {
    pub category: String,
    pub total_amount: Decimal,
    pub expenses: Vec<&'a Expense>,
}

impl<'a> CategoryReport<'a> {
    pub(crate) fn new(category: &str, expenses: Vec<&'a Expense>) -> Self {
        let total_amount = expenses
            .iter()
            .fold(Decimal::ZERO, |acc, expense| acc + expense.amount);
        Self {
            category: category.to_string(),
            total_amount,
            expenses,
        }
    }
}

impl fmt::Display for CategoryReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Expense Report:")?;
        writeln!(f, "Category: {}", self.category)?;
        write!(f, "Total Spent: ${:.2}", self.total_amount)?;
        for expense in &self.expenses {
            write!(
                f,
                "\n  {}  {:<15} {:>10.2}  {}",
                expense.date, expense.category, expense.amount, expense.description
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn expense(amount: i64, category: &str, description: &str) -> Expense {
        Expense::new(
            description.to_string(),
            Decimal::new(amount, 0),
            category.to_string(),
            NaiveDate::from_ymd_opt(2025, 11, 9).unwrap(),
        )
    }

    #[test]
    fn test_report_totals_selected_expenses() {
        let a = expense(200, "Food", "Groceries");
        let b = expense(35, "Food", "veges");
        let report = CategoryReport::new("Food", vec![&a, &b]);
        assert_eq!(report.total_amount, Decimal::new(235, 0));
    }

    #[test]
    fn test_report_display_header() {
        let a = expense(200, "Food", "Groceries");
        let report = CategoryReport::new("Food", vec![&a]);
        let text = report.to_string();

        assert!(text.starts_with("Expense Report:\nCategory: Food\nTotal Spent: $200.00"));
        assert!(text.contains("2025-11-09"));
        assert!(text.contains("Groceries"));
    }

    #[test]
    fn test_empty_report_display() {
        let report = CategoryReport::new("Nonexistent", Vec::new());
        assert_eq!(
            report.to_string(),
            "Expense Report:\nCategory: Nonexistent\nTotal Spent: $0.00"
        );
    }
}
