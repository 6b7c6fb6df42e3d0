use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single dated, categorized debit. Only the ledger creates these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub description: String,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub amount: Decimal,
    pub category: String,
    pub date: NaiveDate,
}

impl Expense {
    pub(crate) fn new(description: String, amount: Decimal, category: String, date: NaiveDate) -> Self {
        Self {
            description,
            amount,
            category,
            date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expense_serializes_date_as_iso_string() {
        let expense = Expense::new(
            "Groceries".to_string(),
            Decimal::new(200, 0),
            "Food".to_string(),
            NaiveDate::from_ymd_opt(2025, 3, 7).unwrap(),
        );

        let json = serde_json::to_value(&expense).unwrap();
        assert_eq!(json["date"], "2025-03-07");
        assert_eq!(json["description"], "Groceries");
        assert_eq!(json["category"], "Food");
        assert_eq!(json["amount"].as_f64(), Some(200.0));
    }

    #[test]
    fn test_expense_reads_integer_amount() {
        let json = r#"{"description":"veges","amount":35,"category":"Food","date":"2025-03-07"}"#;
        let expense: Expense = serde_json::from_str(json).unwrap();
        assert_eq!(expense.amount, Decimal::new(35, 0));
        assert_eq!(expense.date, NaiveDate::from_ymd_opt(2025, 3, 7).unwrap());
    }
}
