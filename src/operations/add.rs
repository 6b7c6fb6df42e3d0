use crate::error::{LedgerError, Result};
use crate::models::ledger::Ledger;
use rust_decimal::Decimal;

const MAX_DESCRIPTION_LEN: usize = 255;
const MAX_CATEGORY_LEN: usize = 50;

/// User-supplied expense fields after parsing and length checks.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseInput {
    pub amount: Decimal,
    pub category: String,
    pub description: String,
}

pub fn parse_amount(input: &str) -> Result<Decimal> {
    input.trim().parse::<Decimal>().map_err(|_| {
        LedgerError::InvalidInput(format!(
            "Invalid amount format {}. Please provide a valid decimal number.",
            input.trim()
        ))
    })
}

pub fn create_expense_input(amount: &str, category: &str, description: &str) -> Result<ExpenseInput> {
    let amount = parse_amount(amount)?;

    let category = category.trim().to_string();
    if category.is_empty() {
        return Err(LedgerError::InvalidInput("Category cannot be empty".to_string()));
    }
    if category.chars().count() > MAX_CATEGORY_LEN {
        return Err(LedgerError::InvalidInput("Category too long".to_string()));
    }

    let description = description.trim().to_string();
    if description.chars().count() > MAX_DESCRIPTION_LEN {
        return Err(LedgerError::InvalidInput("Description too long".to_string()));
    }

    Ok(ExpenseInput {
        amount,
        category,
        description,
    })
}

/// Parses `amount, category, description`. The description may itself contain commas.
pub fn parse_expense_details(details: &str) -> Result<ExpenseInput> {
    let parts: Vec<&str> = details.splitn(3, ',').map(|s| s.trim()).collect();
    if parts.len() != 3 {
        return Err(LedgerError::InvalidInput(format!(
            "Invalid number of details provided. Expected 3 details separated by commas but got {}",
            parts.len()
        )));
    }
    create_expense_input(parts[0], parts[1], parts[2])
}

pub fn add_income_to_ledger(ledger: &mut Ledger, amount: &str) -> Result<Decimal> {
    let amount = parse_amount(amount)?;
    ledger.add_income(amount)
}

pub fn add_expense_to_ledger(ledger: &mut Ledger, input: &ExpenseInput) -> Result<()> {
    ledger.add_expense(input.amount, &input.category, &input.description)?;
    Ok(())
}
