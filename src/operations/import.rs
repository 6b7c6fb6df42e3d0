use super::add::{create_expense_input, ExpenseInput};
use crate::error::{LedgerError, Result};
use crate::models::ledger::Ledger;
use std::fs::File;
use std::path::Path;
use tracing::info;

/// Imports headerless `amount,category,description` rows.
///
/// Either every row is added or none is: rows are applied to a copy of the
/// ledger which replaces the original only once all of them succeeded.
pub fn import_expenses_from_csv(ledger: &mut Ledger, path: &Path) -> Result<usize> {
    let inputs = read_csv(path)?;

    let mut staged = ledger.clone();
    for (line, input) in &inputs {
        staged
            .add_expense(input.amount, &input.category, &input.description)
            .map_err(|e| e.at_line(*line))?;
    }
    *ledger = staged;

    info!(count = inputs.len(), path = %path.display(), "Imported expenses");
    Ok(inputs.len())
}

/// Parsed rows, each paired with the file line it started on.
fn read_csv(path: &Path) -> Result<Vec<(u64, ExpenseInput)>> {
    let file = File::open(path).map_err(|e| {
        LedgerError::InvalidInput(format!("Failed to open file '{}': {}", path.display(), e))
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .has_headers(false)
        .flexible(true)
        .from_reader(file);

    let mut inputs = Vec::new();
    for (record_index, result) in reader.records().enumerate() {
        let record = result?;
        let line = record
            .position()
            .map(|position| position.line())
            .unwrap_or(record_index as u64 + 1);

        if record.len() != 3 {
            return Err(LedgerError::InvalidInput(format!(
                "Invalid number of columns on line {}: expected 3, got {}",
                line,
                record.len()
            )));
        }

        let amount = record.get(0).unwrap_or("");
        let category = record.get(1).unwrap_or("");
        let description = record.get(2).unwrap_or("");

        let input = create_expense_input(amount, category, description).map_err(|e| e.at_line(line))?;
        inputs.push((line, input));
    }

    Ok(inputs)
}
