use rust_decimal::Decimal;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, LedgerError>;

/// Failures raised by the ledger, its storage and its presentation layers.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// `line` is set when the amount came from a row of an imported file.
    #[error("{}{subject} must be positive, got {amount}", line_prefix(.line))]
    InvalidAmount {
        subject: &'static str,
        amount: Decimal,
        line: Option<u64>,
    },
    #[error("Invalid chart type '{0}'. Use 'pie' or 'bar'.")]
    InvalidChartType(String),
    #[error("{0}")]
    InvalidInput(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Terminal error: {0}")]
    Terminal(String),
}

impl LedgerError {
    /// Ties a validation error to the input line it came from.
    pub fn at_line(self, line: u64) -> Self {
        match self {
            LedgerError::InvalidAmount { subject, amount, .. } => LedgerError::InvalidAmount {
                subject,
                amount,
                line: Some(line),
            },
            LedgerError::InvalidInput(message) => {
                LedgerError::InvalidInput(format!("Line {}: {}", line, message))
            }
            other => other,
        }
    }
}

fn line_prefix(line: &Option<u64>) -> String {
    match line {
        Some(line) => format!("Line {}: ", line),
        None => String::new(),
    }
}
