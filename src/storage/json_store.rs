use crate::error::{LedgerError, Result};
use crate::models::ledger::Ledger;
use rust_decimal::Decimal;
use std::fs::{self, File};
use std::io::{BufReader, ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

pub const DEFAULT_DATA_FILE: &str = "transactions_data.json";

/// Reads and writes a whole ledger as one JSON document.
#[derive(Debug, Clone)]
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the ledger, or an empty one when the file does not exist yet.
    pub fn load(&self) -> Result<Ledger> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!(path = %self.path.display(), "No existing data found. Starting fresh.");
                return Ok(Ledger::default());
            }
            Err(e) => return Err(e.into()),
        };

        let mut ledger: Ledger = serde_json::from_reader(BufReader::new(file))?;
        if let Some(expense) = ledger.expenses().iter().find(|e| e.amount <= Decimal::ZERO) {
            return Err(LedgerError::InvalidAmount {
                subject: "Stored expense amount",
                amount: expense.amount,
                line: None,
            });
        }
        let stored = ledger.savings();
        let recomputed = ledger.recompute_savings();
        if stored != recomputed {
            warn!(
                %stored,
                %recomputed,
                "Stored savings did not match income minus expenses; using recomputed value"
            );
        }
        debug!(
            path = %self.path.display(),
            expenses = ledger.expenses().len(),
            "Loaded ledger"
        );
        Ok(ledger)
    }

    /// Replaces the file's content with the full ledger state.
    pub fn save(&self, ledger: &Ledger) -> Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;

        let mut tmp = NamedTempFile::new_in(dir)?;
        serde_json::to_writer_pretty(&mut tmp, ledger)?;
        tmp.write_all(b"\n")?;
        tmp.flush()?;
        if let Ok(existing) = fs::metadata(&self.path) {
            tmp.as_file().set_permissions(existing.permissions())?;
        }
        tmp.persist(&self.path).map_err(|e| e.error)?;

        debug!(path = %self.path.display(), "Saved ledger");
        Ok(())
    }
}
