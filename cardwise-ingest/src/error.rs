use std::path::PathBuf;
use thiserror::Error;

/// Why a statement's contents could not be turned into transactions.
#[derive(Debug, Error)]
pub enum StatementError {
    #[error("missing column '{0}'")]
    MissingColumn(&'static str),
    #[error("row {row}: column '{column}' is not a number: '{value}'")]
    BadNumber {
        row: usize,
        column: &'static str,
        value: String,
    },
    #[error("row {row}: column '{column}' is required")]
    MissingValue { row: usize, column: &'static str },
    #[error("not UTF-8 text: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Workbook(#[from] calamine::Error),
}

/// Failure to load a ledger file. `NotFound` means the source is missing;
/// `Empty` and `Corrupt` mean it exists but holds nothing usable.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("ledger not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("ledger has no transactions: {}", .0.display())]
    Empty(PathBuf),
    #[error("ledger {} is corrupt: {source}", path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: StatementError,
    },
    #[error("reading ledger {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl LoadError {
    /// True when the ledger file itself does not exist.
    pub fn is_missing(&self) -> bool {
        matches!(self, LoadError::NotFound(_))
    }
}
