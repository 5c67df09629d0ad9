//! cardwise-ingest: load card statement exports into transactions.

pub mod error;
pub mod parsers;

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use cardwise_core::Transaction;

pub use error::{LoadError, StatementError};
pub use parsers::bank_statement::parse_statement;
pub use parsers::workbook::{is_workbook, parse_workbook};

/// Load every transaction from a statement export.
///
/// `.xlsx`, `.xls`, `.xlsb` and `.ods` files are read as workbooks, anything
/// else as CSV text. A missing file is [`LoadError::NotFound`]; a file without
/// data rows is [`LoadError::Empty`]; contents that cannot be decoded or
/// parsed are [`LoadError::Corrupt`].
pub fn load_ledger(path: impl AsRef<Path>) -> Result<Vec<Transaction>, LoadError> {
    let path = path.as_ref();
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::warn!(path = %path.display(), "ledger file not found");
            return Err(LoadError::NotFound(path.to_path_buf()));
        }
        Err(source) => {
            tracing::error!(path = %path.display(), error = %source, "failed to read ledger");
            return Err(LoadError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    if bytes.iter().all(u8::is_ascii_whitespace) {
        tracing::error!(path = %path.display(), "ledger file is empty");
        return Err(LoadError::Empty(path.to_path_buf()));
    }

    let parsed = if is_workbook(path) {
        parse_workbook(bytes)
    } else {
        String::from_utf8(bytes)
            .map_err(StatementError::from)
            .and_then(|text| parse_statement(&text))
    };
    let txns = parsed.map_err(|source| {
        tracing::error!(path = %path.display(), error = %source, "failed to parse ledger");
        LoadError::Corrupt {
            path: path.to_path_buf(),
            source,
        }
    })?;

    if txns.is_empty() {
        tracing::error!(path = %path.display(), "ledger has a header but no rows");
        return Err(LoadError::Empty(path.to_path_buf()));
    }

    tracing::info!(path = %path.display(), rows = txns.len(), "loaded ledger");
    Ok(txns)
}
