//! Spreadsheet statement exports (`.xlsx`, `.xls`, `.xlsb`, `.ods`)
//!
//! The statement is the first worksheet, header in its first used row.
//! Cells are rendered to the text the CSV parser would see, so header lookup,
//! `nan` handling and number parsing are shared with it.

use std::io::Cursor;
use std::path::Path;

use calamine::{Data, Reader, open_workbook_auto_from_rs};
use cardwise_core::Transaction;
use cardwise_core::time::format_ledger_datetime;

use super::bank_statement::{Columns, parse_rows};
use crate::error::StatementError;

/// File extensions read as workbooks; anything else is treated as CSV.
pub const WORKBOOK_EXTENSIONS: &[&str] = &["xlsx", "xls", "xlsb", "ods"];

pub fn is_workbook(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| WORKBOOK_EXTENSIONS.iter().any(|w| ext.eq_ignore_ascii_case(w)))
}

/// Parse a workbook's raw bytes into transactions, in sheet order.
/// A workbook without sheets or rows yields no transactions.
pub fn parse_workbook(bytes: Vec<u8>) -> Result<Vec<Transaction>, StatementError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;
    let Some(sheet) = workbook.sheet_names().first().cloned() else {
        return Ok(Vec::new());
    };
    let range = workbook.worksheet_range(&sheet)?;

    let mut rows = range
        .rows()
        .map(|row| row.iter().map(cell_text).collect::<Vec<String>>());
    let Some(headers) = rows.next() else {
        return Ok(Vec::new());
    };
    let columns = Columns::resolve(headers.iter().map(String::as_str))?;
    parse_rows(rows.map(Ok), &columns)
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        // NaN renders as "NaN", which the row parser reads as absent
        Data::Float(n) => n.to_string(),
        Data::Int(n) => n.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => dt
            .as_datetime()
            .map(format_ledger_datetime)
            .unwrap_or_else(|| dt.as_f64().to_string()),
        Data::Error(e) => format!("#{e:?}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_workbook_by_extension() {
        assert!(is_workbook(Path::new("data/operations.xlsx")));
        assert!(is_workbook(Path::new("OPERATIONS.XLSX")));
        assert!(is_workbook(Path::new("export.ods")));
        assert!(!is_workbook(Path::new("data/operations.csv")));
        assert!(!is_workbook(Path::new("operations")));
    }

    #[test]
    fn test_numeric_cells_render_as_plain_numbers() {
        assert_eq!(cell_text(&Data::Float(-160.89)), "-160.89");
        assert_eq!(cell_text(&Data::Float(5411.0)), "5411");
        assert_eq!(cell_text(&Data::Int(70)), "70");
        assert_eq!(cell_text(&Data::Float(f64::NAN)), "NaN");
        assert_eq!(cell_text(&Data::Empty), "");
    }

    #[test]
    fn test_garbage_bytes_are_rejected() {
        let err = parse_workbook(b"definitely not a zip archive".to_vec()).unwrap_err();
        assert!(matches!(err, StatementError::Workbook(_)));
    }
}
