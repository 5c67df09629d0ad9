//! Card statement CSV export parser
//!
//! Expected header (columns may come in any order, extra columns are ignored):
//!   Дата операции;Дата платежа;Номер карты;Статус;Сумма операции;Валюта операции;
//!   Сумма платежа;Валюта платежа;Кэшбэк;Категория;MCC;Описание;
//!   Бонусы (включая кэшбэк);Округление на инвесткопилку;Сумма операции с округлением
//!
//! Numbers may use a decimal comma (`-160,89`). Empty cells and `nan` are absent values.
//! Spreadsheet exports go through [`crate::parsers::workbook`] and share the
//! column lookup and row conversion below.

use cardwise_core::Transaction;
use csv::StringRecord;

use crate::error::StatementError;

pub const OPERATION_DATE: &str = "Дата операции";
pub const PAYMENT_DATE: &str = "Дата платежа";
pub const CARD_NUMBER: &str = "Номер карты";
pub const STATUS: &str = "Статус";
pub const OPERATION_AMOUNT: &str = "Сумма операции";
pub const OPERATION_CURRENCY: &str = "Валюта операции";
pub const PAYMENT_AMOUNT: &str = "Сумма платежа";
pub const PAYMENT_CURRENCY: &str = "Валюта платежа";
pub const CASHBACK: &str = "Кэшбэк";
pub const CATEGORY: &str = "Категория";
pub const MCC: &str = "MCC";
pub const DESCRIPTION: &str = "Описание";
pub const BONUSES: &str = "Бонусы (включая кэшбэк)";
pub const INVESTMENT_ROUNDING: &str = "Округление на инвесткопилку";
pub const ROUNDED_OPERATION_AMOUNT: &str = "Сумма операции с округлением";

/// Column positions resolved from the header row.
pub(crate) struct Columns {
    operation_date: usize,
    payment_amount: usize,
    payment_date: Option<usize>,
    card_number: Option<usize>,
    status: Option<usize>,
    operation_amount: Option<usize>,
    operation_currency: Option<usize>,
    payment_currency: Option<usize>,
    cashback: Option<usize>,
    category: Option<usize>,
    mcc: Option<usize>,
    description: Option<usize>,
    bonuses: Option<usize>,
    investment_rounding: Option<usize>,
    rounded_operation_amount: Option<usize>,
}

impl Columns {
    pub(crate) fn resolve<'a>(headers: impl IntoIterator<Item = &'a str>) -> Result<Self, StatementError> {
        let headers: Vec<&str> = headers
            .into_iter()
            .map(|h| h.trim_start_matches('\u{feff}').trim())
            .collect();
        let find = |name: &str| headers.iter().position(|h| *h == name);
        Ok(Self {
            operation_date: find(OPERATION_DATE).ok_or(StatementError::MissingColumn(OPERATION_DATE))?,
            payment_amount: find(PAYMENT_AMOUNT).ok_or(StatementError::MissingColumn(PAYMENT_AMOUNT))?,
            payment_date: find(PAYMENT_DATE),
            card_number: find(CARD_NUMBER),
            status: find(STATUS),
            operation_amount: find(OPERATION_AMOUNT),
            operation_currency: find(OPERATION_CURRENCY),
            payment_currency: find(PAYMENT_CURRENCY),
            cashback: find(CASHBACK),
            category: find(CATEGORY),
            mcc: find(MCC),
            description: find(DESCRIPTION),
            bonuses: find(BONUSES),
            investment_rounding: find(INVESTMENT_ROUNDING),
            rounded_operation_amount: find(ROUNDED_OPERATION_AMOUNT),
        })
    }
}

/// One data row as text cells, whatever file format it came from.
pub(crate) trait StatementRow {
    fn field(&self, idx: usize) -> Option<&str>;
    fn is_blank(&self) -> bool;
}

impl StatementRow for StringRecord {
    fn field(&self, idx: usize) -> Option<&str> {
        self.get(idx)
    }

    fn is_blank(&self) -> bool {
        self.iter().all(|cell| cell.trim().is_empty())
    }
}

impl StatementRow for Vec<String> {
    fn field(&self, idx: usize) -> Option<&str> {
        self.get(idx).map(String::as_str)
    }

    fn is_blank(&self) -> bool {
        self.iter().all(|cell| cell.trim().is_empty())
    }
}

/// `;` if the header line uses it, otherwise `,`.
pub fn detect_delimiter(text: &str) -> u8 {
    let header = text.lines().next().unwrap_or("");
    if header.contains(';') { b';' } else { b',' }
}

/// Parse statement CSV text into transactions, in file order.
pub fn parse_statement(text: &str) -> Result<Vec<Transaction>, StatementError> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(detect_delimiter(text))
        .flexible(true)
        .has_headers(true)
        .from_reader(text.as_bytes());

    let columns = Columns::resolve(rdr.headers()?.iter())?;
    parse_rows(rdr.records().map(|r| r.map_err(StatementError::from)), &columns)
}

/// Turn data rows (header excluded) into transactions, skipping blank rows.
pub(crate) fn parse_rows<R: StatementRow>(
    rows: impl Iterator<Item = Result<R, StatementError>>,
    columns: &Columns,
) -> Result<Vec<Transaction>, StatementError> {
    let mut txns = Vec::new();
    for (i, record) in rows.enumerate() {
        let record = record?;
        // 1-based data row, header excluded
        let row = i + 1;
        if record.is_blank() {
            continue;
        }
        txns.push(parse_row(&record, columns, row)?);
    }
    Ok(txns)
}

fn parse_row<R: StatementRow>(record: &R, c: &Columns, row: usize) -> Result<Transaction, StatementError> {
    let payment_amount = number(record, Some(c.payment_amount), PAYMENT_AMOUNT, row)?
        .ok_or(StatementError::MissingValue { row, column: PAYMENT_AMOUNT })?;

    Ok(Transaction {
        operation_date: record.field(c.operation_date).unwrap_or("").trim().to_string(),
        payment_amount,
        category: text(record, c.category),
        description: text(record, c.description),
        card_identifier: text(record, c.card_number),
        declared_cashback: number(record, c.cashback, CASHBACK, row)?,
        payment_date: text(record, c.payment_date),
        status: text(record, c.status),
        operation_amount: number(record, c.operation_amount, OPERATION_AMOUNT, row)?,
        operation_currency: text(record, c.operation_currency),
        payment_currency: text(record, c.payment_currency),
        mcc: mcc(record, c.mcc, row)?,
        bonuses: number(record, c.bonuses, BONUSES, row)?,
        investment_rounding: number(record, c.investment_rounding, INVESTMENT_ROUNDING, row)?,
        rounded_operation_amount: number(
            record,
            c.rounded_operation_amount,
            ROUNDED_OPERATION_AMOUNT,
            row,
        )?,
    })
}

fn cell<R: StatementRow>(record: &R, idx: Option<usize>) -> Option<&str> {
    let value = record.field(idx?)?.trim();
    if value.is_empty() || value.eq_ignore_ascii_case("nan") {
        None
    } else {
        Some(value)
    }
}

fn text<R: StatementRow>(record: &R, idx: Option<usize>) -> Option<String> {
    cell(record, idx).map(str::to_string)
}

fn number<R: StatementRow>(
    record: &R,
    idx: Option<usize>,
    column: &'static str,
    row: usize,
) -> Result<Option<f64>, StatementError> {
    let Some(raw) = cell(record, idx) else {
        return Ok(None);
    };
    parse_decimal(raw).map(Some).ok_or_else(|| StatementError::BadNumber {
        row,
        column,
        value: raw.to_string(),
    })
}

fn mcc<R: StatementRow>(record: &R, idx: Option<usize>, row: usize) -> Result<Option<u32>, StatementError> {
    let Some(raw) = cell(record, idx) else {
        return Ok(None);
    };
    // spreadsheet exports sometimes write codes as floats: "5411.0"
    let code = raw
        .parse::<u32>()
        .ok()
        .or_else(|| {
            parse_decimal(raw)
                .filter(|v| v.fract() == 0.0 && *v >= 0.0 && *v <= f64::from(u32::MAX))
                .map(|v| v as u32)
        });
    code.map(Some).ok_or_else(|| StatementError::BadNumber {
        row,
        column: MCC,
        value: raw.to_string(),
    })
}

/// Parse `-1 234,56`, `-1234.56` and friends.
pub fn parse_decimal(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|ch| !ch.is_whitespace())
        .map(|ch| if ch == ',' { '.' } else { ch })
        .collect();
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}
