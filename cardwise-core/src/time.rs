//! Date text formats and the trailing-window arithmetic used by reports.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::{ReportError, Result};

/// Ledger timestamps: `31.12.2021 16:44:00`.
pub const LEDGER_DATETIME_FORMAT: &str = "%d.%m.%Y %H:%M:%S";
/// Report reference dates and ledger payment dates: `31.12.2021`.
pub const REFERENCE_DATE_FORMAT: &str = "%d.%m.%Y";
/// Home page input: `2021-12-31 16:44:00`.
pub const GREETING_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Three "months" of thirty days each.
pub const TRAILING_WINDOW_DAYS: i64 = 3 * 30;

/// Parse a ledger operation timestamp.
pub fn parse_ledger_datetime(text: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(text.trim(), LEDGER_DATETIME_FORMAT).map_err(|source| {
        ReportError::InvalidTimestamp {
            value: text.to_string(),
            source,
        }
    })
}

/// Parse a `DD.MM.YYYY` reference date as midnight of that day.
pub fn parse_reference_date(text: &str) -> Result<NaiveDateTime> {
    NaiveDate::parse_from_str(text.trim(), REFERENCE_DATE_FORMAT)
        .map(|d| d.and_time(NaiveTime::MIN))
        .map_err(|source| ReportError::InvalidReferenceDate {
            value: text.to_string(),
            source,
        })
}

pub fn format_ledger_datetime(dt: NaiveDateTime) -> String {
    dt.format(LEDGER_DATETIME_FORMAT).to_string()
}

/// Start of the trailing window ending at `reference`: back to the first of
/// the month, then a further 90 days. The time of day is kept.
///
/// This is not calendar-month arithmetic; 3 x 30 days is the contract.
pub fn trailing_window_start(reference: NaiveDateTime) -> NaiveDateTime {
    let to_first_of_month = Duration::days(i64::from(reference.day()) - 1);
    reference - to_first_of_month - Duration::days(TRAILING_WINDOW_DAYS)
}
