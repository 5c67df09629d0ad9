//! Cashback earned per category in one calendar month.
//!
//! Failures propagate: an unparsable timestamp anywhere in the ledger fails
//! the whole report after it has been reported to the sink.

use chrono::Datelike;
use std::collections::BTreeMap;

use crate::cashback::cashback_for;
use crate::error::{ReportError, Result};
use crate::sink::ReportSink;
use crate::transaction::Transaction;

const REPORT: &str = "monthly_cashback";

/// Category label to accumulated cashback. Sorted so serialized output is stable.
pub type CategoryCashback = BTreeMap<String, f64>;

/// Sum cashback by category for expenses made in `year`/`month`.
pub fn cashback_by_category(
    txns: &[Transaction],
    year: i32,
    month: u32,
    sink: &dyn ReportSink,
) -> Result<CategoryCashback> {
    match aggregate(txns, year, month) {
        Ok(totals) => {
            sink.info(
                REPORT,
                &format!("cashback for {month:02}.{year} across {} categories", totals.len()),
            );
            Ok(totals)
        }
        Err(e) => {
            sink.error(REPORT, &e.to_string());
            Err(e)
        }
    }
}

fn aggregate(txns: &[Transaction], year: i32, month: u32) -> Result<CategoryCashback> {
    if !(1..=12).contains(&month) {
        return Err(ReportError::InvalidMonth(month));
    }

    let mut totals = CategoryCashback::new();
    for txn in txns {
        let when = txn.operation_datetime()?;
        if when.year() != year || when.month() != month || !txn.is_expense() {
            continue;
        }
        *totals.entry(txn.category_key().to_string()).or_insert(0.0) += cashback_for(txn);
    }
    Ok(totals)
}
