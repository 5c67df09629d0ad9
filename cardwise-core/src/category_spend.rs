//! Spending in one category over a trailing window, grouped by timestamp.
//!
//! This report never fails: any error is reported to the sink and an empty
//! result comes back instead.

use chrono::{Local, NaiveDateTime};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::error::Result;
use crate::sink::ReportSink;
use crate::time::{format_ledger_datetime, parse_reference_date, trailing_window_start};
use crate::transaction::Transaction;

const REPORT: &str = "category_spend";

/// Numeric columns summed over every transaction sharing one timestamp.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct SpendGroup {
    /// Shared operation timestamp, `DD.MM.YYYY HH:MM:SS`
    pub date: String,
    pub payment_amount: f64,
    pub operation_amount: f64,
    pub cashback: f64,
    pub bonuses: f64,
    pub investment_rounding: f64,
    pub rounded_operation_amount: f64,
    pub transactions: usize,
}

impl SpendGroup {
    fn add(&mut self, txn: &Transaction) {
        self.payment_amount += txn.payment_amount;
        self.operation_amount += txn.operation_amount.unwrap_or(0.0);
        self.cashback += txn.declared_cashback.unwrap_or(0.0);
        self.bonuses += txn.bonuses.unwrap_or(0.0);
        self.investment_rounding += txn.investment_rounding.unwrap_or(0.0);
        self.rounded_operation_amount += txn.rounded_operation_amount.unwrap_or(0.0);
        self.transactions += 1;
    }
}

/// Spending in `category` over the window ending at `reference` (`DD.MM.YYYY`),
/// or ending now when no reference is given.
pub fn spending_by_category(
    txns: &[Transaction],
    category: &str,
    reference: Option<&str>,
    sink: &dyn ReportSink,
) -> Vec<SpendGroup> {
    spending_by_category_at(txns, category, reference, Local::now().naive_local(), sink)
}

/// Same as [`spending_by_category`] with an explicit "now" for the default reference.
pub fn spending_by_category_at(
    txns: &[Transaction],
    category: &str,
    reference: Option<&str>,
    now: NaiveDateTime,
    sink: &dyn ReportSink,
) -> Vec<SpendGroup> {
    match collect(txns, category, reference, now) {
        Ok(groups) => {
            sink.info(
                REPORT,
                &format!("'{category}': {} timestamps in the last 3 months", groups.len()),
            );
            groups
        }
        Err(e) => {
            sink.error(REPORT, &e.to_string());
            Vec::new()
        }
    }
}

fn collect(
    txns: &[Transaction],
    category: &str,
    reference: Option<&str>,
    now: NaiveDateTime,
) -> Result<Vec<SpendGroup>> {
    let end = match reference {
        Some(text) => parse_reference_date(text)?,
        None => now,
    };
    let start = trailing_window_start(end);

    let mut groups: BTreeMap<NaiveDateTime, SpendGroup> = BTreeMap::new();
    for txn in txns {
        let when = txn.operation_datetime()?;
        if when < start || when > end || txn.category.as_deref() != Some(category) {
            continue;
        }
        groups
            .entry(when)
            .or_insert_with(|| SpendGroup {
                date: format_ledger_datetime(when),
                ..SpendGroup::default()
            })
            .add(txn);
    }

    Ok(groups.into_values().collect())
}
