//! The largest transactions by absolute payment amount.

use serde::Serialize;

use crate::error::{ReportError, Result};
use crate::sink::ReportSink;
use crate::transaction::Transaction;

const REPORT: &str = "top_transactions";

/// How many transactions the ranking keeps.
pub const TOP_N: usize = 5;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TopTransaction {
    /// Operation timestamp as written in the ledger
    pub date: String,
    pub amount: f64,
    pub category: Option<String>,
    pub description: Option<String>,
}

impl From<&Transaction> for TopTransaction {
    fn from(txn: &Transaction) -> Self {
        Self {
            date: txn.operation_date.clone(),
            amount: txn.payment_amount,
            category: txn.category.clone(),
            description: txn.description.clone(),
        }
    }
}

/// Top [`TOP_N`] transactions by `|payment_amount|`, largest first.
/// Equal magnitudes keep ledger order. Soft-fails to an empty list.
pub fn top_transactions(txns: &[Transaction], sink: &dyn ReportSink) -> Vec<TopTransaction> {
    match rank(txns) {
        Ok(top) => {
            sink.info(REPORT, &format!("ranked {} of {} transactions", top.len(), txns.len()));
            top
        }
        Err(e) => {
            sink.error(REPORT, &e.to_string());
            Vec::new()
        }
    }
}

fn rank(txns: &[Transaction]) -> Result<Vec<TopTransaction>> {
    if let Some(bad) = txns.iter().find(|t| !t.payment_amount.is_finite()) {
        return Err(ReportError::NonFiniteAmount(bad.payment_amount));
    }

    let mut ranked: Vec<&Transaction> = txns.iter().collect();
    // sort_by is stable, ties stay in ledger order
    ranked.sort_by(|a, b| b.abs_amount().total_cmp(&a.abs_amount()));

    Ok(ranked.into_iter().take(TOP_N).map(TopTransaction::from).collect())
}
