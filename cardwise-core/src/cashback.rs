//! Cashback estimation for a single expense.

use crate::transaction::Transaction;

/// Flat rate applied when the bank did not report cashback: 1 per 100 spent.
pub const CASHBACK_RATE: f64 = 0.01;

/// Round to 2 decimal places, half away from zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Cashback for one transaction.
///
/// A declared non-negative cashback is returned verbatim. Otherwise the
/// estimate is `round2(|amount| * 0.01)`. Inflows earn nothing.
pub fn cashback_for(txn: &Transaction) -> f64 {
    if !txn.is_expense() {
        return 0.0;
    }
    txn.usable_declared_cashback()
        .unwrap_or_else(|| round2(txn.abs_amount() * CASHBACK_RATE))
}

/// Same priority as [`cashback_for`], without rounding the 1% estimate.
/// Used where only the totals get rounded.
pub fn unrounded_cashback_for(txn: &Transaction) -> f64 {
    if !txn.is_expense() {
        return 0.0;
    }
    txn.usable_declared_cashback()
        .unwrap_or_else(|| txn.abs_amount() * CASHBACK_RATE)
}
