//! Spend and cashback totals per card.

use serde::Serialize;
use std::collections::HashMap;

use crate::cashback::{round2, unrounded_cashback_for};
use crate::sink::ReportSink;
use crate::transaction::Transaction;

const REPORT: &str = "card_summary";

/// Category labels that never earn cashback.
pub const NO_CASHBACK_CATEGORIES: [&str; 2] = ["Переводы", "Наличные"];

/// Totals for one card, rounded to 2 decimals.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CardSummary {
    pub last_digits: String,
    pub total_spent: f64,
    pub cashback: f64,
}

/// Summarize spending per card, in order of first appearance.
///
/// Rows without a usable card are skipped. Inflows register the card but
/// leave its totals alone.
pub fn card_summaries(txns: &[Transaction], sink: &dyn ReportSink) -> Vec<CardSummary> {
    let mut order: Vec<&str> = Vec::new();
    let mut totals: HashMap<&str, (f64, f64)> = HashMap::new();

    for txn in txns {
        let Some(card) = txn.card() else { continue };
        let entry = totals.entry(card).or_insert_with(|| {
            order.push(card);
            (0.0, 0.0)
        });

        if !txn.is_expense() {
            continue;
        }
        entry.0 += txn.abs_amount();
        if earns_cashback(txn) {
            entry.1 += unrounded_cashback_for(txn);
        }
    }

    let summaries: Vec<CardSummary> = order
        .into_iter()
        .map(|card| {
            let (spent, cashback) = totals[card];
            CardSummary {
                last_digits: card.to_string(),
                total_spent: round2(spent),
                cashback: round2(cashback),
            }
        })
        .collect();

    sink.info(REPORT, &format!("summarized {} cards", summaries.len()));
    summaries
}

fn earns_cashback(txn: &Transaction) -> bool {
    !NO_CASHBACK_CATEGORIES.contains(&txn.category_key())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::NoopSink;

    fn summary(card: &str, spent: f64, cashback: f64) -> CardSummary {
        CardSummary {
            last_digits: card.to_string(),
            total_spent: spent,
            cashback,
        }
    }

    #[test]
    fn test_estimate_and_declared_cashback() {
        let txns = vec![
            Transaction::new("01.06.2023 12:00:00", -300.0)
                .with_category("Одежда")
                .with_card("1234"),
            Transaction::new("02.06.2023 12:00:00", -50.0)
                .with_category("Еда")
                .with_card("5678")
                .with_declared_cashback(0.5),
        ];
        assert_eq!(
            card_summaries(&txns, &NoopSink),
            vec![summary("1234", 300.0, 3.0), summary("5678", 50.0, 0.5)]
        );
    }

    #[test]
    fn test_declared_value_wins_over_one_percent() {
        let txns = vec![
            Transaction::new("01.06.2023 12:00:00", -300.0).with_card("1234"),
            Transaction::new("02.06.2023 12:00:00", -50.0)
                .with_card("1234")
                .with_declared_cashback(0.5),
        ];
        assert_eq!(card_summaries(&txns, &NoopSink), vec![summary("1234", 350.0, 3.5)]);
    }

    #[test]
    fn test_transfers_and_cash_earn_nothing() {
        let txns = vec![
            Transaction::new("01.06.2023 12:00:00", -1000.0)
                .with_category("Переводы")
                .with_card("1234")
                .with_declared_cashback(10.0),
            Transaction::new("02.06.2023 12:00:00", -2000.0)
                .with_category("Наличные")
                .with_card("1234"),
            Transaction::new("03.06.2023 12:00:00", -100.0)
                .with_category("Еда")
                .with_card("1234"),
        ];
        assert_eq!(card_summaries(&txns, &NoopSink), vec![summary("1234", 3100.0, 1.0)]);
    }

    #[test]
    fn test_placeholder_cards_are_skipped() {
        let txns = vec![
            Transaction::new("01.06.2023 12:00:00", -100.0).with_card("1234"),
            Transaction::new("01.06.2023 13:00:00", -900.0).with_card("nan"),
            Transaction::new("01.06.2023 14:00:00", -900.0).with_card(" "),
            Transaction::new("01.06.2023 15:00:00", -900.0),
            Transaction::new("01.06.2023 16:00:00", -50.0)
                .with_card("5678")
                .with_declared_cashback(0.5),
        ];
        assert_eq!(
            card_summaries(&txns, &NoopSink),
            vec![summary("1234", 100.0, 1.0), summary("5678", 50.0, 0.5)]
        );
    }

    #[test]
    fn test_negative_declared_cashback_uses_estimate() {
        let txns = vec![
            Transaction::new("01.06.2023 12:00:00", -100.0)
                .with_card("1234")
                .with_declared_cashback(-1.0),
        ];
        assert_eq!(card_summaries(&txns, &NoopSink), vec![summary("1234", 100.0, 1.0)]);
    }

    #[test]
    fn test_inflow_only_card_has_zero_entry() {
        let txns = vec![Transaction::new("01.06.2023 12:00:00", 5000.0).with_card("4321")];
        assert_eq!(card_summaries(&txns, &NoopSink), vec![summary("4321", 0.0, 0.0)]);
    }

    #[test]
    fn test_totals_rounded_not_rows() {
        // 3 x 0.333 = 0.999 -> 1.0; rounding each row first would give 0.99
        let txns: Vec<Transaction> = (0..3)
            .map(|_| Transaction::new("01.06.2023 12:00:00", -33.3).with_card("1234"))
            .collect();
        let got = card_summaries(&txns, &NoopSink);
        assert_eq!(got[0].total_spent, 99.9);
        assert_eq!(got[0].cashback, 1.0);
    }

    #[test]
    fn test_empty_ledger() {
        assert!(card_summaries(&[], &NoopSink).is_empty());
    }
}
