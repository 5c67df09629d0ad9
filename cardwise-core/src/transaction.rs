//! Transaction record types for bank-card statement rows

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::time::parse_ledger_datetime;

/// One row of a card statement.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    /// Operation timestamp as written in the ledger (`DD.MM.YYYY HH:MM:SS`).
    /// Parsed on demand by reports that filter on dates.
    pub operation_date: String,
    /// Positive = inflow, negative = expense
    pub payment_amount: f64,
    pub category: Option<String>,
    pub description: Option<String>,
    /// Masked card number, e.g. `*7197`
    pub card_identifier: Option<String>,
    /// Cashback the bank already reported for this row
    pub declared_cashback: Option<f64>,

    pub payment_date: Option<String>,
    pub status: Option<String>,
    pub operation_amount: Option<f64>,
    pub operation_currency: Option<String>,
    pub payment_currency: Option<String>,
    pub mcc: Option<u32>,
    /// Bonuses, cashback included
    pub bonuses: Option<f64>,
    /// Round-up sent to the investment piggy bank
    pub investment_rounding: Option<f64>,
    pub rounded_operation_amount: Option<f64>,
}

impl Transaction {
    /// Minimal record: timestamp text and payment amount.
    pub fn new(operation_date: impl Into<String>, payment_amount: f64) -> Self {
        Self {
            operation_date: operation_date.into(),
            payment_amount,
            ..Self::default()
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_card(mut self, card: impl Into<String>) -> Self {
        self.card_identifier = Some(card.into());
        self
    }

    pub fn with_declared_cashback(mut self, cashback: f64) -> Self {
        self.declared_cashback = Some(cashback);
        self
    }

    /// Parse the operation timestamp.
    pub fn operation_datetime(&self) -> Result<NaiveDateTime> {
        parse_ledger_datetime(&self.operation_date)
    }

    /// Returns true if money left the account
    pub fn is_expense(&self) -> bool {
        self.payment_amount < 0.0
    }

    pub fn abs_amount(&self) -> f64 {
        self.payment_amount.abs()
    }

    /// Category label, with a missing category mapped to `""`.
    pub fn category_key(&self) -> &str {
        self.category.as_deref().unwrap_or("")
    }

    /// Card key, or `None` for blank and `nan` placeholders.
    pub fn card(&self) -> Option<&str> {
        let card = self.card_identifier.as_deref()?;
        let trimmed = card.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("nan") {
            return None;
        }
        Some(card)
    }

    /// Declared cashback if it is usable (present and non-negative).
    pub fn usable_declared_cashback(&self) -> Option<f64> {
        self.declared_cashback.filter(|c| *c >= 0.0)
    }
}
