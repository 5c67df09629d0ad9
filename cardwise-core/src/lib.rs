//! cardwise-core: transaction model, cashback rule and statement reports

pub mod card_summary;
pub mod cashback;
pub mod category_spend;
pub mod error;
pub mod greeting;
pub mod monthly_cashback;
pub mod sink;
pub mod time;
pub mod top_transactions;
pub mod transaction;

pub use card_summary::{card_summaries, CardSummary, NO_CASHBACK_CATEGORIES};
pub use cashback::{cashback_for, round2, CASHBACK_RATE};
pub use category_spend::{spending_by_category, spending_by_category_at, SpendGroup};
pub use error::ReportError;
pub use greeting::{greeting, Greeting};
pub use monthly_cashback::{cashback_by_category, CategoryCashback};
pub use sink::{NoopSink, ReportSink, TracingSink};
pub use top_transactions::{top_transactions, TopTransaction, TOP_N};
pub use transaction::Transaction;
