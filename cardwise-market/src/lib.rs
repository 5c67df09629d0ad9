//! cardwise-market: currency rates and stock quotes for the home page.

pub mod error;
pub mod exchange_rates;
pub mod stock_quotes;

pub use error::LookupError;
pub use exchange_rates::{CurrencyRate, ExchangeRatesClient, DEFAULT_EXCHANGE_BASE_URL};
pub use stock_quotes::{StockPrice, StockQuotesClient, DEFAULT_STOCKS_BASE_URL};
