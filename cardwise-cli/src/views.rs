//! Home page: greeting, per-card totals, top transactions and market prices.

use anyhow::Result;
use serde::Serialize;
use std::time::Duration;

use cardwise_core::{
    card_summaries, greeting, top_transactions, CardSummary, Greeting, TopTransaction, Transaction,
    TracingSink,
};
use cardwise_market::{CurrencyRate, ExchangeRatesClient, StockPrice, StockQuotesClient};

use crate::config::{api_key, MarketSection, CURRENCY_API_KEY_VAR, STOCKS_API_KEY_VAR};

#[derive(Debug, Clone, Serialize)]
pub struct HomePage {
    pub greeting: Greeting,
    pub cards: Vec<CardSummary>,
    pub top_transactions: Vec<TopTransaction>,
    pub exchange_rates: Vec<CurrencyRate>,
    pub stocks: Vec<StockPrice>,
}

/// Build the home page for `time` (`YYYY-MM-DD HH:MM:SS`).
pub async fn home_page(time: &str, txns: &[Transaction], market: &MarketSection) -> Result<HomePage> {
    let greeting = greeting(time)?;
    let cards = card_summaries(txns, &TracingSink);
    let top = top_transactions(txns, &TracingSink);

    let http = reqwest_client(market)?;
    let exchange = ExchangeRatesClient::new(key_or_warn(CURRENCY_API_KEY_VAR))
        .with_base_url(market.exchange_base_url.as_str())
        .with_http_client(http.clone());
    let stocks = StockQuotesClient::new(key_or_warn(STOCKS_API_KEY_VAR))
        .with_base_url(market.stocks_base_url.as_str())
        .with_http_client(http);

    let exchange_rates = exchange.rates(&market.currencies).await;
    let stocks = stocks.prices(&market.stocks).await;

    tracing::info!("home page assembled");
    Ok(HomePage {
        greeting,
        cards,
        top_transactions: top,
        exchange_rates,
        stocks,
    })
}

fn reqwest_client(market: &MarketSection) -> Result<reqwest::Client> {
    Ok(reqwest::Client::builder()
        .timeout(Duration::from_secs(market.timeout_secs))
        .build()?)
}

fn key_or_warn(var: &str) -> String {
    api_key(var).unwrap_or_else(|| {
        tracing::warn!(var, "API key is not set; lookups will be rejected");
        String::new()
    })
}
