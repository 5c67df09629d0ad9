//! Stock quotes from the Financial Modeling Prep API.

use serde::{Deserialize, Serialize};

use crate::error::LookupError;

pub const DEFAULT_STOCKS_BASE_URL: &str = "https://financialmodelingprep.com";

/// Last price of one stock; `None` when the lookup failed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StockPrice {
    pub stock: String,
    pub price: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct StockQuotesClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl StockQuotesClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: DEFAULT_STOCKS_BASE_URL.to_string(),
            api_key: api_key.into(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Share one configured client (timeouts, proxy) across lookups.
    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }

    /// One entry per requested symbol, in request order. Never fails as a whole.
    pub async fn prices(&self, symbols: &[String]) -> Vec<StockPrice> {
        let mut out = Vec::with_capacity(symbols.len());
        for symbol in symbols {
            tracing::info!(stock = %symbol, "requesting stock quote");
            let price = match self.price(symbol).await {
                Ok(price) => Some(price),
                Err(e) => {
                    tracing::warn!(stock = %symbol, error = %e, "stock quote lookup failed");
                    None
                }
            };
            out.push(StockPrice {
                stock: symbol.clone(),
                price,
            });
        }
        out
    }

    pub async fn price(&self, symbol: &str) -> Result<f64, LookupError> {
        let url = format!("{}/api/v3/quote/{symbol}", self.base_url);
        let resp = self
            .http
            .get(url)
            .query(&[("apikey", self.api_key.as_str())])
            .send()
            .await?;

        let status = resp.status().as_u16();
        let body = resp.text().await?;
        interpret_quote_response(status, &body, symbol)
    }
}

/// Turn a `/quote/{symbol}` response into a price: the first quote's `price`.
pub fn interpret_quote_response(status: u16, body: &str, symbol: &str) -> Result<f64, LookupError> {
    #[derive(Deserialize)]
    struct Quote {
        price: Option<f64>,
    }

    if !(200..300).contains(&status) {
        return Err(LookupError::Status {
            status,
            body: body.to_string(),
        });
    }
    let quotes: Vec<Quote> = serde_json::from_str(body)?;
    quotes
        .first()
        .and_then(|q| q.price)
        .ok_or_else(|| LookupError::NoPrice(symbol.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_first_quote_price() {
        let body = r#"[{"symbol": "AAPL", "name": "Apple Inc.", "price": 145.775}]"#;
        assert_eq!(interpret_quote_response(200, body, "AAPL").unwrap(), 145.775);
    }

    #[test]
    fn test_invalid_key() {
        let body = r#"{"Error Message": "Invalid API KEY."}"#;
        assert!(matches!(
            interpret_quote_response(401, body, "AAPL").unwrap_err(),
            LookupError::Status { status: 401, .. }
        ));
    }

    #[test]
    fn test_unknown_symbol_is_empty_list() {
        assert!(matches!(
            interpret_quote_response(200, "[]", "NOPE").unwrap_err(),
            LookupError::NoPrice(_)
        ));
    }

    #[test]
    fn test_error_object_with_ok_status() {
        let body = r#"{"Error Message": "Limit Reach"}"#;
        assert!(matches!(
            interpret_quote_response(200, body, "AAPL").unwrap_err(),
            LookupError::Json(_)
        ));
    }
}
