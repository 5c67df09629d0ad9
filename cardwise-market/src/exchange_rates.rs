//! Currency to RUB rates from the apilayer exchange rates API.

use serde::{Deserialize, Serialize};

use crate::error::LookupError;

pub const DEFAULT_EXCHANGE_BASE_URL: &str = "https://api.apilayer.com";

/// Rate of one currency in roubles; `None` when the lookup failed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CurrencyRate {
    pub currency: String,
    pub rate: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct ExchangeRatesClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl ExchangeRatesClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: DEFAULT_EXCHANGE_BASE_URL.to_string(),
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

    /// One entry per requested code, in request order. Never fails as a whole.
    pub async fn rates(&self, currencies: &[String]) -> Vec<CurrencyRate> {
        let mut out = Vec::with_capacity(currencies.len());
        for currency in currencies {
            tracing::info!(currency = %currency, "requesting exchange rate");
            let rate = match self.rate(currency).await {
                Ok(rate) => Some(rate),
                Err(e) => {
                    tracing::warn!(currency = %currency, error = %e, "exchange rate lookup failed");
                    None
                }
            };
            out.push(CurrencyRate {
                currency: currency.clone(),
                rate,
            });
        }
        out
    }

    /// Price of one unit of `currency` in RUB.
    pub async fn rate(&self, currency: &str) -> Result<f64, LookupError> {
        let url = format!("{}/exchangerates_data/convert", self.base_url);
        let resp = self
            .http
            .get(url)
            .query(&[("to", "RUB"), ("from", currency), ("amount", "1")])
            .header("apikey", &self.api_key)
            .send()
            .await?;

        let status = resp.status().as_u16();
        let body = resp.text().await?;
        interpret_convert_response(status, &body, currency)
    }
}

/// Turn a `/convert` response into a rate.
pub fn interpret_convert_response(status: u16, body: &str, currency: &str) -> Result<f64, LookupError> {
    #[derive(Deserialize)]
    struct Convert {
        result: Option<f64>,
    }

    if !(200..300).contains(&status) {
        return Err(LookupError::Status {
            status,
            body: body.to_string(),
        });
    }
    let parsed: Convert = serde_json::from_str(body)?;
    parsed
        .result
        .ok_or_else(|| LookupError::NoPrice(currency.to_string()))
}
