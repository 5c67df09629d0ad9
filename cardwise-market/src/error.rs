use thiserror::Error;

/// Why a single symbol could not be priced.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("provider answered {status}: {body}")]
    Status { status: u16, body: String },
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected response body: {0}")]
    Json(#[from] serde_json::Error),
    #[error("response has no price for {0}")]
    NoPrice(String),
}
