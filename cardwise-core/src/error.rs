use thiserror::Error;

/// Failures raised while computing a report.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("invalid operation timestamp '{value}': {source}")]
    InvalidTimestamp {
        value: String,
        #[source]
        source: chrono::ParseError,
    },
    #[error("invalid reference date '{value}': {source}")]
    InvalidReferenceDate {
        value: String,
        #[source]
        source: chrono::ParseError,
    },
    #[error("invalid greeting time '{value}': {source}")]
    InvalidGreetingTime {
        value: String,
        #[source]
        source: chrono::ParseError,
    },
    #[error("month must be within 1..=12, got {0}")]
    InvalidMonth(u32),
    #[error("payment amount is not a finite number: {0}")]
    NonFiniteAmount(f64),
}

pub type Result<T> = std::result::Result<T, ReportError>;
