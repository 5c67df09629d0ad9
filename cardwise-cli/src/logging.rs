use anyhow::Result;
use tracing_subscriber::EnvFilter;

/// Used when `RUST_LOG` is unset or unparsable.
pub const DEFAULT_DIRECTIVE: &str = "cardwise=info";

/// Install the global subscriber. Logs go to stderr; stdout carries report JSON.
pub fn init_tracing() -> Result<()> {
    let filter = filter_from(std::env::var(EnvFilter::DEFAULT_ENV).ok().as_deref());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("install tracing subscriber: {e}"))
}

/// `RUST_LOG` directives replace the default entirely.
fn filter_from(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_DIRECTIVE))
}
