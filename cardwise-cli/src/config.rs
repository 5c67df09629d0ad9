use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use cardwise_market::{DEFAULT_EXCHANGE_BASE_URL, DEFAULT_STOCKS_BASE_URL};

use crate::state::ensure_cardwise_home;

/// Environment variable holding the apilayer key.
pub const CURRENCY_API_KEY_VAR: &str = "API_KEY_CURRENCY";
/// Environment variable holding the Financial Modeling Prep key.
pub const STOCKS_API_KEY_VAR: &str = "API_KEY_STOCKS";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub ledger: LedgerSection,
    pub market: MarketSection,
    pub reports: ReportsSection,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LedgerSection {
    /// Statement CSV export
    pub path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MarketSection {
    pub currencies: Vec<String>,
    pub stocks: Vec<String>,
    pub exchange_base_url: String,
    pub stocks_base_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ReportsSection {
    /// File that captures the latest report result (or its failure)
    pub output: PathBuf,
}

impl Default for LedgerSection {
    fn default() -> Self {
        Self {
            path: PathBuf::from("data").join("operations.csv"),
        }
    }
}

impl Default for MarketSection {
    fn default() -> Self {
        Self {
            currencies: vec!["USD".to_string(), "EUR".to_string()],
            stocks: ["AAPL", "AMZN", "GOOGL", "MSFT", "TSLA"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            exchange_base_url: DEFAULT_EXCHANGE_BASE_URL.to_string(),
            stocks_base_url: DEFAULT_STOCKS_BASE_URL.to_string(),
            timeout_secs: 10,
        }
    }
}

impl Default for ReportsSection {
    fn default() -> Self {
        Self {
            output: PathBuf::from("function_operation_report.txt"),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(ensure_cardwise_home()?.join("config.toml"))
}

pub fn load_config() -> Result<Config> {
    load_config_from(&config_path()?)
}

/// Missing file means defaults.
pub fn load_config_from(p: &Path) -> Result<Config> {
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(p).with_context(|| format!("read {}", p.display()))?;
    toml::from_str(&s).with_context(|| format!("parse {}", p.display()))
}

pub fn save_config_to(cfg: &Config, p: &Path) -> Result<()> {
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

pub fn init_config() -> Result<()> {
    let p = config_path()?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config_to(&Config::default(), &p)?;
    println!("Wrote {}", p.display());
    Ok(())
}

/// API key from the environment; blank counts as unset.
pub fn api_key(var: &str) -> Option<String> {
    std::env::var(var)
        .ok()
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty())
}
