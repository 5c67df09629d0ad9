//! The state directory: `$CARDWISE_HOME` when set, otherwise `~/.cardwise`.

use anyhow::{Context, Result};
use std::env;
use std::ffi::OsString;
use std::fs;
use std::path::PathBuf;

/// Points cardwise at another state directory (tests, multiple ledgers).
pub const HOME_OVERRIDE_VAR: &str = "CARDWISE_HOME";

pub fn cardwise_home() -> Result<PathBuf> {
    resolve_home(env::var_os(HOME_OVERRIDE_VAR), env::var_os("HOME"))
}

/// Resolve and create the state directory.
pub fn ensure_cardwise_home() -> Result<PathBuf> {
    let dir = cardwise_home()?;
    if !dir.is_dir() {
        fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
        tracing::info!(dir = %dir.display(), "created state directory");
    }
    Ok(dir)
}

fn resolve_home(override_dir: Option<OsString>, home: Option<OsString>) -> Result<PathBuf> {
    if let Some(dir) = override_dir.filter(|d| !d.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    let home = home
        .filter(|h| !h.is_empty())
        .with_context(|| format!("neither {HOME_OVERRIDE_VAR} nor HOME is set"))?;
    Ok(PathBuf::from(home).join(".cardwise"))
}
