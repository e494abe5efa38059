//! Where gwcli keeps its files
//!
//! The only persistent file is `~/.config/gwcli/account.json`, holding the
//! sender address and Gmail access token. Compose requests are JSON files
//! named on the command line; both go through [`read_json`] so a failure
//! names the file and what it was supposed to be.

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "gwcli";

/// Account settings file inside [`config_dir`]
pub const ACCOUNT_FILE: &str = "account.json";

/// Create ~/.config/gwcli/ if it is missing and return it.
///
/// Called once at startup so users have somewhere to drop `account.json`.
pub fn init() -> Result<PathBuf> {
    let dir = config_dir().context("Could not determine config directory")?;
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create config directory: {}", dir.display()))?;
    Ok(dir)
}

pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join(APP_DIR))
}

/// ~/.config/gwcli/account.json, whether or not it exists
pub fn account_path() -> Option<PathBuf> {
    config_dir().map(|p| p.join(ACCOUNT_FILE))
}

/// The account file, if the user has created one
pub fn existing_account_path() -> Option<PathBuf> {
    account_path().filter(|p| p.is_file())
}

/// Read and deserialize a JSON document; `what` names it in errors
/// ("account settings", "compose request").
pub fn read_json<T: DeserializeOwned>(path: &Path, what: &str) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}: {}", what, path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {}: {}", what, path.display()))
}
