//! Account settings for sending and replying
//!
//! Loaded from (in order of priority):
//! 1. JSON file in the gwcli config directory
//! 2. Runtime environment variables (fallback)

use anyhow::{Context, Result};
use serde::Deserialize;
use config::ACCOUNT_FILE;
use std::path::{Path, PathBuf};

const EMAIL_ENV: &str = "GWCLI_ACCOUNT_EMAIL";
const TOKEN_ENV: &str = "GWCLI_ACCESS_TOKEN";

/// The local account: its own address and API access token
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AccountSettings {
    /// Address of the local user, left out of reply-all recipients
    pub email: String,
    /// OAuth access token for the Gmail API, if sending or fetching
    #[serde(default)]
    pub access_token: Option<String>,
}

impl AccountSettings {
    /// Load settings from ~/.config/gwcli/account.json, falling back to
    /// environment variables.
    pub fn load() -> Result<Self> {
        if let Some(path) = config::existing_account_path() {
            return Self::from_file(&path);
        }

        Self::from_env()
    }

    /// Load settings from a specific JSON file
    pub fn from_file(path: &Path) -> Result<Self> {
        config::read_json(path, "account settings")
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse account settings JSON")
    }

    /// Load settings from environment variables; the token is optional
    pub fn from_env() -> Result<Self> {
        let email = std::env::var(EMAIL_ENV)
            .with_context(|| format!("{} environment variable not set", EMAIL_ENV))?;
        let access_token = std::env::var(TOKEN_ENV).ok().filter(|t| !t.is_empty());

        Ok(Self {
            email,
            access_token,
        })
    }

    /// Access token, or an error explaining how to provide one
    pub fn require_access_token(&self) -> Result<&str> {
        self.access_token.as_deref().with_context(|| {
            format!(
                "No access token configured; set {} or add \"access_token\" to {}",
                TOKEN_ENV, ACCOUNT_FILE
            )
        })
    }

    /// Get the default settings file path (~/.config/gwcli/account.json)
    pub fn default_settings_path() -> Option<PathBuf> {
        config::account_path()
    }
}
