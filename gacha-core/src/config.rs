//! Configuration management
//!
//! Settings live in `settings.json` in the data directory:
//! ```json
//! {
//!   "authBaseUrl": "https://localhost:5001/auth_service",
//!   "paymentBaseUrl": "https://localhost:5001/payment_service",
//!   "acceptInvalidCerts": true,
//!   "requestTimeoutSecs": null
//! }
//! ```
//! Unknown fields are kept when the file is saved.

use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::adapters::{HttpSettings, DEFAULT_AUTH_URL, DEFAULT_PAYMENT_URL};

/// Environment variable overriding the auth service URL
pub const AUTH_URL_ENV: &str = "GACHA_AUTH_URL";
/// Environment variable overriding the payment service URL
pub const PAYMENT_URL_ENV: &str = "GACHA_PAYMENT_URL";
/// Environment variable overriding certificate validation
pub const ACCEPT_INVALID_CERTS_ENV: &str = "GACHA_ACCEPT_INVALID_CERTS";

const SETTINGS_FILE: &str = "settings.json";

/// Raw settings.json structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettingsFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    auth_base_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    payment_base_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    accept_invalid_certs: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    request_timeout_secs: Option<u64>,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

/// Client configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    pub auth_base_url: String,
    pub payment_base_url: String,
    /// Services use self-signed certificates in local development
    pub accept_invalid_certs: bool,
    /// `None` means no client-side timeout
    pub request_timeout_secs: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            auth_base_url: DEFAULT_AUTH_URL.to_string(),
            payment_base_url: DEFAULT_PAYMENT_URL.to_string(),
            accept_invalid_certs: true,
            request_timeout_secs: None,
        }
    }
}

impl Config {
    /// Load config from the data directory, then apply environment overrides
    pub fn load(data_dir: &Path) -> Result<Self> {
        let mut config = Self::load_file(data_dir)?;

        if let Ok(url) = std::env::var(AUTH_URL_ENV) {
            config.auth_base_url = url;
        }
        if let Ok(url) = std::env::var(PAYMENT_URL_ENV) {
            config.payment_base_url = url;
        }
        if let Some(flag) = std::env::var(ACCEPT_INVALID_CERTS_ENV)
            .ok()
            .as_deref()
            .and_then(parse_bool)
        {
            config.accept_invalid_certs = flag;
        }

        Ok(config)
    }

    /// Load config from settings.json only, ignoring the environment
    pub fn load_file(data_dir: &Path) -> Result<Self> {
        let raw = read_settings(data_dir)?;
        let defaults = Config::default();

        Ok(Config {
            auth_base_url: raw.auth_base_url.unwrap_or(defaults.auth_base_url),
            payment_base_url: raw.payment_base_url.unwrap_or(defaults.payment_base_url),
            accept_invalid_certs: raw
                .accept_invalid_certs
                .unwrap_or(defaults.accept_invalid_certs),
            request_timeout_secs: raw.request_timeout_secs,
        })
    }

    /// Save config to the data directory, preserving unmanaged fields
    pub fn save(&self, data_dir: &Path) -> Result<()> {
        let mut settings = read_settings(data_dir)?;

        settings.auth_base_url = Some(self.auth_base_url.clone());
        settings.payment_base_url = Some(self.payment_base_url.clone());
        settings.accept_invalid_certs = Some(self.accept_invalid_certs);
        settings.request_timeout_secs = self.request_timeout_secs;

        std::fs::create_dir_all(data_dir)?;
        let content = serde_json::to_string_pretty(&settings)?;
        std::fs::write(data_dir.join(SETTINGS_FILE), content)?;
        Ok(())
    }

    /// Update one setting by its settings.json key
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "authBaseUrl" => self.auth_base_url = value.to_string(),
            "paymentBaseUrl" => self.payment_base_url = value.to_string(),
            "acceptInvalidCerts" => {
                self.accept_invalid_certs = parse_bool(value)
                    .with_context(|| format!("Expected true or false, got '{}'", value))?;
            }
            "requestTimeoutSecs" => {
                self.request_timeout_secs = match value {
                    "" | "none" => None,
                    secs => Some(
                        secs.parse()
                            .with_context(|| format!("Expected seconds, got '{}'", secs))?,
                    ),
                };
            }
            other => bail!(
                "Unknown setting: {}. Available: authBaseUrl, paymentBaseUrl, \
                 acceptInvalidCerts, requestTimeoutSecs",
                other
            ),
        }
        Ok(())
    }

    /// HTTP settings for the service clients
    pub fn http_settings(&self) -> HttpSettings {
        HttpSettings {
            accept_invalid_certs: self.accept_invalid_certs,
            timeout: self.request_timeout_secs.map(Duration::from_secs),
        }
    }
}

fn read_settings(data_dir: &Path) -> Result<SettingsFile> {
    let settings_path = data_dir.join(SETTINGS_FILE);
    if !settings_path.exists() {
        return Ok(SettingsFile::default());
    }

    let content = std::fs::read_to_string(&settings_path)
        .with_context(|| format!("Failed to read {:?}", settings_path))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Invalid settings file {:?}", settings_path))
}

fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "true" | "1" | "yes" | "TRUE" | "YES" => Some(true),
        "false" | "0" | "no" | "FALSE" | "NO" => Some(false),
        _ => None,
    }
}
