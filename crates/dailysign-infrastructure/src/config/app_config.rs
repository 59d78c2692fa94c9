use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use dailysign_domain::check_in::{Forum, ForumMarkers};
use dailysign_domain::notification::ChannelConfig;
use dailysign_domain::shared::DomainError;
use dailysign_domain::Account;

use super::timeouts::TimeoutConfig;
use crate::http::{ClientOptions, RetryConfig};

pub const CONFIG_PATH_ENV: &str = "DAILYSIGN_CONFIG";
const DEFAULT_CONFIG_FILE: &str = "config.json";
const APP_DIR_NAME: &str = "dailysign";

/// Run configuration, loaded once at startup and read-only afterwards
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(rename = "Host", alias = "host", default)]
    pub host: String,

    #[serde(default)]
    pub accounts: Vec<Account>,

    #[serde(rename = "ftqq_SENDKEY", alias = "ftqq_key", default)]
    pub ftqq_key: Option<String>,

    #[serde(rename = "Bark_BASE_URL", alias = "bark_base_url", default)]
    pub bark_base_url: Option<String>,

    /// Disable TLS certificate validation for forum requests
    #[serde(default)]
    pub accept_invalid_certs: bool,

    #[serde(default = "default_bark_params")]
    pub bark_params: BTreeMap<String, serde_json::Value>,

    #[serde(default)]
    pub markers: ForumMarkers,

    #[serde(default)]
    pub log_dir: Option<PathBuf>,

    #[serde(default)]
    pub timeout_secs: Option<u64>,

    #[serde(default)]
    pub retries: Option<u32>,

    #[serde(default)]
    pub backoff_secs: Option<u64>,
}

fn default_bark_params() -> BTreeMap<String, serde_json::Value> {
    let mut params = BTreeMap::new();
    params.insert("badge".to_string(), serde_json::json!(1));
    params.insert("level".to_string(), serde_json::json!("passive"));
    params
}

impl AppConfig {
    /// Parse a config document without touching the environment
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse config JSON")
    }

    /// Read, apply environment overrides and validate
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let mut config = Self::from_json(&raw)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    /// `SENDKEY`, `BARK_BASE_URL` and `DAILYSIGN_HOST` take precedence over the file
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup("SENDKEY").filter(|v| !v.trim().is_empty()) {
            self.ftqq_key = Some(key);
        }
        if let Some(url) = lookup("BARK_BASE_URL").filter(|v| !v.trim().is_empty()) {
            self.bark_base_url = Some(url);
        }
        if let Some(host) = lookup("DAILYSIGN_HOST").filter(|v| !v.trim().is_empty()) {
            self.host = host;
        }
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        let forum = self.forum()?;
        url::Url::parse(forum.base_url()).map_err(|e| {
            DomainError::Config(format!("Invalid forum host {:?}: {}", self.host, e))
        })?;

        if self.accounts.is_empty() {
            return Err(DomainError::Config("No accounts configured".to_string()));
        }

        if let Some(base_url) = self.bark_base_url() {
            url::Url::parse(base_url).map_err(|e| {
                DomainError::Config(format!("Invalid Bark base URL {:?}: {}", base_url, e))
            })?;
        }

        Ok(())
    }

    pub fn forum(&self) -> Result<Forum, DomainError> {
        Ok(Forum::new(&self.host)?.with_markers(self.markers.clone()))
    }

    /// ServerChan key, `None` when absent or blank
    pub fn server_chan_key(&self) -> Option<&str> {
        self.ftqq_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    /// Bark base URL, `None` when absent or blank
    pub fn bark_base_url(&self) -> Option<&str> {
        self.bark_base_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Bark extra query parameters rendered as strings
    pub fn bark_query_params(&self) -> BTreeMap<String, String> {
        self.bark_params
            .iter()
            .map(|(key, value)| {
                let value = match value {
                    serde_json::Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                (key.clone(), value)
            })
            .collect()
    }

    /// Enabled push channels, in dispatch order
    pub fn channel_configs(&self) -> Vec<ChannelConfig> {
        let mut channels = Vec::new();
        if let Some(send_key) = self.server_chan_key() {
            channels.push(ChannelConfig::ServerChan {
                send_key: send_key.to_string(),
            });
        }
        if let Some(base_url) = self.bark_base_url() {
            channels.push(ChannelConfig::Bark {
                base_url: base_url.to_string(),
                params: self.bark_query_params(),
            });
        }
        channels
    }

    /// Options for a fresh forum session
    pub fn client_options(&self, forum: &Forum) -> ClientOptions {
        let timeouts = TimeoutConfig::global();
        ClientOptions {
            timeout: self
                .timeout_secs
                .map(Duration::from_secs)
                .unwrap_or(timeouts.http_request),
            retry: RetryConfig {
                max_attempts: self.retries.unwrap_or(RetryConfig::default().max_attempts),
                backoff: self
                    .backoff_secs
                    .map(Duration::from_secs)
                    .unwrap_or(timeouts.retry_backoff),
            },
            accept_invalid_certs: self.accept_invalid_certs,
            referer: Some(forum.sign_in_page_url()),
        }
    }
}

/// Pick the config file: CLI flag, then `DAILYSIGN_CONFIG`, then
/// `./config.json`, then the user config directory
pub fn resolve_config_path<F>(cli_path: Option<PathBuf>, lookup: F) -> Option<PathBuf>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(path) = cli_path {
        return Some(path);
    }

    if let Some(path) = lookup(CONFIG_PATH_ENV).filter(|v| !v.trim().is_empty()) {
        return Some(PathBuf::from(path));
    }

    let local = PathBuf::from(DEFAULT_CONFIG_FILE);
    if local.is_file() {
        return Some(local);
    }

    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR_NAME).join(DEFAULT_CONFIG_FILE))
        .filter(|path| path.is_file())
}
