use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::shared::DomainError;

/// Channel type enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelType {
    /// ServerChan (sctapi.ftqq.com)
    ServerChan,
    /// Bark iOS push
    Bark,
}

impl ChannelType {
    pub fn as_str(&self) -> &str {
        match self {
            ChannelType::ServerChan => "server_chan",
            ChannelType::Bark => "bark",
        }
    }
}

impl FromStr for ChannelType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "server_chan" | "ftqq" => Ok(ChannelType::ServerChan),
            "bark" => Ok(ChannelType::Bark),
            _ => Err(DomainError::InvalidInput(format!(
                "Unknown channel type: {s}"
            ))),
        }
    }
}

impl fmt::Display for ChannelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Channel configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChannelConfig {
    /// ServerChan SENDKEY
    ServerChan { send_key: String },
    /// Bark base URL (ending with the device key and `/`) plus extra query params
    Bark {
        base_url: String,
        params: BTreeMap<String, String>,
    },
}

impl ChannelConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), DomainError> {
        match self {
            ChannelConfig::ServerChan { send_key } => {
                if send_key.trim().is_empty() {
                    return Err(DomainError::InvalidInput(
                        "ServerChan send_key cannot be empty".to_string(),
                    ));
                }
            }
            ChannelConfig::Bark { base_url, .. } => {
                if base_url.trim().is_empty() {
                    return Err(DomainError::InvalidInput(
                        "Bark base_url cannot be empty".to_string(),
                    ));
                }
            }
        }
        Ok(())
    }

    /// Get channel type from config
    pub fn channel_type(&self) -> ChannelType {
        match self {
            ChannelConfig::ServerChan { .. } => ChannelType::ServerChan,
            ChannelConfig::Bark { .. } => ChannelType::Bark,
        }
    }
}
