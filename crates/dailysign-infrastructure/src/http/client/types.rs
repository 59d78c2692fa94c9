use std::fmt;
use std::time::Duration;

use crate::config::TimeoutConfig;

pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/85.0.4183.102 Safari/537.36";

/// HTTP retry configuration
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Total number of attempts, including the first one (default: 3)
    pub max_attempts: u32,
    /// Fixed pause between attempts (default: 2s)
    pub backoff: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff: TimeoutConfig::global().retry_backoff,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HttpMethod::Get => write!(f, "GET"),
            HttpMethod::Post => write!(f, "POST"),
        }
    }
}

/// Construction options for one forum session
#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub timeout: Duration,
    pub retry: RetryConfig,
    /// Skip TLS certificate validation for this client only
    pub accept_invalid_certs: bool,
    /// Sent as the `Referer` header on every request
    pub referer: Option<String>,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            timeout: TimeoutConfig::global().http_request,
            retry: RetryConfig::default(),
            accept_invalid_certs: false,
            referer: None,
        }
    }
}
