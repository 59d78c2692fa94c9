use std::time::Duration;

/// Configuration for the timing constants used by outbound calls
#[derive(Debug, Clone)]
pub struct TimeoutConfig {
    /// Forum HTTP request timeout
    pub http_request: Duration,

    /// Pause between forum request attempts
    pub retry_backoff: Duration,

    /// Push channel request timeout
    pub push_request: Duration,

    /// Pause between ServerChan attempts
    pub push_backoff: Duration,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        GLOBAL_TIMEOUT_CONFIG.clone()
    }
}

impl TimeoutConfig {
    /// Get the global timeout configuration
    pub fn global() -> &'static Self {
        &GLOBAL_TIMEOUT_CONFIG
    }
}

/// Global timeout configuration instance
static GLOBAL_TIMEOUT_CONFIG: TimeoutConfig = TimeoutConfig {
    http_request: Duration::from_secs(10),
    retry_backoff: Duration::from_secs(2),
    push_request: Duration::from_secs(10),
    push_backoff: Duration::from_secs(2),
};
