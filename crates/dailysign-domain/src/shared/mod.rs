use serde::{Deserialize, Serialize};

/// Error codes for structured error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    // Authentication (1xxx)
    AuthFailed = 1001,

    // Check-in (3xxx)
    FormExtractionFailed = 3001,
    SubmissionFailed = 3002,

    // Infrastructure (5xxx)
    TransportError = 5002,
    PushFailed = 5004,

    // Configuration & validation (6xxx)
    ConfigError = 6001,
    InvalidInput = 6002,
}

impl ErrorCode {
    /// Get error code as integer
    pub fn code(&self) -> u16 {
        *self as u16
    }

    /// Get error severity
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ErrorCode::AuthFailed
            | ErrorCode::FormExtractionFailed
            | ErrorCode::SubmissionFailed
            | ErrorCode::PushFailed => ErrorSeverity::Error,

            ErrorCode::TransportError | ErrorCode::ConfigError => ErrorSeverity::Critical,

            ErrorCode::InvalidInput => ErrorSeverity::Warning,
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl ErrorSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorSeverity::Info => "info",
            ErrorSeverity::Warning => "warning",
            ErrorSeverity::Error => "error",
            ErrorSeverity::Critical => "critical",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("Transport failure: {0}")]
    Transport(String),

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Form extraction failed: {0}")]
    FormExtraction(String),

    #[error("Check-in submission failed: {0}")]
    Submission(String),

    #[error("Push failed: {0}")]
    Push(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl DomainError {
    /// Get error code
    pub fn code(&self) -> ErrorCode {
        match self {
            DomainError::Transport(_) => ErrorCode::TransportError,
            DomainError::Auth(_) => ErrorCode::AuthFailed,
            DomainError::FormExtraction(_) => ErrorCode::FormExtractionFailed,
            DomainError::Submission(_) => ErrorCode::SubmissionFailed,
            DomainError::Push(_) => ErrorCode::PushFailed,
            DomainError::Config(_) => ErrorCode::ConfigError,
            DomainError::InvalidInput(_) => ErrorCode::InvalidInput,
        }
    }

    /// Get error message
    pub fn message(&self) -> &str {
        match self {
            DomainError::Transport(msg)
            | DomainError::Auth(msg)
            | DomainError::FormExtraction(msg)
            | DomainError::Submission(msg)
            | DomainError::Push(msg)
            | DomainError::Config(msg)
            | DomainError::InvalidInput(msg) => msg,
        }
    }

    /// Get error severity
    pub fn severity(&self) -> ErrorSeverity {
        self.code().severity()
    }

    /// Format error with code
    pub fn format_with_code(&self) -> String {
        format!("[{}] {}", self.code().code(), self)
    }
}
