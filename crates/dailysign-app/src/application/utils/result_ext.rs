use log::{error, info, warn};

use dailysign_domain::shared::{DomainError, ErrorSeverity};

/// Extension trait for logging domain failures at their own severity
pub trait ResultExt<T> {
    /// Log the error with `context`, then hand the result back unchanged
    /// Usage: `client.fetch_sign_in_page(forum).await.log_err("获取签到页面失败")`
    fn log_err(self, context: &str) -> Result<T, DomainError>;
}

impl<T> ResultExt<T> for Result<T, DomainError> {
    fn log_err(self, context: &str) -> Result<T, DomainError> {
        if let Err(e) = &self {
            match e.severity() {
                // Critical failures were already reported where they happened
                ErrorSeverity::Critical | ErrorSeverity::Error => {
                    error!("{}: {}", context, e.format_with_code())
                }
                ErrorSeverity::Warning => warn!("{}: {}", context, e.format_with_code()),
                ErrorSeverity::Info => info!("{}: {}", context, e.format_with_code()),
            }
        }
        self
    }
}
