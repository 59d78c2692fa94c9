use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::value_objects::ChannelType;
use crate::shared::DomainError;

/// Title used for the run summary push
pub const SUMMARY_TITLE: &str = "🌏️签到结果汇总";

/// Notification message to be sent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationMessage {
    /// Message title
    pub title: String,
    /// Message content/body
    pub content: String,
}

impl NotificationMessage {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }

    /// Summary message built from rendered result lines
    pub fn summary(lines: &[String]) -> Self {
        Self::new(SUMMARY_TITLE, lines.join("\n"))
    }
}

/// Notification sender trait (Strategy pattern)
/// Each push channel implements this trait
#[async_trait]
pub trait NotificationSender: Send + Sync {
    /// Send a notification message
    async fn send(&self, message: &NotificationMessage) -> Result<(), DomainError>;

    fn channel_type(&self) -> ChannelType;
}
