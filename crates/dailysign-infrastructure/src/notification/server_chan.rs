use anyhow::{Context, Result};
use async_trait::async_trait;
use log::{error, info};
use reqwest::Client;
use std::time::Duration;
use tokio::time::sleep;

use dailysign_domain::notification::{
    ChannelType, NotificationMessage, NotificationSender, SUMMARY_TITLE,
};
use dailysign_domain::shared::DomainError;

use crate::config::TimeoutConfig;

const SERVER_CHAN_ENDPOINT: &str = "https://sctapi.ftqq.com";
/// Longest title ServerChan accepts, in characters
pub const TITLE_MAX_CHARS: usize = 64;
/// Result lines kept in one push body
pub const BODY_MAX_LINES: usize = 2000;

/// ServerChan (Server酱) push sender
pub struct ServerChanSender {
    send_key: String,
    endpoint: String,
    client: Client,
    max_attempts: u32,
    backoff: Duration,
}

impl ServerChanSender {
    pub fn new(send_key: impl Into<String>) -> Result<Self> {
        let timeouts = TimeoutConfig::global();
        let client = Client::builder()
            .timeout(timeouts.push_request)
            .build()
            .context("Failed to create ServerChan HTTP client")?;

        Ok(Self {
            send_key: send_key.into(),
            endpoint: SERVER_CHAN_ENDPOINT.to_string(),
            client,
            max_attempts: 3,
            backoff: timeouts.push_backoff,
        })
    }

    /// Point the sender at another ServerChan-compatible host
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_retry(mut self, max_attempts: u32, backoff: Duration) -> Self {
        self.max_attempts = max_attempts.max(1);
        self.backoff = backoff;
        self
    }

    fn build_url(&self) -> String {
        format!(
            "{}/{}.send",
            self.endpoint.trim_end_matches('/'),
            self.send_key.trim()
        )
    }

    /// Truncate to `TITLE_MAX_CHARS` characters
    pub fn build_title(title: &str) -> String {
        title.chars().take(TITLE_MAX_CHARS).collect()
    }

    /// Join at most `BODY_MAX_LINES` result lines
    pub fn build_desp(lines: &[String]) -> String {
        lines
            .iter()
            .take(BODY_MAX_LINES)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Push the run summary; `true` only when ServerChan confirmed delivery
    pub async fn push(&self, results: &[String]) -> bool {
        self.push_message(SUMMARY_TITLE, &Self::build_desp(results))
            .await
    }

    pub async fn push_message(&self, title: &str, desp: &str) -> bool {
        if self.send_key.trim().is_empty() {
            info!("⚠️ ServerChan SENDKEY not configured, skipping push");
            return false;
        }

        let text = Self::build_title(title);

        for attempt in 1..=self.max_attempts {
            match self.send_once(&text, desp).await {
                Ok(response) if is_delivered(&response) => {
                    info!("✈️ ServerChan push succeeded, response: {}", response);
                    return true;
                }
                Ok(response) => {
                    error!("⚠️ ServerChan push rejected, response: {}", response);
                }
                Err(e) => {
                    error!(
                        "⚠️ ServerChan push failed (attempt {}/{}): {:#}",
                        attempt, self.max_attempts, e
                    );
                }
            }

            if attempt < self.max_attempts {
                sleep(self.backoff).await;
            }
        }

        crate::critical!(
            "❌️ ServerChan push failed after {} attempts, check the network or SENDKEY",
            self.max_attempts
        );
        false
    }

    async fn send_once(&self, text: &str, desp: &str) -> Result<serde_json::Value> {
        let response = self
            .client
            .post(self.build_url())
            .form(&[("text", text), ("desp", desp)])
            .send()
            .await
            .context("Failed to send ServerChan request")?
            .error_for_status()
            .context("ServerChan returned an error status")?;

        let body = response
            .text()
            .await
            .context("Failed to read ServerChan response")?;

        serde_json::from_str(&body)
            .with_context(|| format!("Invalid ServerChan response: {}", body))
    }
}

/// ServerChan reports success as `{"data": {"errno": 0, "error": "SUCCESS"}}`
fn is_delivered(response: &serde_json::Value) -> bool {
    response["data"]["errno"].as_i64() == Some(0)
        && response["data"]["error"].as_str() == Some("SUCCESS")
}

#[async_trait]
impl NotificationSender for ServerChanSender {
    async fn send(&self, message: &NotificationMessage) -> Result<(), DomainError> {
        let lines: Vec<String> = message.content.lines().map(String::from).collect();
        if self
            .push_message(&message.title, &Self::build_desp(&lines))
            .await
        {
            Ok(())
        } else {
            Err(DomainError::Push(
                "ServerChan did not confirm delivery".to_string(),
            ))
        }
    }

    fn channel_type(&self) -> ChannelType {
        ChannelType::ServerChan
    }
}
