use anyhow::{Context, Result};
use async_trait::async_trait;
use log::{error, info};
use reqwest::Client;
use std::collections::BTreeMap;

use dailysign_domain::notification::{ChannelType, NotificationMessage, NotificationSender};
use dailysign_domain::shared::DomainError;

use crate::config::TimeoutConfig;

/// Bark push sender
///
/// `base_url` is the full device URL up to and including the trailing `/`,
/// e.g. `https://api.day.app/<device key>/`.
pub struct BarkSender {
    base_url: String,
    params: BTreeMap<String, String>,
    client: Client,
}

impl BarkSender {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(TimeoutConfig::global().push_request)
            .build()
            .context("Failed to create Bark HTTP client")?;

        Ok(Self {
            base_url: base_url.into(),
            params: BTreeMap::new(),
            client,
        })
    }

    /// Extra GET parameters such as `badge` or `level`
    pub fn with_params(mut self, params: BTreeMap<String, String>) -> Self {
        self.params = params;
        self
    }

    /// `{base}{title}/{body}?{params}`; `/` inside title or body is escaped too
    pub fn build_url(&self, title: &str, body: &str) -> String {
        let mut url = format!(
            "{}{}/{}",
            self.base_url.trim(),
            urlencoding::encode(title),
            urlencoding::encode(body)
        );

        if !self.params.is_empty() {
            let query = url::form_urlencoded::Serializer::new(String::new())
                .extend_pairs(self.params.iter())
                .finish();
            url.push('?');
            url.push_str(&query);
        }

        url
    }

    /// Single GET, no retry. Returns the parsed response, `None` on any error
    pub async fn push(&self, title: &str, body: &str) -> Option<serde_json::Value> {
        if self.base_url.trim().is_empty() {
            info!("⚠️ Bark base URL not configured, skipping push");
            return None;
        }

        if body.is_empty() {
            error!("⚠️ Bark push body cannot be empty");
            return None;
        }

        info!("🛫 Sending Bark GET request...");
        match self.send_once(title, body).await {
            Ok(response) => {
                if is_delivered(&response) {
                    info!("✈️ Bark push succeeded!");
                } else {
                    error!("❌️ Bark push failed, response: {}", response);
                }
                Some(response)
            }
            Err(e) => {
                error!("❌️ Bark push failed: {:#}", e);
                None
            }
        }
    }

    async fn send_once(&self, title: &str, body: &str) -> Result<serde_json::Value> {
        let response = self
            .client
            .get(self.build_url(title, body))
            .send()
            .await
            .context("Failed to send Bark request")?
            .error_for_status()
            .context("Bark returned an error status")?;

        let text = response
            .text()
            .await
            .context("Failed to read Bark response")?;

        serde_json::from_str(&text).with_context(|| format!("Invalid Bark response: {}", text))
    }
}

/// Bark reports success as `{"code": 200, "message": "success"}`
pub fn is_delivered(response: &serde_json::Value) -> bool {
    response["code"].as_i64() == Some(200) && response["message"].as_str() == Some("success")
}

#[async_trait]
impl NotificationSender for BarkSender {
    async fn send(&self, message: &NotificationMessage) -> Result<(), DomainError> {
        match self.push(&message.title, &message.content).await {
            Some(response) if is_delivered(&response) => Ok(()),
            Some(response) => Err(DomainError::Push(format!(
                "Bark rejected the push: {}",
                response
            ))),
            None => Err(DomainError::Push("Bark push was not delivered".to_string())),
        }
    }

    fn channel_type(&self) -> ChannelType {
        ChannelType::Bark
    }
}
