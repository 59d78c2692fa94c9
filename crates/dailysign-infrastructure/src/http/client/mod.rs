mod forum;
mod types;

pub use types::{ClientOptions, HttpMethod, RetryConfig, USER_AGENT};

use anyhow::{Context, Result};
use log::{debug, error, warn};
use reqwest::{header, Client};
use tokio::time::sleep;

use dailysign_domain::shared::DomainError;

/// Cookie-holding HTTP session for one account
pub struct HttpClient {
    pub(super) client: Client,
    pub(super) retry_config: RetryConfig,
}

impl HttpClient {
    pub fn new() -> Result<Self> {
        Self::with_options(ClientOptions::default())
    }

    pub fn with_options(options: ClientOptions) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        if let Some(referer) = &options.referer {
            headers.insert(
                header::REFERER,
                header::HeaderValue::from_str(referer).context("Invalid referer header")?,
            );
        }

        if options.accept_invalid_certs {
            warn!("⚠️  TLS certificate validation is disabled for this forum session");
        }

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .cookie_store(true)
            .timeout(options.timeout)
            .danger_accept_invalid_certs(options.accept_invalid_certs)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            retry_config: options.retry,
        })
    }

    /// Issue a request, retrying transport errors and non-2xx statuses
    ///
    /// Every failed attempt is logged; once the attempts are exhausted the
    /// failure is returned as `DomainError::Transport` instead of panicking.
    pub async fn request(
        &self,
        url: &str,
        method: HttpMethod,
        form: Option<&[(String, String)]>,
    ) -> Result<String, DomainError> {
        let attempts = self.retry_config.max_attempts.max(1);

        for attempt in 1..=attempts {
            match self.send_once(url, method, form).await {
                Ok(body) => {
                    if attempt > 1 {
                        debug!("✅ {} {} succeeded after {} attempts", method, url, attempt);
                    }
                    return Ok(body);
                }
                Err(e) => {
                    error!(
                        "Request failed: {}, URL: {}, attempt ({}/{})",
                        e, url, attempt, attempts
                    );
                    if attempt < attempts {
                        sleep(self.retry_config.backoff).await;
                    }
                }
            }
        }

        crate::critical!("Request failed after {} attempts, final URL: {}", attempts, url);
        Err(DomainError::Transport(format!(
            "{} {} failed after {} attempts",
            method, url, attempts
        )))
    }

    async fn send_once(
        &self,
        url: &str,
        method: HttpMethod,
        form: Option<&[(String, String)]>,
    ) -> Result<String, reqwest::Error> {
        let mut request = match method {
            HttpMethod::Get => self.client.get(url),
            HttpMethod::Post => self.client.post(url),
        };

        if let Some(fields) = form {
            request = request.form(fields);
        }

        let response = request.send().await?.error_for_status()?;
        response.text().await
    }
}
