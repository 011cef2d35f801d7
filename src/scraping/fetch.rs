use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use tokio::time::sleep;

use crate::config::config::HttpConfig;

/// Shared HTTP client: fixed User-Agent, bounded retries with linear
/// backoff, and a fixed politeness delay between requests. All resilience
/// lives here; nothing downstream retries.
pub struct HttpClient {
    client: Client,
    request_delay: Duration,
    max_attempts: u32,
}

impl HttpClient {
    pub fn new(http: &HttpConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(http.user_agent.clone())
            .timeout(Duration::from_secs(http.timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            request_delay: Duration::from_millis(http.request_delay_ms),
            max_attempts: http.max_retries.max(1),
        })
    }

    /// Fetches a page body, retrying transient failures. Exhausting the
    /// attempts propagates the last error to the caller.
    pub async fn get_text(&self, url: &str) -> Result<String> {
        let mut last_error = None;
        for attempt in 0..self.max_attempts {
            if attempt > 0 {
                sleep(Duration::from_millis(1500 + u64::from(attempt) * 1000)).await;
            }
            match self.try_get(url).await {
                Ok(body) => return Ok(body),
                Err(e) => last_error = Some(e),
            }
        }
        Err(last_error.unwrap_or_else(|| anyhow::anyhow!("no fetch attempts were made")))
            .with_context(|| format!("Failed to fetch {}", url))
    }

    async fn try_get(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        Ok(response.text().await?)
    }

    /// Blocking pause between successive requests to the same site.
    pub async fn pause(&self) {
        sleep(self.request_delay).await;
    }
}
