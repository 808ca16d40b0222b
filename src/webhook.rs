use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Serialize;
use tracing::debug;

use crate::dispatch::Transport;

#[derive(Debug, Serialize)]
struct WebhookPayload<'a> {
    content: &'a str,
}

/// Discord webhook transport. One shared reqwest client for all deliveries.
pub struct WebhookClient {
    client: reqwest::Client,
}

impl WebhookClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl Transport for WebhookClient {
    async fn deliver(&self, endpoint: &str, content: &str) -> Result<()> {
        debug!("Posting payload to webhook: {}", endpoint);

        let response = self
            .client
            .post(endpoint)
            .header("Content-Type", "application/json")
            .json(&WebhookPayload { content })
            .send()
            .await
            .context("Failed to send webhook request")?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            anyhow::bail!("Webhook delivery failed ({}): {}", status, error_body);
        }

        Ok(())
    }
}
