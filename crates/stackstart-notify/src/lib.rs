//! Webhook delivery of run events.
//!
//! Each event is POSTed as `{"event": <name>, "payload": {...}}`. Delivery
//! is fire-and-forget from the orchestrator's point of view: errors come
//! back as [`WebhookError`] so the caller can log them, and nothing retries.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use stackstart_core::{Event, Notifier, WebhookError};
use stackstart_settings::Settings;

pub const WEBHOOK_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct WebhookNotifier {
    client: Client,
    url: String,
}

impl WebhookNotifier {
    pub fn new(url: impl Into<String>) -> Result<Self, WebhookError> {
        let client = Client::builder()
            .timeout(WEBHOOK_TIMEOUT)
            .build()
            .map_err(|e| WebhookError::Client(e.to_string()))?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    /// `None` when no webhook URL is configured.
    pub fn from_settings(settings: &Settings) -> Option<Result<Self, WebhookError>> {
        settings.webhook_url.as_deref().map(Self::new)
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    async fn notify(&self, event: &Event) -> Result<(), WebhookError> {
        let response = self
            .client
            .post(&self.url)
            .json(event)
            .send()
            .await
            .map_err(|e| WebhookError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(WebhookError::Status {
                status: status.as_u16(),
                body,
            });
        }
        debug!(event = %event.kind, status = status.as_u16(), "webhook delivered");
        Ok(())
    }
}
