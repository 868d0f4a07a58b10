//! SlackWebhookNotifier -- concrete [`ChatNotifier`] for Slack incoming webhooks.
//!
//! POSTs `{"blocks": [...]}` to the webhook URL. Slack answers `200 ok` on
//! success and a short plain-text reason (e.g. `invalid_blocks`) otherwise.
//!
//! The webhook URL embeds its own credential, so it is held as a
//! [`SecretString`] and never logged.

use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use herald_core::notify::notifier::ChatNotifier;
use herald_types::blocks::{Block, WebhookPayload};
use herald_types::error::NotifyError;

pub struct SlackWebhookNotifier {
    client: reqwest::Client,
    webhook_url: SecretString,
}

impl SlackWebhookNotifier {
    pub fn new(webhook_url: SecretString) -> Result<Self, NotifyError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("herald/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| NotifyError::Transport(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            webhook_url,
        })
    }
}

impl ChatNotifier for SlackWebhookNotifier {
    async fn post_blocks(&self, blocks: &[Block]) -> Result<(), NotifyError> {
        let payload = WebhookPayload {
            blocks: blocks.to_vec(),
        };
        let body = serde_json::to_vec(&payload).map_err(|e| NotifyError::Encoding(e.to_string()))?;
        let text_chars: usize = blocks
            .iter()
            .filter_map(Block::text)
            .map(|t| t.chars().count())
            .sum();
        debug!(
            blocks = blocks.len(),
            text_chars,
            bytes = body.len(),
            "Posting to chat webhook"
        );

        let response = self
            .client
            .post(self.webhook_url.expose_secret())
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            // reqwest errors can carry the URL; strip it so the secret stays out of logs.
            .map_err(|e| NotifyError::Transport(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NotifyError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        Ok(())
    }
}
