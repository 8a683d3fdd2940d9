//! A client for posting messages to a Discord-style chat webhook.

use crate::config::WebhookConfig;
use crate::core::WebhookClient;
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, instrument};

/// Errors that can occur while delivering a message to the webhook.
#[derive(Error, Debug)]
pub enum DispatchError {
    /// No usable webhook URL was configured. No request was made.
    #[error("webhook is not configured: {0}")]
    Configuration(String),

    /// The webhook answered with a non-2xx status.
    #[error("webhook responded with status {status}: {detail}")]
    Delivery { status: StatusCode, detail: String },

    /// The request never got a response.
    #[error("HTTP request to webhook failed: {0}")]
    Transport(#[from] reqwest::Error),
}

impl DispatchError {
    /// A short label for the error category, used as a log field.
    pub fn kind(&self) -> &'static str {
        match self {
            DispatchError::Configuration(_) => "configuration",
            DispatchError::Delivery { .. } => "delivery",
            DispatchError::Transport(_) => "transport",
        }
    }
}

pub(crate) const MISSING_URL_MESSAGE: &str = "No webhook URL found. Set the Discord Webhook URL before deploying. Learn more about Discord webhooks here: https://support.discord.com/hc/en-us/articles/228383668-Intro-to-Webhooks";

/// The JSON body accepted by the webhook.
#[derive(Debug, Serialize)]
struct WebhookPayload<'a> {
    content: &'a str,
    username: &'a str,
}

/// A client for sending messages to a Discord webhook.
pub struct DiscordWebhook {
    webhook_url: Option<String>,
    client: reqwest::Client,
}

impl DiscordWebhook {
    /// Creates a new `DiscordWebhook` from the resolved configuration.
    pub fn new(config: &WebhookConfig) -> Self {
        Self::with_client(config, reqwest::Client::new())
    }

    /// Creates a new `DiscordWebhook` that reuses an existing HTTP client.
    pub fn with_client(config: &WebhookConfig, client: reqwest::Client) -> Self {
        Self {
            webhook_url: config.url.clone(),
            client,
        }
    }

    fn webhook_url(&self) -> Result<&str, DispatchError> {
        match self.webhook_url.as_deref() {
            Some(url) if !url.trim().is_empty() => Ok(url),
            _ => Err(DispatchError::Configuration(MISSING_URL_MESSAGE.to_string())),
        }
    }
}

#[async_trait]
impl WebhookClient for DiscordWebhook {
    /// Posts a single message to the configured webhook.
    #[instrument(skip(self, body), fields(body_len = body.len()))]
    async fn send(&self, bot_name: &str, body: &str) -> Result<(), DispatchError> {
        let webhook_url = self.webhook_url()?;
        let payload = WebhookPayload {
            content: body,
            username: bot_name,
        };

        let response = self.client.post(webhook_url).json(&payload).send().await?;

        let status = response.status();
        if status.is_success() {
            debug!(status = %status, "Webhook accepted message");
            Ok(())
        } else {
            let detail = response.text().await.unwrap_or_default();
            Err(DispatchError::Delivery { status, detail })
        }
    }
}
