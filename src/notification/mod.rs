//! Delivery of rendered messages to chat webhooks.
//!
//! The relay talks to delivery backends through the
//! [`WebhookClient`](crate::core::WebhookClient) trait, so handlers can be
//! exercised against a fake client without any network access.
pub mod webhook;

pub use webhook::{DiscordWebhook, DispatchError};
