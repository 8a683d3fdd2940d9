//! Configuration management for the alert relay
//!
//! This module defines the `Config` struct holding all application settings.
//! It uses the `figment` crate to layer defaults, an optional
//! `alert-relay.toml` file, environment variables and command-line
//! arguments, in that order of increasing precedence.

use crate::cli::Cli;
use crate::notification::webhook::MISSING_URL_MESSAGE;
use anyhow::Result;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

/// The environment variable the webhook URL is traditionally stored under.
pub const WEBHOOK_URL_ENV: &str = "DISCORD_WEBHOOK_URL";

/// The main configuration struct for the application.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    /// The logging level for the application, as an `EnvFilter` directive.
    pub log_level: String,
    /// Configuration for the outbound webhook.
    pub webhook: WebhookConfig,
}

/// Configuration for the chat webhook.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct WebhookConfig {
    /// The incoming webhook URL messages are posted to.
    pub url: Option<String>,
}

impl Config {
    /// Loads the configuration, honouring the config file and overrides
    /// given on the command line.
    pub fn load(cli: &Cli) -> Result<Self> {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

        if let Some(path) = &cli.config {
            if !path.exists() {
                anyhow::bail!("Config file not found at specified path: {}", path.display());
            }
            figment = figment.merge(Toml::file(path));
        }

        let config: Config = figment
            // e.g. ALERT_RELAY_LOG_LEVEL=debug, ALERT_RELAY_WEBHOOK__URL=https://...
            .merge(Env::prefixed("ALERT_RELAY_").split("__"))
            .merge(Env::raw().only(&[WEBHOOK_URL_ENV]).map(|_| "webhook.url".into()))
            .merge(cli.clone())
            .extract()?;
        Ok(config)
    }

    /// Checks that everything needed to relay alerts is present.
    pub fn validate(&self) -> Result<()> {
        match self.webhook.url.as_deref() {
            Some(url) if !url.trim().is_empty() => Ok(()),
            _ => anyhow::bail!(MISSING_URL_MESSAGE),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            webhook: WebhookConfig::default(),
        }
    }
}
