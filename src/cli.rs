//! Command-Line Interface (CLI) argument parsing.
//!
//! This module defines the command-line arguments for the application using the
//! `clap` crate. These arguments are parsed at startup and then merged with
//! the configuration from the `alert-relay.toml` file and environment variables.

use clap::Parser;
use figment::{
    value::{Dict, Map, Value},
    Error, Metadata, Profile, Provider,
};
use std::path::PathBuf;

/// Relays platform alert events to a chat webhook.
#[derive(Parser, Debug, Clone, Default)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Webhook URL to post messages to.
    #[arg(long, value_name = "URL")]
    pub webhook_url: Option<String>,

    /// Log filter directive (e.g. "info", "alert_relay=debug").
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// File of newline-delimited JSON events. Reads stdin when omitted.
    #[arg(short, long, value_name = "FILE")]
    pub events: Option<PathBuf>,
}

impl Provider for Cli {
    fn metadata(&self) -> Metadata {
        Metadata::named("Command-Line Arguments")
    }

    fn data(&self) -> Result<Map<Profile, Dict>, Error> {
        let mut dict = Dict::new();

        if let Some(level) = &self.log_level {
            dict.insert("log_level".into(), Value::from(level.clone()));
        }

        if let Some(url) = &self.webhook_url {
            let mut webhook = Dict::new();
            webhook.insert("url".into(), Value::from(url.clone()));
            dict.insert("webhook".into(), Value::from(webhook));
        }

        let mut map = Map::new();
        map.insert(Profile::Default, dict);
        Ok(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_only_emits_given_flags() {
        let cli = Cli::try_parse_from(["alert-relay"]).unwrap();
        let data = cli.data().unwrap();
        assert!(data[&Profile::Default].is_empty());
    }

    #[test]
    fn test_provider_nests_webhook_url() {
        let cli = Cli::try_parse_from([
            "alert-relay",
            "--webhook-url",
            "https://example.com/hook",
            "--log-level",
            "debug",
        ])
        .unwrap();
        let data = cli.data().unwrap();
        let dict = &data[&Profile::Default];

        assert_eq!(dict["log_level"].as_str(), Some("debug"));
        let webhook = dict["webhook"].as_dict().unwrap();
        assert_eq!(webhook["url"].as_str(), Some("https://example.com/hook"));
    }
}
