//! Core domain types and service traits for the alert relay
//!
//! This module defines the inbound alert events, the outbound chat message
//! derived from them, and the trait contract for webhook delivery.

use crate::notification::webhook::DispatchError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// An inbound notification from the alerting platform.
///
/// On the wire the variant is selected by the `alertType` field, and all
/// field names are camelCase as published by the upstream schema.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "alertType")]
pub enum AlertEvent {
    #[serde(rename = "crashlytics.newFatalIssue")]
    FatalIssue(FatalIssue),
    #[serde(rename = "auth.user.create")]
    NewUser(NewUser),
    #[serde(rename = "appDistribution.newTesterIosDevice")]
    NewTesterDevice(NewTesterDevice),
    #[serde(rename = "performance.threshold")]
    PerformanceThreshold(PerformanceThreshold),
}

impl AlertEvent {
    /// A short, stable label for the event kind. Used in log records.
    pub fn kind(&self) -> &'static str {
        match self {
            AlertEvent::FatalIssue(_) => FatalIssue::KIND,
            AlertEvent::NewUser(_) => NewUser::KIND,
            AlertEvent::NewTesterDevice(_) => NewTesterDevice::KIND,
            AlertEvent::PerformanceThreshold(_) => PerformanceThreshold::KIND,
        }
    }

    /// The display name the chat message is posted under.
    pub fn bot_name(&self) -> &'static str {
        match self {
            AlertEvent::FatalIssue(_) => FatalIssue::BOT_NAME,
            AlertEvent::NewUser(_) => NewUser::BOT_NAME,
            AlertEvent::NewTesterDevice(_) => NewTesterDevice::BOT_NAME,
            AlertEvent::PerformanceThreshold(_) => PerformanceThreshold::BOT_NAME,
        }
    }
}

/// A new fatal crash issue reported by Crashlytics.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FatalIssue {
    pub app_id: String,
    pub issue: CrashlyticsIssue,
}

impl FatalIssue {
    pub const KIND: &'static str = "fatal_issue";
    pub const BOT_NAME: &'static str = "Crashlytics Bot";
}

/// The issue details carried by a [`FatalIssue`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CrashlyticsIssue {
    pub id: String,
    pub title: String,
    pub subtitle: String,
    pub app_version: String,
}

/// A newly created user account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub uid: String,
    /// Accounts created through phone or anonymous sign-in have no email.
    #[serde(default)]
    pub email: Option<String>,
}

impl NewUser {
    pub const KIND: &'static str = "new_user";
    pub const BOT_NAME: &'static str = "Firebase Auth Bot";
}

/// A tester registered a new iOS device for App Distribution.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewTesterDevice {
    pub app_id: String,
    pub tester_name: String,
    pub tester_email: String,
    pub tester_device_model_name: String,
    pub tester_device_identifier: String,
}

impl NewTesterDevice {
    pub const KIND: &'static str = "new_tester_device";
    pub const BOT_NAME: &'static str = "AppDistribution Bot";
}

/// A performance metric crossed its configured threshold.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceThreshold {
    pub app_id: String,
    pub event_name: String,
    pub event_type: String,
    pub metric_type: String,
    pub num_samples: u64,
    pub threshold_value: f64,
    pub threshold_unit: String,
    /// Only set for percentile-based conditions.
    #[serde(default)]
    pub condition_percentile: Option<f64>,
    /// Only set when the alert is scoped to a single app version.
    #[serde(default)]
    pub app_version: Option<String>,
    pub violation_value: f64,
    pub violation_unit: String,
    pub investigate_uri: String,
}

impl PerformanceThreshold {
    pub const KIND: &'static str = "performance_threshold";
    pub const BOT_NAME: &'static str = "Firebase Performance Bot";
}

/// A chat message ready to be posted to the webhook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    /// The username the message appears under.
    pub bot_name: String,
    /// The plain-text (markdown) message content.
    pub body: String,
}

// =============================================================================
// Service Traits
// =============================================================================

/// Delivers a rendered message to a chat webhook.
#[async_trait]
pub trait WebhookClient: Send + Sync {
    /// Posts `body` under the display name `bot_name`.
    ///
    /// # Returns
    /// * `Ok(())` if the webhook accepted the message (2xx)
    /// * `Err` for a missing webhook URL, a non-2xx response, or a transport failure
    async fn send(&self, bot_name: &str, body: &str) -> Result<(), DispatchError>;
}
