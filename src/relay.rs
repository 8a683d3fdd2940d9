//! Per-event handlers binding the formatter to the webhook client.
//!
//! Every handler formats its event, makes one delivery attempt and logs the
//! outcome. Delivery errors stop here: they are logged and dropped, never
//! returned to the event source.

use crate::core::{
    AlertEvent, FatalIssue, NewTesterDevice, NewUser, OutboundMessage, PerformanceThreshold,
    WebhookClient,
};
use crate::formatting::{DiscordFormatter, MessageFormatter, OrUndefined};
use crate::notification::DispatchError;
use std::sync::Arc;
use tracing::{error, info};

/// Relays alert events to a chat webhook.
pub struct AlertRelay {
    formatter: Box<dyn MessageFormatter>,
    client: Arc<dyn WebhookClient>,
}

impl AlertRelay {
    /// Creates a relay that renders messages with the [`DiscordFormatter`].
    pub fn new(client: Arc<dyn WebhookClient>) -> Self {
        Self::with_formatter(client, Box::new(DiscordFormatter))
    }

    /// Creates a relay that renders messages with a custom formatter.
    pub fn with_formatter(
        client: Arc<dyn WebhookClient>,
        formatter: Box<dyn MessageFormatter>,
    ) -> Self {
        Self { formatter, client }
    }

    /// Routes an event to the handler for its kind.
    pub async fn handle(&self, event: AlertEvent) {
        match &event {
            AlertEvent::FatalIssue(alert) => self.handle_fatal_issue(alert).await,
            AlertEvent::NewUser(user) => self.handle_new_user(user).await,
            AlertEvent::NewTesterDevice(device) => self.handle_new_tester_device(device).await,
            AlertEvent::PerformanceThreshold(alert) => {
                self.handle_performance_threshold(alert).await
            }
        }
    }

    async fn deliver(&self, message: OutboundMessage) -> Result<(), DispatchError> {
        self.client.send(&message.bot_name, &message.body).await
    }

    /// Posts a new fatal Crashlytics issue.
    pub async fn handle_fatal_issue(&self, alert: &FatalIssue) {
        let id = &alert.issue.id;
        let app_id = &alert.app_id;
        match self.deliver(self.formatter.format_fatal_issue(alert)).await {
            Ok(()) => info!(
                kind = FatalIssue::KIND,
                issue_id = %id,
                app_id = %app_id,
                payload = ?alert.issue,
                "Posted fatal Crashlytics alert {} for {} to Discord",
                id,
                app_id
            ),
            Err(e) => error!(
                kind = FatalIssue::KIND,
                issue_id = %id,
                app_id = %app_id,
                error_kind = e.kind(),
                error = %e,
                "Unable to post fatal Crashlytics alert {} for {} to Discord",
                id,
                app_id
            ),
        }
    }

    /// Posts a newly created user account.
    pub async fn handle_new_user(&self, user: &NewUser) {
        let email = OrUndefined(&user.email);
        match self.deliver(self.formatter.format_new_user(user)).await {
            Ok(()) => info!(
                kind = NewUser::KIND,
                uid = %user.uid,
                "Posted new user alert for {} to Discord",
                email
            ),
            Err(e) => error!(
                kind = NewUser::KIND,
                uid = %user.uid,
                error_kind = e.kind(),
                error = %e,
                "Unable to post {} to Discord",
                email
            ),
        }
    }

    /// Posts a tester's newly registered iOS device.
    pub async fn handle_new_tester_device(&self, device: &NewTesterDevice) {
        let email = &device.tester_email;
        match self.deliver(self.formatter.format_new_tester_device(device)).await {
            Ok(()) => info!(
                kind = NewTesterDevice::KIND,
                app_id = %device.app_id,
                device_id = %device.tester_device_identifier,
                "Posted iOS device registration alert for {} to Discord",
                email
            ),
            Err(e) => error!(
                kind = NewTesterDevice::KIND,
                app_id = %device.app_id,
                device_id = %device.tester_device_identifier,
                error_kind = e.kind(),
                error = %e,
                "Unable to post iOS device registration for {} to Discord",
                email
            ),
        }
    }

    /// Posts a performance threshold violation.
    pub async fn handle_performance_threshold(&self, alert: &PerformanceThreshold) {
        let name = &alert.event_name;
        match self.deliver(self.formatter.format_performance_threshold(alert)).await {
            Ok(()) => info!(
                kind = PerformanceThreshold::KIND,
                app_id = %alert.app_id,
                payload = ?alert,
                "Posted Firebase Performance alert {} to Discord",
                name
            ),
            Err(e) => error!(
                kind = PerformanceThreshold::KIND,
                app_id = %alert.app_id,
                error_kind = e.kind(),
                error = %e,
                "Unable to post Firebase Performance alert {} to Discord",
                name
            ),
        }
    }
}
