// src/formatting.rs

use crate::core::{
    AlertEvent, FatalIssue, NewTesterDevice, NewUser, OutboundMessage, PerformanceThreshold,
};
use std::fmt;

/// A trait for rendering alert events into chat messages, one method per
/// event kind.
pub trait MessageFormatter: Send + Sync {
    fn format_fatal_issue(&self, alert: &FatalIssue) -> OutboundMessage;
    fn format_new_user(&self, user: &NewUser) -> OutboundMessage;
    fn format_new_tester_device(&self, device: &NewTesterDevice) -> OutboundMessage;
    fn format_performance_threshold(&self, alert: &PerformanceThreshold) -> OutboundMessage;

    /// Renders any event by routing to the method for its kind.
    fn format(&self, event: &AlertEvent) -> OutboundMessage {
        match event {
            AlertEvent::FatalIssue(alert) => self.format_fatal_issue(alert),
            AlertEvent::NewUser(user) => self.format_new_user(user),
            AlertEvent::NewTesterDevice(device) => self.format_new_tester_device(device),
            AlertEvent::PerformanceThreshold(alert) => self.format_performance_threshold(alert),
        }
    }
}

/// Renders Discord-flavoured markdown messages.
pub struct DiscordFormatter;

fn message(bot_name: &str, body: String) -> OutboundMessage {
    OutboundMessage {
        bot_name: bot_name.to_string(),
        body,
    }
}

impl MessageFormatter for DiscordFormatter {
    fn format_fatal_issue(&self, alert: &FatalIssue) -> OutboundMessage {
        let issue = &alert.issue;
        let body = format!(
            "\n🚨 New fatal issue for {} in version {} 🚨\n\n**{}**\n\n{}\n\nid: `{}`\n",
            alert.app_id, issue.app_version, issue.title, issue.subtitle, issue.id
        );
        message(FatalIssue::BOT_NAME, body)
    }

    fn format_new_user(&self, user: &NewUser) -> OutboundMessage {
        let body = format!(
            "Nuevo usuario registrado: {} (UID: {})",
            OrUndefined(&user.email),
            user.uid
        );
        message(NewUser::BOT_NAME, body)
    }

    fn format_new_tester_device(&self, device: &NewTesterDevice) -> OutboundMessage {
        let body = format!(
            "\n📱 New iOS device registered by {} <{}> for {}\n\nUDID **{}** for {}\n",
            device.tester_name,
            device.tester_email,
            device.app_id,
            device.tester_device_identifier,
            device.tester_device_model_name
        );
        message(NewTesterDevice::BOT_NAME, body)
    }

    fn format_performance_threshold(&self, alert: &PerformanceThreshold) -> OutboundMessage {
        let percentile = alert.condition_percentile.map(JsNumber);
        let lines = [
            format!(
                "⚠️ Performance Alert for {} of {}: **{}** ⚠️",
                alert.metric_type, alert.event_type, alert.event_name
            ),
            String::new(),
            format!("App id: {}", alert.app_id),
            format!(
                "Alert condition: {} {}",
                JsNumber(alert.threshold_value),
                alert.threshold_unit
            ),
            format!("Percentile (if applicable): {}", OrUndefined(&percentile)),
            format!(
                "App version (if applicable): {}",
                OrUndefined(&alert.app_version)
            ),
            String::new(),
            format!(
                "Violation: {} {}",
                JsNumber(alert.violation_value),
                alert.violation_unit
            ),
            format!("Number of samples checked: {}", alert.num_samples),
            String::new(),
            format!("**Investigate more:** {}", alert.investigate_uri),
        ];
        message(
            PerformanceThreshold::BOT_NAME,
            format!("\n{}\n", lines.join("\n")),
        )
    }
}

/// Displays an optional field, rendering an absent value as `undefined`.
///
/// Absent fields are passed through into the message text rather than
/// replaced with a default.
pub(crate) struct OrUndefined<'a, T>(pub(crate) &'a Option<T>);

impl<T: fmt::Display> fmt::Display for OrUndefined<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(value) => fmt::Display::fmt(value, f),
            None => f.write_str("undefined"),
        }
    }
}

/// Displays a number the way the alerting platform prints it: shortest
/// round-trip digits, switching to exponent form (`1e+21`, `1e-7`) outside
/// `[1e-6, 1e21)`.
#[derive(Debug, Clone, Copy)]
pub(crate) struct JsNumber(pub(crate) f64);

impl fmt::Display for JsNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = self.0;
        if value.is_nan() {
            return f.write_str("NaN");
        }
        if value.is_infinite() {
            return f.write_str(if value > 0.0 { "Infinity" } else { "-Infinity" });
        }
        let magnitude = value.abs();
        if magnitude != 0.0 && !(1e-6..1e21).contains(&magnitude) {
            let formatted = format!("{:e}", value);
            match formatted.split_once('e') {
                Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                    write!(f, "{}e+{}", mantissa, exponent)
                }
                _ => f.write_str(&formatted),
            }
        } else {
            // Rust prints -0.0 as "-0"; the platform prints "0".
            write!(f, "{}", if value == 0.0 { 0.0 } else { value })
        }
    }
}
