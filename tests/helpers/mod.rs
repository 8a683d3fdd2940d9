#![allow(dead_code)]
pub mod log_capture;
pub mod mock_webhook;

use alert_relay::core::{
    AlertEvent, CrashlyticsIssue, FatalIssue, NewTesterDevice, NewUser, PerformanceThreshold,
};

/// One sample event of every kind, in a fixed order.
pub fn sample_events() -> Vec<AlertEvent> {
    vec![
        AlertEvent::FatalIssue(FatalIssue {
            app_id: "com.app".to_string(),
            issue: CrashlyticsIssue {
                id: "abc123".to_string(),
                title: "Crash".to_string(),
                subtitle: "NPE".to_string(),
                app_version: "1.2".to_string(),
            },
        }),
        AlertEvent::NewUser(NewUser {
            uid: "uid-42".to_string(),
            email: Some("new@example.com".to_string()),
        }),
        AlertEvent::NewTesterDevice(NewTesterDevice {
            app_id: "1:123:ios:abc".to_string(),
            tester_name: "Ana Ruiz".to_string(),
            tester_email: "ana@example.com".to_string(),
            tester_device_model_name: "iPhone15,2".to_string(),
            tester_device_identifier: "00008110-000A".to_string(),
        }),
        AlertEvent::PerformanceThreshold(PerformanceThreshold {
            app_id: "com.app".to_string(),
            event_name: "checkout_screen".to_string(),
            event_type: "screen_trace".to_string(),
            metric_type: "slow_rendering".to_string(),
            num_samples: 318,
            threshold_value: 250.0,
            threshold_unit: "ms".to_string(),
            condition_percentile: Some(90.0),
            app_version: None,
            violation_value: 612.5,
            violation_unit: "ms".to_string(),
            investigate_uri: "https://console.firebase.google.com/perf/123".to_string(),
        }),
    ]
}
