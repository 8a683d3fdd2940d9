//! Mock webhook clients for exercising the handlers without a network.

use alert_relay::core::WebhookClient;
use alert_relay::notification::DispatchError;
use async_trait::async_trait;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, Mutex,
};

/// A mock client that records messages and can be switched to failing.
#[derive(Clone, Debug, Default)]
pub struct MockWebhookClient {
    pub sent: Arc<Mutex<Vec<(String, String)>>>,
    fail_on_send: Arc<AtomicBool>,
}

impl MockWebhookClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_fail_on_send(&self, fail: bool) {
        self.fail_on_send.store(fail, Ordering::SeqCst);
    }

    pub fn sent_messages(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl WebhookClient for MockWebhookClient {
    async fn send(&self, bot_name: &str, body: &str) -> Result<(), DispatchError> {
        if self.fail_on_send.load(Ordering::SeqCst) {
            return Err(DispatchError::Configuration(
                "mock client configured to fail".to_string(),
            ));
        }
        self.sent
            .lock()
            .unwrap()
            .push((bot_name.to_string(), body.to_string()));
        Ok(())
    }
}
