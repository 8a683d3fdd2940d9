//! The main application logic, decoupled from the entry point.
//!
//! Stands in for the hosting platform's trigger mechanism: events arrive as
//! newline-delimited JSON and each one becomes an independent handler
//! invocation.

use crate::{config::Config, core::AlertEvent, notification::DiscordWebhook, relay::AlertRelay};
use anyhow::Result;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::task::{JoinError, JoinSet};
use tracing::{debug, error, info, warn};

/// Counts of what happened to the lines of an event stream.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct StreamSummary {
    /// Events parsed and handed to a handler.
    pub dispatched: usize,
    /// Lines that could not be parsed as an event.
    pub rejected: usize,
}

/// The set of handler invocations that have been spawned and not yet reaped.
#[derive(Default)]
pub struct Invocations {
    tasks: JoinSet<()>,
}

impl Invocations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawns an independent invocation of the relay for one event.
    pub fn spawn(&mut self, relay: Arc<AlertRelay>, event: AlertEvent) {
        self.tasks.spawn(async move { relay.handle(event).await });
    }

    /// The number of invocations spawned but not yet reaped.
    pub fn in_flight(&self) -> usize {
        self.tasks.len()
    }

    /// Removes every invocation that has already finished, without waiting.
    /// Returns how many were removed.
    pub fn reap_finished(&mut self) -> usize {
        let mut reaped = 0;
        while let Some(result) = self.tasks.try_join_next() {
            log_join_result(result);
            reaped += 1;
        }
        reaped
    }

    /// Waits for every remaining invocation to finish.
    pub async fn join_all(&mut self) {
        while let Some(result) = self.tasks.join_next().await {
            log_join_result(result);
        }
    }
}

fn log_join_result(result: Result<(), JoinError>) {
    if let Err(e) = result {
        error!("Handler task panicked: {:?}", e);
    }
}

/// Runs the relay against a stream of events.
pub struct App {
    relay: Arc<AlertRelay>,
}

impl App {
    /// Builds the relay from the resolved configuration.
    pub fn from_config(config: &Config) -> Self {
        let client = Arc::new(DiscordWebhook::new(&config.webhook));
        Self::new(Arc::new(AlertRelay::new(client)))
    }

    /// Wraps an already constructed relay.
    pub fn new(relay: Arc<AlertRelay>) -> Self {
        Self { relay }
    }

    /// Reads events until end of input, spawning one handler invocation per
    /// event, then waits for all invocations to finish.
    ///
    /// Lines that are not valid UTF-8 or not a valid event are skipped. A
    /// read error stops the stream, but in-flight invocations are still
    /// awaited before it is returned.
    pub async fn run<R>(&self, reader: R) -> Result<StreamSummary>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut lines = reader.split(b'\n');
        let mut invocations = Invocations::new();
        let mut summary = StreamSummary::default();
        let mut line_no = 0usize;

        let read_result = loop {
            let line = match lines.next_segment().await {
                Ok(Some(line)) => line,
                Ok(None) => break Ok(()),
                Err(e) => break Err(e),
            };
            line_no += 1;
            invocations.reap_finished();

            if line.iter().all(u8::is_ascii_whitespace) {
                continue;
            }

            match serde_json::from_slice::<AlertEvent>(&line) {
                Ok(event) => {
                    debug!(line = line_no, kind = event.kind(), "Dispatching event");
                    invocations.spawn(self.relay.clone(), event);
                    summary.dispatched += 1;
                }
                Err(e) => {
                    warn!(line = line_no, error = %e, "Skipping unparseable event");
                    summary.rejected += 1;
                }
            }
        };

        if let Err(e) = &read_result {
            error!(line = line_no, error = %e, "Failed to read event stream");
        }
        info!(
            "End of input. Waiting for {} in-flight invocations...",
            invocations.in_flight()
        );
        invocations.join_all().await;

        read_result?;
        Ok(summary)
    }
}
