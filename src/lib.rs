//! Alert Relay - forwards platform alert events to a chat webhook
//!
//! This library provides the event types, message formatting, webhook
//! delivery and per-event handlers. The binary wires them to an input
//! stream of JSON-encoded events.

pub mod app;
pub mod cli;
pub mod config;
pub mod core;
pub mod formatting;
pub mod notification;
pub mod relay;

// Re-export core types for convenience
pub use crate::core::*;
pub use relay::AlertRelay;
