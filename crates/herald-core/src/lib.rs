//! Herald Core — shared types, configuration, and utilities.
//!
//! - **config**: `Config` schema, loading from `~/.herald/config.json`, env overrides
//! - **message**: `OutboundMessage`, the unit handed to a channel for delivery
//! - **types**: `FormatMode` and `TextKind`, shared by the formatter and the transport
//! - **utils**: data path and secret masking

pub mod config;
pub mod message;
pub mod types;
pub mod utils;

pub use message::{OutboundMessage, VoiceNote};
pub use types::{FormatMode, TextKind};
