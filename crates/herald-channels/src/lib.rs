//! Herald Channels — outbound text preparation and delivery.
//!
//! This crate provides:
//! - **formatting**: Markdown → Telegram HTML, HTML allowlist validation,
//!   visible-length accounting
//! - **base**: The `Channel` trait every delivery channel implements
//!
//! The Telegram channel is feature-gated behind `telegram`.

pub mod base;
pub mod formatting;

#[cfg(feature = "telegram")]
pub mod telegram;

pub use base::Channel;
pub use formatting::{prepare, FormatError, PreparedText};
