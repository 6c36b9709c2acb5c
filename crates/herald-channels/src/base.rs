//! Channel trait — the interface every delivery channel implements.
//!
//! A channel owns the network side of a send: it prepares the message text
//! with [`crate::formatting::prepare`], enforces the platform limits, talks
//! to the remote API and handles any format fallback.

use async_trait::async_trait;
use herald_core::message::OutboundMessage;

/// Every delivery channel implements this trait.
#[async_trait]
pub trait Channel: Send + Sync {
    /// Unique channel name (e.g. "telegram").
    fn name(&self) -> &str;

    /// Deliver an outbound message.
    ///
    /// Formatting errors (empty text, unsafe markup, text too long) are
    /// returned before any network call is made.
    async fn send(&self, msg: &OutboundMessage) -> anyhow::Result<()>;
}
