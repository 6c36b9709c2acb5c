//! Errors raised while preparing outbound text.

use herald_core::types::TextKind;
use thiserror::Error;

use super::validate::MarkupViolation;

/// Why a piece of text cannot be sent.
///
/// All variants are final for the send attempt; nothing is truncated or
/// repaired.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum FormatError {
    /// Nothing but whitespace after line-ending normalization.
    #[error("text is empty")]
    EmptyInput,

    /// Caller-supplied HTML failed allowlist validation.
    #[error("unsafe markup: {0}")]
    UnsafeMarkup(#[from] MarkupViolation),

    /// Visible length exceeds the Telegram limit for this kind of text.
    #[error("{kind} is too long: {length} characters (max {max})")]
    TooLong {
        kind: TextKind,
        length: usize,
        max: usize,
    },
}
