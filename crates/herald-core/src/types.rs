//! Shared value types for outbound text.
//!
//! `FormatMode` says how the caller wrote the text; `TextKind` says where it
//! will appear on Telegram (and therefore which length limit applies).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ─────────────────────────────────────────────
// Format mode
// ─────────────────────────────────────────────

/// How outbound text should be interpreted before sending.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatMode {
    /// Sent verbatim, no markup.
    Plain,
    /// Markdown subset, converted to Telegram HTML.
    #[default]
    Markdown,
    /// Caller-supplied Telegram HTML, validated against the allowlist.
    Html,
}

impl FormatMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            FormatMode::Plain => "plain",
            FormatMode::Markdown => "markdown",
            FormatMode::Html => "html",
        }
    }
}

impl fmt::Display for FormatMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FormatMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "plain" | "text" => Ok(FormatMode::Plain),
            "markdown" | "md" => Ok(FormatMode::Markdown),
            "html" => Ok(FormatMode::Html),
            other => Err(format!(
                "unknown format mode '{other}' (expected plain, markdown or html)"
            )),
        }
    }
}

// ─────────────────────────────────────────────
// Text kind
// ─────────────────────────────────────────────

/// Telegram message text limit, in visible characters.
pub const MESSAGE_MAX_LEN: usize = 4096;

/// Telegram media caption limit, in visible characters.
pub const CAPTION_MAX_LEN: usize = 1024;

/// Where a piece of text ends up: a message body or a media caption.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextKind {
    Message,
    Caption,
}

impl TextKind {
    /// Platform limit for this kind of text.
    pub fn max_len(&self) -> usize {
        match self {
            TextKind::Message => MESSAGE_MAX_LEN,
            TextKind::Caption => CAPTION_MAX_LEN,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TextKind::Message => "message",
            TextKind::Caption => "caption",
        }
    }
}

impl fmt::Display for TextKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_from_str() {
        assert_eq!("plain".parse::<FormatMode>().unwrap(), FormatMode::Plain);
        assert_eq!("Markdown".parse::<FormatMode>().unwrap(), FormatMode::Markdown);
        assert_eq!(" html ".parse::<FormatMode>().unwrap(), FormatMode::Html);
        assert_eq!("md".parse::<FormatMode>().unwrap(), FormatMode::Markdown);
    }

    #[test]
    fn test_mode_from_str_unknown() {
        let err = "rtf".parse::<FormatMode>().unwrap_err();
        assert!(err.contains("rtf"));
    }

    #[test]
    fn test_mode_default_is_markdown() {
        assert_eq!(FormatMode::default(), FormatMode::Markdown);
    }

    #[test]
    fn test_mode_serde_lowercase() {
        let json = serde_json::to_string(&FormatMode::Html).unwrap();
        assert_eq!(json, "\"html\"");
        let mode: FormatMode = serde_json::from_str("\"plain\"").unwrap();
        assert_eq!(mode, FormatMode::Plain);
    }

    #[test]
    fn test_text_kind_limits() {
        assert_eq!(TextKind::Message.max_len(), 4096);
        assert_eq!(TextKind::Caption.max_len(), 1024);
        assert_eq!(TextKind::Caption.to_string(), "caption");
    }
}
