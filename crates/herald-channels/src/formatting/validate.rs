//! Allowlist validation for caller-supplied Telegram HTML.
//!
//! Validation is binary: the markup is either sent exactly as given or
//! rejected with the first violation found. Nothing is rewritten.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use super::markup::{is_allowed_tag, is_denied_tag, TAG_RE};

static EVENT_HANDLER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(on[a-z]+)\s*=").expect("event handler pattern is valid")
});

static HREF_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^(?i:href)="https?://[^"'\s]+"$"#).expect("href pattern is valid")
});

/// Why a piece of markup was rejected.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum MarkupViolation {
    /// A tag on the hard denylist (`script`, `iframe`, …).
    #[error("tag <{0}> is not allowed")]
    DeniedTag(String),

    /// A tag Telegram does not support.
    #[error("unsupported tag <{0}>")]
    UnsupportedTag(String),

    /// An `on…=` event handler attribute anywhere in the input.
    #[error("event handler attribute '{0}' is not allowed")]
    EventHandler(String),

    /// Attributes other than a single `href="http(s)://…"` on `<a>`.
    #[error("unsupported attributes on <{tag}>: {attributes}")]
    InvalidAttributes { tag: String, attributes: String },

    /// Closing tags carry no attributes.
    #[error("closing tag </{0}> must not have attributes")]
    ClosingTagAttributes(String),
}

/// Check caller-supplied markup against the Telegram allowlist.
///
/// Order of checks: event handlers anywhere in the input, then per tag the
/// denylist, the allowlist, closing-tag attributes, and opening-tag
/// attributes.
pub fn validate_html(markup: &str) -> Result<(), MarkupViolation> {
    if let Some(caps) = EVENT_HANDLER_RE.captures(markup) {
        return Err(MarkupViolation::EventHandler(caps[1].to_ascii_lowercase()));
    }

    for caps in TAG_RE.captures_iter(markup) {
        let closing = !caps[1].is_empty();
        let name = caps[2].to_ascii_lowercase();
        let attributes = caps[3].trim();

        if is_denied_tag(&name) {
            return Err(MarkupViolation::DeniedTag(name));
        }
        if !is_allowed_tag(&name) {
            return Err(MarkupViolation::UnsupportedTag(name));
        }

        if closing {
            if !attributes.is_empty() {
                return Err(MarkupViolation::ClosingTagAttributes(name));
            }
            continue;
        }

        let attributes_ok = if name == "a" {
            HREF_RE.is_match(attributes)
        } else {
            attributes.is_empty()
        };
        if !attributes_ok {
            return Err(MarkupViolation::InvalidAttributes {
                tag: name,
                attributes: attributes.to_string(),
            });
        }
    }

    Ok(())
}
