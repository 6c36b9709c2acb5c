//! Preparation of outbound text — the single entry point channels use before
//! talking to Telegram.

use herald_core::types::{FormatMode, TextKind};
use tracing::{debug, warn};

use super::error::FormatError;
use super::markdown::markdown_to_telegram_html;
use super::markup::visible_text;
use super::validate::validate_html;

/// How Telegram should interpret [`PreparedText::text`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParseMode {
    Html,
}

/// Text ready for the transport.
///
/// Built once per outbound message or caption and never modified.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PreparedText {
    text: String,
    visible_text: String,
    parse_mode: Option<ParseMode>,
    normalized_source: String,
}

impl PreparedText {
    /// The string to transmit.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// What the reader sees: markup removed, entities decoded.
    pub fn visible_text(&self) -> &str {
        &self.visible_text
    }

    /// `Some(Html)` when `text` must be sent as markup.
    pub fn parse_mode(&self) -> Option<ParseMode> {
        self.parse_mode
    }

    /// The caller's input with CRLF normalized, for a plain-text retry.
    pub fn normalized_source(&self) -> &str {
        &self.normalized_source
    }

    /// Visible length as Telegram counts it.
    pub fn visible_len(&self) -> usize {
        visible_len(&self.visible_text)
    }

    /// Check the visible text against the limit for `kind`.
    pub fn check_limit(&self, kind: TextKind) -> Result<(), FormatError> {
        enforce_length(&self.visible_text, kind.max_len(), kind)
    }
}

/// Replace CRLF line endings with LF.
pub fn normalize_line_endings(text: &str) -> String {
    text.replace("\r\n", "\n")
}

/// Length in UTF-16 code units, which is what Telegram's limits count.
pub fn visible_len(text: &str) -> usize {
    text.encode_utf16().count()
}

/// Fail with [`FormatError::TooLong`] if `visible` is longer than `max_chars`.
///
/// Never truncates.
pub fn enforce_length(visible: &str, max_chars: usize, kind: TextKind) -> Result<(), FormatError> {
    let length = visible_len(visible);
    if length > max_chars {
        return Err(FormatError::TooLong {
            kind,
            length,
            max: max_chars,
        });
    }
    Ok(())
}

/// Prepare `text` for sending in the given mode.
///
/// - `Plain`: sent as-is, no parse mode.
/// - `Markdown`: converted to Telegram HTML; malformed Markdown degrades to
///   literal text and never fails.
/// - `Html`: validated against the allowlist and sent unchanged, or rejected.
pub fn prepare(text: &str, mode: FormatMode) -> Result<PreparedText, FormatError> {
    let normalized = normalize_line_endings(text);
    if normalized.trim().is_empty() {
        return Err(FormatError::EmptyInput);
    }

    let prepared = match mode {
        FormatMode::Plain => PreparedText {
            text: normalized.clone(),
            visible_text: normalized.clone(),
            parse_mode: None,
            normalized_source: normalized,
        },
        FormatMode::Html => {
            if let Err(violation) = validate_html(&normalized) {
                warn!(error = %violation, "rejected caller-supplied markup");
                return Err(violation.into());
            }
            PreparedText {
                visible_text: visible_text(&normalized),
                text: normalized.clone(),
                parse_mode: Some(ParseMode::Html),
                normalized_source: normalized,
            }
        }
        FormatMode::Markdown => {
            let html = markdown_to_telegram_html(&normalized);
            PreparedText {
                visible_text: visible_text(&html),
                text: html,
                parse_mode: Some(ParseMode::Html),
                normalized_source: normalized,
            }
        }
    };

    debug!(
        mode = %mode,
        text_len = prepared.text.len(),
        visible_len = prepared.visible_len(),
        "prepared outbound text"
    );

    Ok(prepared)
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formatting::validate::MarkupViolation;

    #[test]
    fn test_plain_passthrough() {
        let input = "a **b** <i>c</i> & d\r\nline two";
        let prepared = prepare(input, FormatMode::Plain).unwrap();
        assert_eq!(prepared.text(), "a **b** <i>c</i> & d\nline two");
        assert_eq!(prepared.visible_text(), prepared.text());
        assert_eq!(prepared.normalized_source(), prepared.text());
        assert_eq!(prepared.parse_mode(), None);
    }

    #[test]
    fn test_plain_visible_equals_normalized_for_many_inputs() {
        let inputs = [
            "hello",
            "  leading and trailing  ",
            "crlf\r\nlines\r\n",
            "lone \r carriage",
            "unicode 🦀 тест",
            "<b>not parsed</b> &amp;",
        ];
        for input in inputs {
            let prepared = prepare(input, FormatMode::Plain).unwrap();
            assert_eq!(prepared.visible_text(), normalize_line_endings(input));
        }
    }

    #[test]
    fn test_empty_rejected_in_every_mode() {
        for mode in [FormatMode::Plain, FormatMode::Markdown, FormatMode::Html] {
            assert_eq!(prepare("", mode), Err(FormatError::EmptyInput));
            assert_eq!(prepare(" \r\n\t ", mode), Err(FormatError::EmptyInput));
        }
    }

    #[test]
    fn test_markdown_prepared() {
        let prepared = prepare("**hi** & `x<y`\r\n", FormatMode::Markdown).unwrap();
        assert_eq!(prepared.text(), "<b>hi</b> &amp; <code>x&lt;y</code>\n");
        assert_eq!(prepared.visible_text(), "hi & x<y\n");
        assert_eq!(prepared.parse_mode(), Some(ParseMode::Html));
        assert_eq!(prepared.normalized_source(), "**hi** & `x<y`\n");
    }

    #[test]
    fn test_markdown_escaped_entities_round_trip() {
        let input = "already &amp; escaped &lt;tag&gt; and 5 > 3";
        let prepared = prepare(input, FormatMode::Markdown).unwrap();
        assert_eq!(prepared.text(), "already &amp;amp; escaped &amp;lt;tag&amp;gt; and 5 &gt; 3");
        assert_eq!(prepared.visible_text(), input);
    }

    #[test]
    fn test_markdown_script_never_live() {
        let prepared = prepare("<script>alert(1)</script>", FormatMode::Markdown).unwrap();
        assert_eq!(
            prepared.text(),
            "&lt;script&gt;alert(1)&lt;/script&gt;"
        );
        assert_eq!(prepared.visible_text(), "<script>alert(1)</script>");
    }

    #[test]
    fn test_markdown_visible_has_no_structural_brackets() {
        let prepared = prepare(
            "# T\n**b** _i_ ~~s~~ `c` [l](https://a.io)",
            FormatMode::Markdown,
        )
        .unwrap();
        assert_eq!(prepared.visible_text(), "T\nb i s c l");
    }

    #[test]
    fn test_html_prepared() {
        let input = "<b>Done</b> &amp; <a href=\"https://example.com\">open</a>";
        let prepared = prepare(input, FormatMode::Html).unwrap();
        assert_eq!(prepared.text(), input);
        assert_eq!(prepared.visible_text(), "Done & open");
        assert_eq!(prepared.parse_mode(), Some(ParseMode::Html));
    }

    #[test]
    fn test_html_rejected() {
        let err = prepare("<script>alert(1)</script>", FormatMode::Html).unwrap_err();
        assert_eq!(
            err,
            FormatError::UnsafeMarkup(MarkupViolation::DeniedTag("script".into()))
        );
        assert!(err.to_string().starts_with("unsafe markup"));
    }

    #[test]
    fn test_enforce_length_boundary() {
        let exact = "a".repeat(4096);
        enforce_length(&exact, 4096, TextKind::Message).unwrap();

        let over = "a".repeat(4097);
        let err = enforce_length(&over, 4096, TextKind::Message).unwrap_err();
        assert_eq!(
            err,
            FormatError::TooLong {
                kind: TextKind::Message,
                length: 4097,
                max: 4096
            }
        );
        assert_eq!(err.to_string(), "message is too long: 4097 characters (max 4096)");
    }

    #[test]
    fn test_enforce_length_counts_utf16_units() {
        // Each crab is a surrogate pair in UTF-16.
        let crabs = "🦀".repeat(512);
        enforce_length(&crabs, 1024, TextKind::Caption).unwrap();
        let one_more = format!("{crabs}x");
        assert!(enforce_length(&one_more, 1024, TextKind::Caption).is_err());
    }

    #[test]
    fn test_check_limit_uses_visible_text() {
        // 1024 visible characters wrapped in bold markup.
        let input = format!("**{}**", "a".repeat(1024));
        let prepared = prepare(&input, FormatMode::Markdown).unwrap();
        assert!(prepared.text().len() > 1024);
        prepared.check_limit(TextKind::Caption).unwrap();

        let input = format!("**{}**", "a".repeat(1025));
        let prepared = prepare(&input, FormatMode::Markdown).unwrap();
        assert!(matches!(
            prepared.check_limit(TextKind::Caption),
            Err(FormatError::TooLong { kind: TextKind::Caption, .. })
        ));
    }
}
