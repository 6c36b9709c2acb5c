//! Markdown → Telegram HTML converter.
//!
//! Handles the subset people (and LLMs) actually type in chat messages:
//! - Inline code (`` `x` ``) → `<code>x</code>`
//! - Links `[text](https://…)` → `<a href="…">text</a>`
//! - Bold (`**x**`) → `<b>x</b>`
//! - Strikethrough (`~~x~~`) → `<s>x</s>`
//! - Italic (`*x*` or `_x_`) → `<i>x</i>`
//! - Headers (`# x`) → `<b>x</b>`
//!
//! Anything that does not parse as one of these is left as literal (escaped)
//! text. Conversion never fails.
//!
//! The pipeline escapes the input first, then hides code spans and links
//! behind placeholders so the span passes cannot touch their contents, and
//! finally swaps the placeholders back for real markup.

use std::sync::LazyLock;

use regex::Regex;

use super::escape::{escape_quotes, escape_text};

/// Placeholder delimiters (private-use code points).
const TOKEN_OPEN: char = '\u{E000}';
const TOKEN_CLOSE: char = '\u{E001}';

static LINK_URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^https?://[^\s<>"']+$"#).expect("link url pattern is valid")
});

static BOLD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*([^\n]+?)\*\*").expect("bold pattern is valid"));

static STRIKE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"~~([^\n]+?)~~").expect("strike pattern is valid"));

static HEADING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^#{1,6}[ \t]+([^ \t\n](?:[^\n]*[^ \t\n])?)[ \t]*$")
        .expect("heading pattern is valid")
});

/// Convert Markdown text to Telegram-compatible HTML.
///
/// If Telegram still rejects the result, the caller should fall back to
/// sending the original text as plain text.
pub fn markdown_to_telegram_html(text: &str) -> String {
    let escaped = escape_text(text);

    let mut placeholders = Placeholders::default();
    let tokenized = extract_code_spans(&escaped, &mut placeholders);
    let tokenized = extract_links(&tokenized, &mut placeholders);

    let formatted = format_spans(&tokenized);

    placeholders.restore(formatted)
}

// ─────────────────────────────────────────────
// Placeholders
// ─────────────────────────────────────────────

/// Placeholder → markup replacements recorded by the tokenizers.
#[derive(Debug, Default)]
struct Placeholders {
    code: Vec<(String, String)>,
    links: Vec<(String, String)>,
}

impl Placeholders {
    fn contains(&self, token: &str) -> bool {
        self.code
            .iter()
            .chain(self.links.iter())
            .any(|(t, _)| t == token)
    }

    /// A token that occurs neither in `source` nor in the table.
    ///
    /// Tries `OPEN kind index CLOSE` first, then appends `.1`, `.2`, … until
    /// the candidate is free.
    fn unique_token(&self, kind: &str, index: usize, source: &str) -> String {
        let base = format!("{TOKEN_OPEN}{kind}{index}");
        let mut token = format!("{base}{TOKEN_CLOSE}");
        let mut suffix = 0usize;
        while source.contains(&token) || self.contains(&token) {
            suffix += 1;
            token = format!("{base}.{suffix}{TOKEN_CLOSE}");
        }
        token
    }

    fn push_code(&mut self, content: &str, source: &str) -> String {
        let token = self.unique_token("code", self.code.len(), source);
        self.code
            .push((token.clone(), format!("<code>{content}</code>")));
        token
    }

    fn push_link(&mut self, label: &str, url: &str, source: &str) -> String {
        let token = self.unique_token("link", self.links.len(), source);
        let markup = format!(r#"<a href="{}">{}</a>"#, escape_quotes(url), label);
        self.links.push((token.clone(), markup));
        token
    }

    /// Swap every placeholder back for its markup. Links go first, then code.
    fn restore(&self, mut text: String) -> String {
        for (token, markup) in self.links.iter().chain(self.code.iter()) {
            text = text.replace(token.as_str(), markup);
        }
        text
    }
}

fn has_token_delimiter(s: &str) -> bool {
    s.contains(|c: char| c == TOKEN_OPEN || c == TOKEN_CLOSE)
}

// ─────────────────────────────────────────────
// Tokenizers
// ─────────────────────────────────────────────

/// Replace `` `code` `` spans with placeholders.
///
/// A span ends at the next backtick on the same line. A newline first means
/// the opening backtick is literal. Two adjacent backticks stay literal.
fn extract_code_spans(text: &str, placeholders: &mut Placeholders) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(open) = rest.find('`') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];

        match after.find(|c: char| c == '`' || c == '\n') {
            Some(close) if after.as_bytes()[close] == b'`' => {
                if close == 0 {
                    out.push_str("``");
                } else {
                    out.push_str(&placeholders.push_code(&after[..close], text));
                }
                rest = &after[close + 1..];
            }
            _ => {
                out.push('`');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}

/// Replace `[label](url)` with placeholders.
///
/// On any mismatch the `[` is emitted literally and scanning resumes right
/// after it.
fn extract_links(text: &str, placeholders: &mut Placeholders) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(open) = rest.find('[') {
        out.push_str(&rest[..open]);
        let candidate = &rest[open..];

        match match_link(candidate) {
            Some(link) => {
                out.push_str(&placeholders.push_link(link.label, link.url, text));
                rest = &candidate[link.len..];
            }
            None => {
                out.push('[');
                rest = &candidate[1..];
            }
        }
    }

    out.push_str(rest);
    out
}

struct LinkMatch<'a> {
    label: &'a str,
    url: &'a str,
    /// Bytes consumed, from `[` through `)`.
    len: usize,
}

/// Match a link at the start of `s` (which begins with `[`).
fn match_link(s: &str) -> Option<LinkMatch<'_>> {
    let body = s.strip_prefix('[')?;

    let label_end = body.find(']')?;
    let label = &body[..label_end];
    if label.is_empty() || label.contains(['\n', '[']) || has_token_delimiter(label) {
        return None;
    }

    let target = body[label_end + 1..].strip_prefix('(')?;
    let url_end = target.find(')')?;
    let url = &target[..url_end];
    if !LINK_URL_RE.is_match(url) || has_token_delimiter(url) {
        return None;
    }

    Some(LinkMatch {
        label,
        url,
        len: 1 + label_end + 2 + url_end + 1,
    })
}

// ─────────────────────────────────────────────
// Span formatting
// ─────────────────────────────────────────────

/// Apply the span passes in their fixed order.
///
/// Bold must run before `*` italic, otherwise `**x**` would pair up as two
/// italic markers.
fn format_spans(text: &str) -> String {
    let text = format_bold(text);
    let text = format_strikethrough(&text);
    let text = format_italic(&text, '*');
    let text = format_italic(&text, '_');
    format_headings(&text)
}

fn format_bold(text: &str) -> String {
    BOLD_RE.replace_all(text, "<b>$1</b>").into_owned()
}

fn format_strikethrough(text: &str) -> String {
    STRIKE_RE.replace_all(text, "<s>$1</s>").into_owned()
}

/// `*x*` / `_x_` → `<i>x</i>`.
///
/// Neither delimiter may touch another copy of itself (`**`, `__`), and the
/// content must be non-empty, single-line and free of the delimiter.
fn format_italic(text: &str, delim: char) -> String {
    let chars: Vec<char> = text.chars().collect();
    let is_delim = |idx: Option<usize>| idx.and_then(|j| chars.get(j)) == Some(&delim);

    let mut out = String::with_capacity(text.len());
    let mut i = 0;

    while i < chars.len() {
        if chars[i] == delim && !is_delim(i.checked_sub(1)) && !is_delim(Some(i + 1)) {
            let close = chars[i + 1..]
                .iter()
                .position(|&c| c == delim || c == '\n')
                .map(|offset| i + 1 + offset);

            if let Some(j) = close {
                if chars[j] == delim && j > i + 1 && !is_delim(Some(j + 1)) {
                    out.push_str("<i>");
                    out.extend(&chars[i + 1..j]);
                    out.push_str("</i>");
                    i = j + 1;
                    continue;
                }
            }
        }

        out.push(chars[i]);
        i += 1;
    }

    out
}

/// `# Title` (1–6 `#`, then spaces/tabs) → `<b>Title</b>`.
fn format_headings(text: &str) -> String {
    HEADING_RE.replace_all(text, "<b>$1</b>").into_owned()
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
