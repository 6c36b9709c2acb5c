//! Telegram markup vocabulary: which tags exist, how to find them, and how to
//! reduce markup to the text a reader actually sees.

use std::sync::LazyLock;

use regex::{Captures, Regex};

/// Tags Telegram renders in `parse_mode=HTML`. Lowercase.
pub const ALLOWED_TAGS: &[&str] = &[
    "a",
    "b",
    "blockquote",
    "code",
    "del",
    "em",
    "i",
    "ins",
    "pre",
    "s",
    "spoiler",
    "strike",
    "strong",
    "tg-spoiler",
    "u",
];

/// Tags rejected outright, before the allowlist is consulted.
pub const DENIED_TAGS: &[&str] = &[
    "script", "style", "iframe", "object", "embed", "form", "input", "button", "img",
];

/// An opening or closing tag: `(/?)`, name, raw attribute text.
pub(crate) static TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<(/?)([A-Za-z][A-Za-z0-9-]*)([^>]*)>").expect("tag pattern is valid")
});

static ENTITY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(#[0-9]{1,7}|#[xX][0-9a-fA-F]{1,6}|[A-Za-z]+);").expect("entity pattern is valid")
});

/// Whether `name` (any case) is a tag Telegram accepts.
pub fn is_allowed_tag(name: &str) -> bool {
    ALLOWED_TAGS.iter().any(|t| t.eq_ignore_ascii_case(name))
}

/// Whether `name` (any case) is on the hard denylist.
pub fn is_denied_tag(name: &str) -> bool {
    DENIED_TAGS.iter().any(|t| t.eq_ignore_ascii_case(name))
}

/// Remove every tag-shaped span, keeping the content between tags.
pub fn strip_tags(markup: &str) -> String {
    TAG_RE.replace_all(markup, "").into_owned()
}

/// Decode HTML entities in a single pass.
///
/// Handles the named entities Telegram supports (`&amp;`, `&lt;`, `&gt;`,
/// `&quot;`, `&apos;`) plus decimal and hex numeric references. Unknown or
/// invalid references are kept verbatim. A single pass means `&amp;lt;`
/// decodes to `&lt;`, not `<`.
pub fn decode_entities(text: &str) -> String {
    ENTITY_RE
        .replace_all(text, |caps: &Captures| {
            let body = &caps[1];
            let decoded = match body {
                "amp" => Some('&'),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                _ => decode_numeric(body),
            };
            match decoded {
                Some(ch) => ch.to_string(),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

fn decode_numeric(body: &str) -> Option<char> {
    let digits = body.strip_prefix('#')?;
    let code = match digits.strip_prefix(['x', 'X']) {
        Some(hex) => u32::from_str_radix(hex, 16).ok()?,
        None => digits.parse::<u32>().ok()?,
    };
    char::from_u32(code)
}

/// The text a reader sees: tags stripped, entities decoded.
pub fn visible_text(markup: &str) -> String {
    decode_entities(&strip_tags(markup))
}
