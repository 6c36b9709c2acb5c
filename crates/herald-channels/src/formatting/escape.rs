//! HTML escaping for text that lands inside Telegram markup.

/// Escape the characters that carry structural meaning in element content.
///
/// `&` → `&amp;`, `<` → `&lt;`, `>` → `&gt;`. Quotes are left alone; they only
/// matter inside attribute values (see [`escape_attribute`]).
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Escape only the quote characters.
///
/// Used for values that were already run through [`escape_text`] and are now
/// being placed inside a double-quoted attribute.
pub fn escape_quotes(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Escape raw text for use inside a double-quoted attribute value.
pub fn escape_attribute(text: &str) -> String {
    escape_quotes(&escape_text(text))
}
