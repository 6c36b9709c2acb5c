//! Telegram-safe text formatting.
//!
//! Outbound text goes through [`prepare`] before it reaches a channel:
//! - **escape**: HTML escaping for element content and attribute values
//! - **markdown**: Markdown subset → Telegram HTML (never fails)
//! - **validate**: allowlist check for caller-supplied HTML (never repairs)
//! - **markup**: tag vocabulary, tag stripping, entity decoding
//! - **prepare**: `prepare()` / `enforce_length()` and `PreparedText`
//!
//! Everything here is pure and synchronous.

pub mod error;
pub mod escape;
pub mod markdown;
pub mod markup;
pub mod prepare;
pub mod validate;

pub use error::FormatError;
pub use escape::{escape_attribute, escape_quotes, escape_text};
pub use markdown::markdown_to_telegram_html;
pub use markup::{visible_text, ALLOWED_TAGS, DENIED_TAGS};
pub use prepare::{enforce_length, normalize_line_endings, prepare, ParseMode, PreparedText};
pub use validate::{validate_html, MarkupViolation};
