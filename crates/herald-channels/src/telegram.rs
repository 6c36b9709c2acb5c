//! Telegram channel — outbound delivery via `teloxide`.
//!
//! Features:
//! - Text messages and voice notes with captions
//! - Markdown / HTML / plain text, prepared by [`crate::formatting`]
//! - Visible-length checks against the 4096 (message) and 1024 (caption) limits
//! - One plain-text retry when Telegram cannot parse converted Markdown
//! - Numeric chat IDs and `@channel` usernames

use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{InputFile, ParseMode as TelegramParseMode, Recipient};
use teloxide::{ApiError, RequestError};
use tracing::{debug, info, warn};

use herald_core::message::{OutboundMessage, VoiceNote};
use herald_core::types::{FormatMode, TextKind};

use crate::base::Channel;
use crate::formatting::{prepare, FormatError, ParseMode, PreparedText};

// ─────────────────────────────────────────────
// TelegramChannel
// ─────────────────────────────────────────────

/// Telegram bot channel (send-only).
pub struct TelegramChannel {
    bot: Bot,
}

impl TelegramChannel {
    /// Create a new Telegram channel from a bot token.
    pub fn new(token: &str) -> Self {
        Self {
            bot: Bot::new(token),
        }
    }

    async fn deliver_text(&self, to: Recipient, msg: &OutboundMessage) -> anyhow::Result<()> {
        let prepared = prepare(&msg.content, msg.mode)?;
        prepared.check_limit(TextKind::Message)?;

        match self.post_text(to.clone(), &prepared).await {
            Ok(()) => Ok(()),
            Err(e) if needs_plain_fallback(msg.mode, &e) => {
                warn!(error = %e, "HTML send failed, retrying as plain text");
                let plain = plain_fallback(&prepared, TextKind::Message)?;
                self.post_text(to, &plain).await?;
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn deliver_voice(
        &self,
        to: Recipient,
        msg: &OutboundMessage,
        voice: &VoiceNote,
    ) -> anyhow::Result<()> {
        let caption = if msg.has_text() {
            let prepared = prepare(&msg.content, msg.mode)?;
            prepared.check_limit(TextKind::Caption)?;
            Some(prepared)
        } else {
            None
        };

        match self.post_voice(to.clone(), voice, caption.as_ref()).await {
            Ok(()) => Ok(()),
            Err(e) if needs_plain_fallback(msg.mode, &e) => {
                warn!(error = %e, "HTML caption rejected, retrying as plain text");
                let plain = match &caption {
                    Some(prepared) => Some(plain_fallback(prepared, TextKind::Caption)?),
                    None => None,
                };
                self.post_voice(to, voice, plain.as_ref()).await?;
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn post_text(&self, to: Recipient, prepared: &PreparedText) -> Result<(), RequestError> {
        let mut request = self.bot.send_message(to, prepared.text());
        if let Some(mode) = telegram_parse_mode(prepared) {
            request = request.parse_mode(mode);
        }
        request.await?;
        Ok(())
    }

    async fn post_voice(
        &self,
        to: Recipient,
        voice: &VoiceNote,
        caption: Option<&PreparedText>,
    ) -> Result<(), RequestError> {
        let file = InputFile::memory(voice.audio.clone()).file_name(voice.file_name.clone());
        let mut request = self.bot.send_voice(to, file);
        if let Some(prepared) = caption {
            request = request.caption(prepared.text());
            if let Some(mode) = telegram_parse_mode(prepared) {
                request = request.parse_mode(mode);
            }
        }
        request.await?;
        Ok(())
    }
}

#[async_trait]
impl Channel for TelegramChannel {
    fn name(&self) -> &str {
        "telegram"
    }

    async fn send(&self, msg: &OutboundMessage) -> anyhow::Result<()> {
        let to = parse_recipient(&msg.chat_id)?;

        match &msg.voice {
            Some(voice) => {
                self.deliver_voice(to, msg, voice).await?;
                info!(chat_id = %msg.chat_id, bytes = voice.audio.len(), "telegram voice note sent");
            }
            None => {
                self.deliver_text(to, msg).await?;
                info!(chat_id = %msg.chat_id, "telegram message sent");
            }
        }

        Ok(())
    }
}

// ─────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────

/// Parse a chat ID: a (possibly negative) integer, or an `@channel` username.
fn parse_recipient(chat_id: &str) -> anyhow::Result<Recipient> {
    let chat_id = chat_id.trim();
    if chat_id.len() > 1 && chat_id.starts_with('@') {
        return Ok(Recipient::ChannelUsername(chat_id.to_string()));
    }
    chat_id
        .parse::<i64>()
        .map(|id| Recipient::Id(ChatId(id)))
        .map_err(|_| anyhow::anyhow!("invalid telegram chat_id: {chat_id:?}"))
}

fn telegram_parse_mode(prepared: &PreparedText) -> Option<TelegramParseMode> {
    prepared.parse_mode().map(|mode| match mode {
        ParseMode::Html => TelegramParseMode::Html,
    })
}

/// Only converted Markdown gets a second chance: caller-supplied HTML was
/// already validated, and plain text has nothing to parse.
fn needs_plain_fallback(mode: FormatMode, err: &RequestError) -> bool {
    let parse_failure = matches!(err, RequestError::Api(ApiError::CantParseEntities(_)));
    if parse_failure {
        debug!(mode = %mode, "telegram could not parse entities");
    }
    mode == FormatMode::Markdown && parse_failure
}

/// The unformatted retry: the normalized source as plain text, re-checked
/// against the limit since markup no longer hides the Markdown markers.
fn plain_fallback(prepared: &PreparedText, kind: TextKind) -> Result<PreparedText, FormatError> {
    let plain = prepare(prepared.normalized_source(), FormatMode::Plain)?;
    plain.check_limit(kind)?;
    Ok(plain)
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_error() -> RequestError {
        RequestError::Api(ApiError::CantParseEntities(
            "Bad Request: can't parse entities".into(),
        ))
    }

    #[test]
    fn test_channel_name() {
        let ch = TelegramChannel::new("123456:test_token");
        assert_eq!(ch.name(), "telegram");
    }

    #[test]
    fn test_parse_recipient_numeric() {
        match parse_recipient("123456").unwrap() {
            Recipient::Id(ChatId(id)) => assert_eq!(id, 123456),
            other => panic!("unexpected recipient: {other:?}"),
        }
    }

    #[test]
    fn test_parse_recipient_negative_group() {
        match parse_recipient(" -1001234567890 ").unwrap() {
            Recipient::Id(ChatId(id)) => assert_eq!(id, -1001234567890),
            other => panic!("unexpected recipient: {other:?}"),
        }
    }

    #[test]
    fn test_parse_recipient_channel_username() {
        match parse_recipient("@herald_news").unwrap() {
            Recipient::ChannelUsername(name) => assert_eq!(name, "@herald_news"),
            other => panic!("unexpected recipient: {other:?}"),
        }
    }

    #[test]
    fn test_parse_recipient_invalid() {
        assert!(parse_recipient("").is_err());
        assert!(parse_recipient("@").is_err());
        assert!(parse_recipient("chat_99").is_err());
    }

    #[test]
    fn test_fallback_only_for_markdown_parse_errors() {
        assert!(needs_plain_fallback(FormatMode::Markdown, &parse_error()));
        assert!(!needs_plain_fallback(FormatMode::Html, &parse_error()));
        assert!(!needs_plain_fallback(FormatMode::Plain, &parse_error()));
        assert!(!needs_plain_fallback(
            FormatMode::Markdown,
            &RequestError::Api(ApiError::BotBlocked)
        ));
    }

    #[test]
    fn test_plain_fallback_uses_normalized_source() {
        let prepared = prepare("**bold**\r\nnext", FormatMode::Markdown).unwrap();
        let plain = plain_fallback(&prepared, TextKind::Message).unwrap();
        assert_eq!(plain.text(), "**bold**\nnext");
        assert_eq!(plain.parse_mode(), None);
    }

    #[test]
    fn test_plain_fallback_rechecks_length() {
        // 1022 visible characters as Markdown, 1026 as plain text.
        let input = format!("**{}**", "a".repeat(1022));
        let prepared = prepare(&input, FormatMode::Markdown).unwrap();
        prepared.check_limit(TextKind::Caption).unwrap();

        let err = plain_fallback(&prepared, TextKind::Caption).unwrap_err();
        assert!(matches!(err, FormatError::TooLong { .. }));
    }

    #[test]
    fn test_telegram_parse_mode_mapping() {
        let md = prepare("x", FormatMode::Markdown).unwrap();
        assert!(matches!(telegram_parse_mode(&md), Some(TelegramParseMode::Html)));
        let plain = prepare("x", FormatMode::Plain).unwrap();
        assert!(telegram_parse_mode(&plain).is_none());
    }

    #[tokio::test]
    async fn test_send_rejects_bad_chat_id_before_network() {
        let ch = TelegramChannel::new("123456:test_token");
        let msg = OutboundMessage::new("not-a-chat", "hi", FormatMode::Plain);
        let err = ch.send(&msg).await.unwrap_err();
        assert!(err.to_string().contains("invalid telegram chat_id"));
    }

    #[tokio::test]
    async fn test_send_rejects_empty_text_before_network() {
        let ch = TelegramChannel::new("123456:test_token");
        let msg = OutboundMessage::new("42", "   ", FormatMode::Markdown);
        let err = ch.send(&msg).await.unwrap_err();
        assert_eq!(err.downcast_ref::<FormatError>(), Some(&FormatError::EmptyInput));
    }
}
