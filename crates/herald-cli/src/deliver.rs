//! `herald send` / `herald speak` — deliver to Telegram.
//!
//! Both commands prepare the text locally first, so formatting errors are
//! reported before a channel or speech provider is built.

use anyhow::{Context, Result};
use colored::Colorize;
use tracing::info;

use herald_channels::base::Channel;
use herald_channels::formatting::prepare;
use herald_core::config::Config;
use herald_core::message::OutboundMessage;
use herald_core::types::{FormatMode, TextKind};
use herald_providers::create_speech_provider;

use crate::helpers::resolve_chat;

/// Send `text` as a message.
pub async fn send(config: &Config, text: &str, mode: FormatMode, chat: Option<&str>) -> Result<()> {
    let chat_id = resolve_chat(chat, config)?;
    prepare(text, mode)?.check_limit(TextKind::Message)?;

    let channel = build_channel(config)?;
    let msg = OutboundMessage::new(chat_id, text, mode);
    channel.send(&msg).await?;

    println!("  {} sent to {}", "✓".green(), msg.chat_id);
    Ok(())
}

/// Synthesize the visible form of `text` and send it as a voice note.
///
/// Markup never reaches the speech provider: a Markdown `**done**` is read
/// out as "done".
pub async fn speak(
    config: &Config,
    text: &str,
    caption: Option<&str>,
    mode: FormatMode,
    chat: Option<&str>,
) -> Result<()> {
    let chat_id = resolve_chat(chat, config)?;
    let spoken = prepare(text, mode)?;
    if let Some(caption) = caption.filter(|c| !c.trim().is_empty()) {
        prepare(caption, mode)?.check_limit(TextKind::Caption)?;
    }

    let channel = build_channel(config)?;
    let provider = create_speech_provider(&config.speech)?;

    info!(
        provider = provider.display_name(),
        chars = spoken.visible_len(),
        "synthesizing voice note"
    );
    let audio = provider
        .synthesize(spoken.visible_text())
        .await
        .with_context(|| format!("{} synthesis failed", provider.display_name()))?;

    let msg = OutboundMessage::new(chat_id, caption.unwrap_or_default(), mode)
        .with_voice(audio.bytes, audio.file_name);
    channel.send(&msg).await?;

    println!("  {} voice note sent to {}", "✓".green(), msg.chat_id);
    Ok(())
}

#[cfg(feature = "telegram")]
fn build_channel(config: &Config) -> Result<Box<dyn Channel>> {
    use herald_channels::telegram::TelegramChannel;

    if !config.telegram.is_configured() {
        anyhow::bail!("telegram.token is not set (run `herald onboard` and edit the config)");
    }
    Ok(Box::new(TelegramChannel::new(&config.telegram.token)))
}

#[cfg(not(feature = "telegram"))]
fn build_channel(_config: &Config) -> Result<Box<dyn Channel>> {
    anyhow::bail!("herald was built without Telegram support; rebuild with `--features telegram`")
}

#[cfg(test)]
mod tests {
    use super::*;
    use herald_channels::formatting::FormatError;

    fn config_with_chat() -> Config {
        let mut config = Config::default();
        config.telegram.chat_id = "42".into();
        config
    }

    #[tokio::test]
    async fn send_requires_chat() {
        let err = send(&Config::default(), "hi", FormatMode::Plain, None)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("no chat given"));
    }

    #[tokio::test]
    async fn send_rejects_empty_text_first() {
        let err = send(&config_with_chat(), " \n", FormatMode::Markdown, None)
            .await
            .unwrap_err();
        assert_eq!(err.downcast_ref::<FormatError>(), Some(&FormatError::EmptyInput));
    }

    #[tokio::test]
    async fn send_rejects_too_long_first() {
        let text = "a".repeat(4097);
        let err = send(&config_with_chat(), &text, FormatMode::Plain, None)
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<FormatError>(),
            Some(FormatError::TooLong { length: 4097, .. })
        ));
    }

    #[tokio::test]
    async fn speak_checks_caption_limit() {
        let caption = "c".repeat(1025);
        let err = speak(&config_with_chat(), "hello", Some(&caption), FormatMode::Plain, None)
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<FormatError>(),
            Some(FormatError::TooLong { kind: TextKind::Caption, .. })
        ));
    }

    #[cfg(not(feature = "telegram"))]
    #[tokio::test]
    async fn send_without_telegram_feature() {
        let err = send(&config_with_chat(), "hi", FormatMode::Plain, None)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("--features telegram"));
    }

    #[cfg(feature = "telegram")]
    #[tokio::test]
    async fn send_requires_token() {
        let err = send(&config_with_chat(), "hi", FormatMode::Plain, None)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("telegram.token"));
    }
}
