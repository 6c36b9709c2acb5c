//! Shared CLI helpers — input reading, chat resolution, status markers.

use std::io::Read;

use anyhow::{bail, Context, Result};
use colored::Colorize;

use herald_core::config::Config;

/// Resolve a `TEXT` argument: `-` reads all of stdin, anything else is literal.
pub fn read_text(arg: &str) -> Result<String> {
    read_text_from(arg, std::io::stdin().lock())
}

fn read_text_from(arg: &str, mut reader: impl Read) -> Result<String> {
    if arg != "-" {
        return Ok(arg.to_string());
    }
    let mut buf = String::new();
    reader
        .read_to_string(&mut buf)
        .context("failed to read text from stdin")?;
    // A trailing newline from `echo` or a heredoc is not part of the message.
    if buf.ends_with('\n') {
        buf.pop();
        if buf.ends_with('\r') {
            buf.pop();
        }
    }
    Ok(buf)
}

/// Pick the target chat: the `--chat` flag wins over `telegram.chatId`.
pub fn resolve_chat(flag: Option<&str>, config: &Config) -> Result<String> {
    let chat = flag
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| config.telegram.chat_id.trim());
    if chat.is_empty() {
        bail!("no chat given: pass --chat or set telegram.chatId in the config");
    }
    Ok(chat.to_string())
}

/// Green check or dimmed "not configured" marker.
pub fn configured_marker(configured: bool) -> String {
    if configured {
        format!("{} (key set)", "✓".green())
    } else {
        format!("{}", "· not configured".dimmed())
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_text_literal() {
        let text = read_text_from("**hi**", "ignored".as_bytes()).unwrap();
        assert_eq!(text, "**hi**");
    }

    #[test]
    fn read_text_stdin_strips_one_newline() {
        let text = read_text_from("-", "line one\nline two\n\n".as_bytes()).unwrap();
        assert_eq!(text, "line one\nline two\n");
    }

    #[test]
    fn read_text_stdin_crlf() {
        let text = read_text_from("-", "hello\r\n".as_bytes()).unwrap();
        assert_eq!(text, "hello");
    }

    #[test]
    fn resolve_chat_prefers_flag() {
        let mut config = Config::default();
        config.telegram.chat_id = "100".into();
        assert_eq!(resolve_chat(Some(" 42 "), &config).unwrap(), "42");
        assert_eq!(resolve_chat(None, &config).unwrap(), "100");
        assert_eq!(resolve_chat(Some(""), &config).unwrap(), "100");
    }

    #[test]
    fn resolve_chat_missing() {
        let err = resolve_chat(None, &Config::default()).unwrap_err();
        assert!(err.to_string().contains("--chat"));
    }
}
