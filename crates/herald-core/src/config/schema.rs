//! Configuration schema.
//!
//! Hierarchy: `Config` → `TelegramConfig`, `SpeechConfig` → per-provider
//! `SpeechProviderConfig`.
//!
//! JSON on disk uses **camelCase** keys; Rust uses snake_case.
//! We use `#[serde(rename_all = "camelCase")]` to handle the conversion.

use serde::{Deserialize, Serialize};

use crate::types::FormatMode;

// ─────────────────────────────────────────────
// Root Config
// ─────────────────────────────────────────────

/// Root configuration — loaded from `~/.herald/config.json` + env vars.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    pub telegram: TelegramConfig,
    pub speech: SpeechConfig,
}

// ─────────────────────────────────────────────
// Telegram
// ─────────────────────────────────────────────

/// Telegram bot settings.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TelegramConfig {
    /// Bot token from @BotFather.
    pub token: String,
    /// Default chat to deliver to when none is given on the command line.
    pub chat_id: String,
    /// How message text is written unless overridden per send.
    pub parse_mode: FormatMode,
}

impl TelegramConfig {
    /// Whether a bot token is set.
    pub fn is_configured(&self) -> bool {
        !self.token.is_empty()
    }
}

// ─────────────────────────────────────────────
// Speech
// ─────────────────────────────────────────────

/// Settings for one text-to-speech backend.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SpeechProviderConfig {
    /// API key for authentication.
    pub api_key: String,
    /// Custom API base URL (overrides provider default).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_base: Option<String>,
    /// Model identifier (provider default when unset).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Voice name or ID (provider default when unset).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voice: Option<String>,
}

impl SpeechProviderConfig {
    /// Whether this provider has a configured API key.
    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }
}

/// Text-to-speech selection and per-provider settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SpeechConfig {
    /// Active provider: `"openai"` or `"elevenlabs"`.
    pub provider: String,
    pub openai: SpeechProviderConfig,
    pub elevenlabs: SpeechProviderConfig,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            provider: "openai".to_string(),
            openai: SpeechProviderConfig::default(),
            elevenlabs: SpeechProviderConfig::default(),
        }
    }
}

impl SpeechConfig {
    /// Get a provider config by name (e.g. `"openai"`).
    pub fn get_by_name(&self, name: &str) -> Option<&SpeechProviderConfig> {
        match name {
            "openai" => Some(&self.openai),
            "elevenlabs" => Some(&self.elevenlabs),
            _ => None,
        }
    }

    /// Config of the currently selected provider.
    pub fn active(&self) -> Option<&SpeechProviderConfig> {
        self.get_by_name(&self.provider)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(!config.telegram.is_configured());
        assert_eq!(config.telegram.parse_mode, FormatMode::Markdown);
        assert_eq!(config.speech.provider, "openai");
    }

    #[test]
    fn test_deserialize_camel_case() {
        let config: Config = serde_json::from_str(
            r#"{
                "telegram": { "token": "123:abc", "chatId": "42", "parseMode": "html" },
                "speech": { "provider": "elevenlabs", "elevenlabs": { "apiKey": "xi-key", "voice": "Rachel" } }
            }"#,
        )
        .unwrap();

        assert_eq!(config.telegram.chat_id, "42");
        assert_eq!(config.telegram.parse_mode, FormatMode::Html);
        assert_eq!(config.speech.provider, "elevenlabs");
        let active = config.speech.active().unwrap();
        assert!(active.is_configured());
        assert_eq!(active.voice.as_deref(), Some("Rachel"));
    }

    #[test]
    fn test_unknown_parse_mode_rejected() {
        let result: Result<Config, _> =
            serde_json::from_str(r#"{ "telegram": { "parseMode": "rtf" } }"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_get_by_name_unknown() {
        let speech = SpeechConfig::default();
        assert!(speech.get_by_name("polly").is_none());
    }

    #[test]
    fn test_optional_fields_not_serialized() {
        let json = serde_json::to_value(SpeechProviderConfig::default()).unwrap();
        assert!(json.get("apiKey").is_some());
        assert!(json.get("apiBase").is_none());
        assert!(json.get("voice").is_none());
    }
}
