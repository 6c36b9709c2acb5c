//! Speech provider registry — static specs for the supported TTS backends.
//!
//! Each `SpeechSpec` describes how to reach a provider when the config leaves
//! a field unset: default endpoint, model, voice, and the env var holding the
//! API key.

// ─────────────────────────────────────────────
// SpeechSpec — static metadata for one provider
// ─────────────────────────────────────────────

/// Static specification describing one text-to-speech provider.
#[derive(Clone, Debug)]
pub struct SpeechSpec {
    /// Internal name, matching the config key (e.g. `"openai"`).
    pub name: &'static str,
    /// Human-readable name for logs and status output.
    pub display_name: &'static str,
    /// Environment variable consulted when the config has no API key.
    pub env_key: &'static str,
    /// Default API base URL.
    pub default_api_base: &'static str,
    /// Default model identifier.
    pub default_model: &'static str,
    /// Default voice name or ID.
    pub default_voice: &'static str,
    /// Extension of the audio the provider returns (used for the upload name).
    pub file_extension: &'static str,
}

/// All supported speech providers.
pub static SPEECH_PROVIDERS: &[SpeechSpec] = &[
    SpeechSpec {
        name: "openai",
        display_name: "OpenAI TTS",
        env_key: "OPENAI_API_KEY",
        default_api_base: "https://api.openai.com/v1",
        default_model: "gpt-4o-mini-tts",
        default_voice: "alloy",
        // requested as `response_format: "opus"`, delivered in an Ogg container
        file_extension: "ogg",
    },
    SpeechSpec {
        name: "elevenlabs",
        display_name: "ElevenLabs",
        env_key: "ELEVENLABS_API_KEY",
        default_api_base: "https://api.elevenlabs.io/v1",
        default_model: "eleven_multilingual_v2",
        default_voice: "21m00Tcm4TlvDq8ikWAM",
        file_extension: "mp3",
    },
];

/// Find a provider spec by name (case-insensitive).
pub fn find_by_name(name: &str) -> Option<&'static SpeechSpec> {
    let name = name.trim();
    SPEECH_PROVIDERS
        .iter()
        .find(|spec| spec.name.eq_ignore_ascii_case(name))
}

/// Comma-separated provider names, for error messages.
pub fn provider_names() -> String {
    SPEECH_PROVIDERS
        .iter()
        .map(|spec| spec.name)
        .collect::<Vec<_>>()
        .join(", ")
}
