//! Text-to-speech providers — turn message text into a voice note.
//!
//! Supports OpenAI's `/audio/speech` endpoint (and compatible servers) and
//! ElevenLabs' `/text-to-speech/{voice}` endpoint.

use std::time::Duration;

use anyhow::{anyhow, bail};
use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, error};

use herald_core::config::{SpeechConfig, SpeechProviderConfig};

use crate::registry::{find_by_name, provider_names, SpeechSpec};

/// Upper bound for a synthesis request.
const SYNTHESIS_TIMEOUT: Duration = Duration::from_secs(60);

// ─────────────────────────────────────────────
// Trait
// ─────────────────────────────────────────────

/// Synthesized audio ready to upload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpeechAudio {
    /// Encoded audio bytes.
    pub bytes: Vec<u8>,
    /// Upload file name, extension matching the encoding.
    pub file_name: String,
}

/// Trait for text-to-speech providers.
#[async_trait]
pub trait SpeechProvider: Send + Sync {
    /// Synthesize `text` into audio.
    async fn synthesize(&self, text: &str) -> anyhow::Result<SpeechAudio>;

    /// Display name for logging.
    fn display_name(&self) -> &str;

    /// Whether an API key is available.
    fn is_configured(&self) -> bool;
}

// ─────────────────────────────────────────────
// Shared settings
// ─────────────────────────────────────────────

/// Config values merged with registry defaults.
#[derive(Clone, Debug)]
struct ResolvedSettings {
    api_key: String,
    api_base: String,
    model: String,
    voice: String,
    spec: &'static SpeechSpec,
}

impl ResolvedSettings {
    /// Config wins; otherwise the registry default. The API key falls back to the
    /// provider's usual env var.
    fn resolve(config: &SpeechProviderConfig, spec: &'static SpeechSpec) -> Self {
        let api_key = if config.api_key.is_empty() {
            std::env::var(spec.env_key).unwrap_or_default()
        } else {
            config.api_key.clone()
        };

        Self {
            api_key,
            api_base: config
                .api_base
                .as_deref()
                .unwrap_or(spec.default_api_base)
                .trim_end_matches('/')
                .to_string(),
            model: config
                .model
                .clone()
                .unwrap_or_else(|| spec.default_model.to_string()),
            voice: config
                .voice
                .clone()
                .unwrap_or_else(|| spec.default_voice.to_string()),
            spec,
        }
    }

    fn file_name(&self) -> String {
        format!("speech.{}", self.spec.file_extension)
    }
}

fn spec(name: &str) -> &'static SpeechSpec {
    match find_by_name(name) {
        Some(spec) => spec,
        None => unreachable!("speech provider '{name}' missing from registry"),
    }
}

/// Check the request preconditions shared by all providers.
fn ensure_ready(settings: &ResolvedSettings, text: &str) -> anyhow::Result<()> {
    if settings.api_key.is_empty() {
        bail!(
            "{} is not configured (set speech.{}.apiKey or {})",
            settings.spec.display_name,
            settings.spec.name,
            settings.spec.env_key
        );
    }
    if text.trim().is_empty() {
        bail!("nothing to synthesize: text is empty");
    }
    Ok(())
}

/// Turn an HTTP response into audio bytes, or an error with the API message.
async fn read_audio(
    response: reqwest::Response,
    settings: &ResolvedSettings,
) -> anyhow::Result<SpeechAudio> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        error!(
            status = %status,
            body = %body,
            provider = settings.spec.display_name,
            "speech synthesis API error"
        );
        return Err(anyhow!(
            "{} returned {}: {}",
            settings.spec.display_name,
            status,
            api_error_message(&body)
        ));
    }

    let bytes = response.bytes().await?.to_vec();
    if bytes.is_empty() {
        bail!("{} returned no audio", settings.spec.display_name);
    }

    debug!(
        bytes = bytes.len(),
        provider = settings.spec.display_name,
        "speech synthesis complete"
    );

    Ok(SpeechAudio {
        bytes,
        file_name: settings.file_name(),
    })
}

/// Pull a human-readable message out of an error body.
///
/// Understands `{"error": {"message": …}}` (OpenAI) and
/// `{"detail": {"message": …}}` / `{"detail": "…"}` (ElevenLabs); anything
/// else is returned as-is.
fn api_error_message(body: &str) -> String {
    let Ok(json) = serde_json::from_str::<serde_json::Value>(body) else {
        return body.trim().to_string();
    };

    let message = json["error"]["message"]
        .as_str()
        .or_else(|| json["detail"]["message"].as_str())
        .or_else(|| json["detail"].as_str());

    match message {
        Some(m) => m.to_string(),
        None => body.trim().to_string(),
    }
}

// ─────────────────────────────────────────────
// OpenAI
// ─────────────────────────────────────────────

#[derive(Serialize)]
struct OpenAiSpeechRequest<'a> {
    model: &'a str,
    input: &'a str,
    voice: &'a str,
    response_format: &'a str,
}

/// OpenAI text-to-speech (`POST {base}/audio/speech`).
///
/// Requests Opus so the result can be sent as a Telegram voice note directly.
pub struct OpenAiSpeech {
    settings: ResolvedSettings,
    client: reqwest::Client,
}

impl OpenAiSpeech {
    /// Create a new OpenAI speech client.
    ///
    /// Falls back to `OPENAI_API_KEY` if the configured key is empty.
    pub fn new(config: &SpeechProviderConfig) -> Self {
        Self {
            settings: ResolvedSettings::resolve(config, spec("openai")),
            client: reqwest::Client::new(),
        }
    }

    fn speech_url(&self) -> String {
        format!("{}/audio/speech", self.settings.api_base)
    }
}

#[async_trait]
impl SpeechProvider for OpenAiSpeech {
    async fn synthesize(&self, text: &str) -> anyhow::Result<SpeechAudio> {
        ensure_ready(&self.settings, text)?;

        debug!(
            model = %self.settings.model,
            voice = %self.settings.voice,
            chars = text.chars().count(),
            "synthesizing speech via OpenAI"
        );

        let body = OpenAiSpeechRequest {
            model: &self.settings.model,
            input: text,
            voice: &self.settings.voice,
            response_format: "opus",
        };

        let response = self
            .client
            .post(self.speech_url())
            .bearer_auth(&self.settings.api_key)
            .json(&body)
            .timeout(SYNTHESIS_TIMEOUT)
            .send()
            .await?;

        read_audio(response, &self.settings).await
    }

    fn display_name(&self) -> &str {
        self.settings.spec.display_name
    }

    fn is_configured(&self) -> bool {
        !self.settings.api_key.is_empty()
    }
}

// ─────────────────────────────────────────────
// ElevenLabs
// ─────────────────────────────────────────────

#[derive(Serialize)]
struct ElevenLabsRequest<'a> {
    text: &'a str,
    model_id: &'a str,
}

/// ElevenLabs text-to-speech (`POST {base}/text-to-speech/{voice}`).
pub struct ElevenLabsSpeech {
    settings: ResolvedSettings,
    client: reqwest::Client,
}

impl ElevenLabsSpeech {
    /// Create a new ElevenLabs client.
    ///
    /// Falls back to `ELEVENLABS_API_KEY` if the configured key is empty.
    pub fn new(config: &SpeechProviderConfig) -> Self {
        Self {
            settings: ResolvedSettings::resolve(config, spec("elevenlabs")),
            client: reqwest::Client::new(),
        }
    }

    fn speech_url(&self) -> String {
        format!(
            "{}/text-to-speech/{}",
            self.settings.api_base, self.settings.voice
        )
    }
}

#[async_trait]
impl SpeechProvider for ElevenLabsSpeech {
    async fn synthesize(&self, text: &str) -> anyhow::Result<SpeechAudio> {
        ensure_ready(&self.settings, text)?;

        debug!(
            model = %self.settings.model,
            voice = %self.settings.voice,
            chars = text.chars().count(),
            "synthesizing speech via ElevenLabs"
        );

        let body = ElevenLabsRequest {
            text,
            model_id: &self.settings.model,
        };

        let response = self
            .client
            .post(self.speech_url())
            .header("xi-api-key", &self.settings.api_key)
            .header(reqwest::header::ACCEPT, "audio/mpeg")
            .json(&body)
            .timeout(SYNTHESIS_TIMEOUT)
            .send()
            .await?;

        read_audio(response, &self.settings).await
    }

    fn display_name(&self) -> &str {
        self.settings.spec.display_name
    }

    fn is_configured(&self) -> bool {
        !self.settings.api_key.is_empty()
    }
}

// ─────────────────────────────────────────────
// Factory
// ─────────────────────────────────────────────

/// Build the provider selected by `config.provider`.
///
/// Fails for unknown provider names and for providers without an API key.
pub fn create_speech_provider(config: &SpeechConfig) -> anyhow::Result<Box<dyn SpeechProvider>> {
    let spec = find_by_name(&config.provider).ok_or_else(|| {
        anyhow!(
            "unknown speech provider '{}' (expected one of: {})",
            config.provider,
            provider_names()
        )
    })?;

    let provider_config = config.get_by_name(spec.name).cloned().unwrap_or_default();

    let provider: Box<dyn SpeechProvider> = match spec.name {
        "elevenlabs" => Box::new(ElevenLabsSpeech::new(&provider_config)),
        _ => Box::new(OpenAiSpeech::new(&provider_config)),
    };

    if !provider.is_configured() {
        bail!(
            "{} has no API key (set speech.{}.apiKey or {})",
            spec.display_name,
            spec.name,
            spec.env_key
        );
    }

    debug!(provider = provider.display_name(), "speech provider ready");
    Ok(provider)
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
