//! Text-to-speech provider layer for Herald.
//!
//! # Architecture
//!
//! - [`speech::SpeechProvider`] — trait that all providers implement
//! - [`registry`] — static specs for the supported providers (endpoints, defaults, env keys)
//! - [`speech::OpenAiSpeech`] / [`speech::ElevenLabsSpeech`] — HTTP clients
//! - [`speech::create_speech_provider`] — builds the provider selected in the config

pub mod registry;
pub mod speech;

// Re-export main types for convenience
pub use registry::{SpeechSpec, SPEECH_PROVIDERS};
pub use speech::{create_speech_provider, ElevenLabsSpeech, OpenAiSpeech, SpeechAudio, SpeechProvider};
