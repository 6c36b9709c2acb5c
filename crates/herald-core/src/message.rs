//! Outbound message — what the CLI (or any caller) hands to a channel.

use crate::types::FormatMode;

/// A message to deliver to a chat.
///
/// `content` is the raw, unprepared text; the channel runs it through the
/// formatter according to `mode`. When `voice` is set, `content` becomes the
/// caption of the voice note (and may be empty).
#[derive(Clone, Debug)]
pub struct OutboundMessage {
    /// Target chat identifier.
    pub chat_id: String,
    /// Text content (message body, or caption when `voice` is set).
    pub content: String,
    /// How `content` is written.
    pub mode: FormatMode,
    /// Audio for a voice note.
    pub voice: Option<VoiceNote>,
}

/// Encoded audio plus the file name it is uploaded under.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VoiceNote {
    pub audio: Vec<u8>,
    pub file_name: String,
}

impl OutboundMessage {
    /// Create a new text message.
    pub fn new(chat_id: impl Into<String>, content: impl Into<String>, mode: FormatMode) -> Self {
        OutboundMessage {
            chat_id: chat_id.into(),
            content: content.into(),
            mode,
            voice: None,
        }
    }

    /// Attach voice audio; `content` becomes its caption.
    pub fn with_voice(mut self, audio: Vec<u8>, file_name: impl Into<String>) -> Self {
        self.voice = Some(VoiceNote {
            audio,
            file_name: file_name.into(),
        });
        self
    }

    /// Whether there is caption/body text worth sending.
    pub fn has_text(&self) -> bool {
        !self.content.trim().is_empty()
    }
}
