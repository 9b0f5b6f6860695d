#[cfg(test)]
#[path = "backend_test.rs"]
mod tests;

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use strum::EnumIter;
use strum::EnumVariantNames;
use strum::IntoEnumIterator;

use super::ChatMessage;

#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, EnumVariantNames, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum BackendName {
    Groq,
    OpenAI,
}

impl BackendName {
    pub fn parse(text: String) -> Option<BackendName> {
        return BackendName::iter().find(|e| return e.to_string() == text);
    }
}

const NON_CHAT_MODEL_MARKERS: [&str; 4] = ["whisper", "tts", "embed", "guard"];

/// Whether a model ID listed by a backend can hold a conversation.
pub fn is_chat_model(model_id: &str) -> bool {
    let id = model_id.to_lowercase();
    return !NON_CHAT_MODEL_MARKERS
        .iter()
        .any(|marker| return id.contains(marker));
}

#[derive(Clone, Debug, PartialEq)]
pub struct CompletionPrompt {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: Option<f32>,
    /// Ask the backend to constrain its reply to a single JSON object.
    pub json_response: bool,
}

impl CompletionPrompt {
    pub fn new(model: &str, messages: Vec<ChatMessage>) -> CompletionPrompt {
        return CompletionPrompt {
            model: model.to_string(),
            messages,
            temperature: None,
            json_response: false,
        };
    }

    pub fn with_temperature(mut self, temperature: f32) -> CompletionPrompt {
        self.temperature = Some(temperature);
        return self;
    }

    pub fn with_json_response(mut self) -> CompletionPrompt {
        self.json_response = true;
        return self;
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct AudioClip {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
    pub model: String,
    pub language: String,
}

#[async_trait]
pub trait Backend {
    fn name(&self) -> BackendName;

    /// Used at startup to verify all configurations are available to work with
    /// the backend.
    async fn health_check(&self) -> Result<()>;

    /// Used by the `models` subcommand to show which models can be set for
    /// chat, feedback, and transcription.
    async fn list_models(&self) -> Result<Vec<String>>;

    /// Requests a single, non-streamed completion and returns the text of the
    /// first choice.
    async fn get_completion(&self, prompt: CompletionPrompt) -> Result<String>;

    /// Uploads recorded audio and returns the transcribed text.
    async fn transcribe(&self, clip: AudioClip) -> Result<String>;
}

pub type BackendBox = Arc<dyn Backend + Send + Sync>;
