#[cfg(test)]
#[path = "transcriber_test.rs"]
mod tests;

use crate::domain::models::AudioClip;
use crate::domain::models::BackendBox;
use crate::domain::models::InterviewError;
use crate::domain::models::InterviewSettings;
use crate::domain::models::Upload;

const DEFAULT_FILE_NAME: &str = "audio.wav";
const DEFAULT_MIME_TYPE: &str = "audio/wav";

pub struct Transcriber {
    backend: BackendBox,
    settings: InterviewSettings,
}

impl Transcriber {
    pub fn new(backend: BackendBox, settings: InterviewSettings) -> Transcriber {
        return Transcriber { backend, settings };
    }

    pub fn to_clip(&self, upload: Upload) -> AudioClip {
        let file_name = upload
            .file_name
            .filter(|name| return !name.is_empty())
            .unwrap_or_else(|| return DEFAULT_FILE_NAME.to_string());
        let mime_type = upload
            .content_type
            .filter(|mime| return !mime.is_empty())
            .unwrap_or_else(|| return DEFAULT_MIME_TYPE.to_string());

        return AudioClip {
            file_name,
            mime_type,
            bytes: upload.bytes,
            model: self.settings.transcription_model.to_string(),
            language: self.settings.transcription_language.to_string(),
        };
    }

    pub async fn transcribe(&self, upload: Option<Upload>) -> Result<String, InterviewError> {
        let upload = match upload {
            Some(upload) if !upload.is_empty() => upload,
            _ => return Err(InterviewError::InputMissing("No audio provided")),
        };

        let clip = self.to_clip(upload);
        tracing::debug!(
            file_name = %clip.file_name,
            bytes = clip.bytes.len(),
            model = %clip.model,
            "Transcribing audio"
        );

        let text = self.backend.transcribe(clip).await?;

        return Ok(text);
    }
}
