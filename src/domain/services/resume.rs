#[cfg(test)]
#[path = "resume_test.rs"]
mod tests;

use anyhow::anyhow;

use crate::domain::models::DocumentExtractorBox;
use crate::domain::models::InterviewError;
use crate::domain::models::Upload;

/// Cuts resume text to at most `max_chars` characters. Zero disables the cut.
pub fn truncate_resume(text: &str, max_chars: usize) -> &str {
    if max_chars == 0 {
        return text;
    }

    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => return &text[..idx],
        None => return text,
    }
}

pub struct ResumeReader {
    extractor: DocumentExtractorBox,
}

impl ResumeReader {
    pub fn new(extractor: DocumentExtractorBox) -> ResumeReader {
        return ResumeReader { extractor };
    }

    pub async fn read(&self, upload: Option<Upload>) -> Result<String, InterviewError> {
        let upload = match upload {
            Some(upload) if !upload.is_empty() => upload,
            _ => return Err(InterviewError::InputMissing("No file uploaded")),
        };

        tracing::debug!(
            file_name = upload.file_name.as_deref().unwrap_or_default(),
            bytes = upload.bytes.len(),
            "Extracting resume text"
        );

        let extractor = self.extractor.clone();
        let text = tokio::task::spawn_blocking(move || {
            return extractor.extract_text(&upload.bytes);
        })
        .await
        .map_err(|err| return anyhow!("Resume extraction task failed: {err}"))??;

        return Ok(text);
    }
}
