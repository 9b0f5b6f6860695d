#[cfg(test)]
#[path = "feedback_synthesizer_test.rs"]
mod tests;

use super::prompts::build_feedback_prompt;
use super::resume::truncate_resume;
use crate::domain::models::BackendBox;
use crate::domain::models::ChatMessage;
use crate::domain::models::CompletionPrompt;
use crate::domain::models::FeedbackReport;
use crate::domain::models::InterviewError;
use crate::domain::models::InterviewSettings;
use crate::domain::models::Message;
use crate::domain::models::Role;

pub struct FeedbackSynthesizer {
    backend: BackendBox,
    settings: InterviewSettings,
}

impl FeedbackSynthesizer {
    pub fn new(backend: BackendBox, settings: InterviewSettings) -> FeedbackSynthesizer {
        return FeedbackSynthesizer { backend, settings };
    }

    /// Grades the whole transcript. The model's JSON object is returned as
    /// is, even when it does not match the requested report shape.
    pub async fn synthesize(
        &self,
        history: &[Message],
        resume_text: &str,
    ) -> Result<serde_json::Value, InterviewError> {
        let resume_text = truncate_resume(resume_text, self.settings.resume_max_chars);
        let text = build_feedback_prompt(history, resume_text)?;

        let prompt = CompletionPrompt::new(
            &self.settings.feedback_model,
            vec![ChatMessage::new(Role::User, &text)],
        )
        .with_json_response();

        let reply = self.backend.get_completion(prompt).await?;

        return parse_report(&reply);
    }
}

pub fn parse_report(reply: &str) -> Result<serde_json::Value, InterviewError> {
    let value: serde_json::Value = serde_json::from_str(reply.trim())
        .map_err(|err| return InterviewError::MalformedUpstreamResponse(err.to_string()))?;

    if !value.is_object() {
        return Err(InterviewError::MalformedUpstreamResponse(
            "feedback is not a JSON object".to_string(),
        ));
    }

    if let Err(err) = FeedbackReport::from_value(&value) {
        tracing::warn!(error = %err, "Feedback does not match the requested report shape");
    }

    return Ok(value);
}
