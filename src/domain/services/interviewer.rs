#[cfg(test)]
#[path = "interviewer_test.rs"]
mod tests;

use super::prompts::build_system_prompt;
use super::resume::truncate_resume;
use crate::domain::models::select_stage;
use crate::domain::models::to_role_tagged;
use crate::domain::models::turn_index;
use crate::domain::models::BackendBox;
use crate::domain::models::ChatMessage;
use crate::domain::models::CompletionPrompt;
use crate::domain::models::InterviewError;
use crate::domain::models::InterviewSettings;
use crate::domain::models::Message;
use crate::domain::models::Role;

pub const CLOSING_MESSAGE: &str = "Thank you for your time. That concludes our interview.";

/// Drives a single chat exchange. Holds no conversation state: everything is
/// rebuilt from the history the client sends.
pub struct Interviewer {
    backend: BackendBox,
    settings: InterviewSettings,
}

impl Interviewer {
    pub fn new(backend: BackendBox, settings: InterviewSettings) -> Interviewer {
        return Interviewer { backend, settings };
    }

    /// Full message list sent to the backend: the system instruction first,
    /// then the replayed history.
    pub fn build_messages(
        &self,
        history: &[Message],
        resume_text: &str,
    ) -> Option<Vec<ChatMessage>> {
        let turn = turn_index(history);
        let plan = select_stage(turn);
        if plan.is_concluded() {
            return None;
        }

        let resume_text = truncate_resume(resume_text, self.settings.resume_max_chars);
        let system_prompt = build_system_prompt(&self.settings.role, &plan, turn, resume_text);

        let mut messages = vec![ChatMessage::new(Role::System, &system_prompt)];
        messages.extend(to_role_tagged(history));

        return Some(messages);
    }

    pub async fn next_reply(
        &self,
        history: &[Message],
        resume_text: &str,
    ) -> Result<String, InterviewError> {
        let turn = turn_index(history);
        let messages = match self.build_messages(history, resume_text) {
            Some(messages) => messages,
            None => {
                tracing::info!(turn = turn, "Interview concluded");
                return Ok(CLOSING_MESSAGE.to_string());
            }
        };

        tracing::debug!(
            turn = turn,
            stage = %select_stage(turn).stage,
            messages = messages.len(),
            "Requesting next question"
        );

        let prompt = CompletionPrompt::new(&self.settings.model, messages)
            .with_temperature(self.settings.temperature);
        let reply = self.backend.get_completion(prompt).await?;

        return Ok(reply);
    }
}
