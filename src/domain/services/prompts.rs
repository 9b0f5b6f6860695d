#[cfg(test)]
#[path = "prompts_test.rs"]
mod tests;

use anyhow::Result;

use crate::domain::models::feedback_schema;
use crate::domain::models::total_turns;
use crate::domain::models::Message;
use crate::domain::models::StagePlan;

/// Instruction for the interviewer model on a single turn. The rules are
/// advisory; nothing here can check that the model follows them.
pub fn build_system_prompt(role: &str, plan: &StagePlan, turn: usize, resume_text: &str) -> String {
    let stage = plan.stage;
    let goal = &plan.goal;
    let total = total_turns();

    return format!(
        r#"ROLE: {role}
INTERVIEW STAGE: {stage} (Turn {turn}/{total}).
GOAL: {goal}
RESUME CONTEXT: """{resume_text}"""
STRICT RULES:
1. **NO INTRODUCTIONS**: After turn 0, never ask "tell me about yourself."
2. **DYNAMIC TOPICS**: Check history. If you just asked about "Role A," you MUST switch to "Role B" or "Project C" now.
3. **SPECIFICITY**: Mention specific nouns (Company/Project/Skill names) found in the RESUME CONTEXT.
4. **BREVITY**: Keep questions under 2 sentences. No meta-talk like "Moving to the next stage.""#
    );
}

pub fn build_feedback_prompt(history: &[Message], resume_text: &str) -> Result<String> {
    let transcript = serde_json::to_string(history)?;
    let schema = feedback_schema();

    return Ok(format!(
        r#"Act as a Google Hiring Committee.
Analyze this interview transcript for the candidate based on their resume: {resume_text}.
Transcript: {transcript}
Return ONLY a JSON object with this exact structure:
{schema}"#
    ));
}
