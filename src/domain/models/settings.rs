/// Knobs the interview services need at request time. Built once from
/// configuration at startup.
#[derive(Clone, Debug, PartialEq)]
pub struct InterviewSettings {
    pub role: String,
    pub model: String,
    pub temperature: f32,
    pub feedback_model: String,
    pub transcription_model: String,
    pub transcription_language: String,
    /// Zero keeps resumes verbatim.
    pub resume_max_chars: usize,
}

impl Default for InterviewSettings {
    fn default() -> InterviewSettings {
        return InterviewSettings {
            role: "Software Engineer".to_string(),
            model: "llama-3.1-8b-instant".to_string(),
            temperature: 0.4,
            feedback_model: "llama-3.1-8b-instant".to_string(),
            transcription_model: "whisper-large-v3".to_string(),
            transcription_language: "en".to_string(),
            resume_max_chars: 0,
        };
    }
}
