pub mod feedback_synthesizer;
pub mod interviewer;
pub mod prompts;
pub mod resume;
pub mod transcriber;

pub use feedback_synthesizer::FeedbackSynthesizer;
pub use interviewer::Interviewer;
pub use resume::ResumeReader;
pub use transcriber::Transcriber;
