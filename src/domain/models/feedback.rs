#[cfg(test)]
#[path = "feedback_test.rs"]
mod tests;

use anyhow::bail;
use anyhow::Result;
use serde_derive::Deserialize;
use serde_derive::Serialize;

pub const MAX_SCORE: u8 = 100;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
pub enum HiringVerdict {
    #[serde(rename = "Strong Hire")]
    #[strum(serialize = "Strong Hire")]
    StrongHire,
    #[serde(rename = "Hire")]
    #[strum(serialize = "Hire")]
    Hire,
    #[serde(rename = "Leaning No")]
    #[strum(serialize = "Leaning No")]
    LeaningNo,
    #[serde(rename = "No Hire")]
    #[strum(serialize = "No Hire")]
    NoHire,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailedMetrics {
    pub technical_depth: u8,
    pub communication_clarity: u8,
    pub problem_solving: u8,
    pub experience_relevance: u8,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionAnalysis {
    pub experience: String,
    pub technical_skills: String,
    pub achievements: String,
}

/// The report shape requested from the model on the feedback path.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FeedbackReport {
    pub overall_score: u8,
    pub detailed_metrics: DetailedMetrics,
    pub section_analysis: SectionAnalysis,
    pub strengths: Vec<String>,
    pub areas_for_improvement: Vec<String>,
    pub critical_missing_points: String,
    pub hiring_verdict: HiringVerdict,
    pub summary: String,
}

impl FeedbackReport {
    pub fn from_value(value: &serde_json::Value) -> Result<FeedbackReport> {
        let report: FeedbackReport = serde_json::from_value(value.clone())?;
        report.validate()?;

        return Ok(report);
    }

    pub fn scores(&self) -> Vec<(&'static str, u8)> {
        return vec![
            ("overall_score", self.overall_score),
            ("technical_depth", self.detailed_metrics.technical_depth),
            (
                "communication_clarity",
                self.detailed_metrics.communication_clarity,
            ),
            ("problem_solving", self.detailed_metrics.problem_solving),
            (
                "experience_relevance",
                self.detailed_metrics.experience_relevance,
            ),
        ];
    }

    pub fn validate(&self) -> Result<()> {
        for (name, score) in self.scores() {
            if score > MAX_SCORE {
                bail!(format!("{name} is {score}, expected 0-{MAX_SCORE}"));
            }
        }

        return Ok(());
    }
}

/// Written into the feedback prompt so the model knows the exact shape to
/// return.
pub fn feedback_schema() -> &'static str {
    return r#"{
  "overall_score": 0-100,
  "detailed_metrics": {
    "technical_depth": 0-100,
    "communication_clarity": 0-100,
    "problem_solving": 0-100,
    "experience_relevance": 0-100
  },
  "section_analysis": {
    "experience": "Detailed review of how they explained past projects.",
    "technical_skills": "Evaluation of their theoretical core knowledge.",
    "achievements": "Assessment of the impact/scale of their accomplishments."
  },
  "strengths": ["specific strength 1", "specific strength 2"],
  "areas_for_improvement": ["specific area 1", "specific area 2"],
  "critical_missing_points": "List specific technical details they missed or failed to explain well.",
  "hiring_verdict": "Strong Hire / Hire / Leaning No / No Hire",
  "summary": "A 3-4 sentence professional summary of the candidate's performance."
}"#;
}
