#[cfg(test)]
#[path = "stage_test.rs"]
mod tests;

use strum::EnumIter;

/// Interview phases in the order they are visited.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, strum::Display)]
pub enum Stage {
    #[strum(serialize = "INTRODUCTION")]
    Introduction,
    #[strum(serialize = "EXPERIENCE")]
    Experience,
    #[strum(serialize = "SKILLS")]
    Skills,
    #[strum(serialize = "ACHIEVEMENTS")]
    Achievements,
    #[strum(serialize = "GENERAL/SYSTEM DESIGN")]
    GeneralDesign,
    #[strum(serialize = "CONCLUDED")]
    Concluded,
}

pub struct StageRule {
    pub min_turn: usize,
    pub max_turn: usize,
    pub stage: Stage,
    pub goal: &'static str,
}

/// Ordered, contiguous from turn 0. Any turn past the last rule is concluded.
pub static STAGE_TABLE: [StageRule; 5] = [
    StageRule {
        min_turn: 0,
        max_turn: 0,
        stage: Stage::Introduction,
        goal: "Briefly welcome the candidate. Ask for a short intro and their core tech stack.",
    },
    StageRule {
        min_turn: 1,
        max_turn: 3,
        stage: Stage::Experience,
        goal: "Pick a specific role/project from the resume. Ask about implementation details, trade-offs, or a challenge. DO NOT repeat a topic discussed in previous turns.",
    },
    StageRule {
        min_turn: 4,
        max_turn: 6,
        stage: Stage::Skills,
        goal: "Identify a technical skill (React, Node, SQL, etc.) from the resume. Ask a 'how it works internally' theory question.",
    },
    StageRule {
        min_turn: 7,
        max_turn: 9,
        stage: Stage::Achievements,
        goal: "Ask about a specific Rank, Award, or Hackathon win. Ask about the hardest technical hurdle faced to achieve it.",
    },
    StageRule {
        min_turn: 10,
        max_turn: 11,
        stage: Stage::GeneralDesign,
        goal: "Ask a behavioral question or a system design question related to their background.",
    },
];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StagePlan {
    pub stage: Stage,
    pub goal: String,
}

impl StagePlan {
    pub fn is_concluded(&self) -> bool {
        return self.stage == Stage::Concluded;
    }
}

pub fn select_stage(turn: usize) -> StagePlan {
    if let Some(rule) = STAGE_TABLE
        .iter()
        .find(|rule| return rule.min_turn <= turn && turn <= rule.max_turn)
    {
        return StagePlan {
            stage: rule.stage,
            goal: rule.goal.to_string(),
        };
    }

    return StagePlan {
        stage: Stage::Concluded,
        goal: "".to_string(),
    };
}

/// Number of turns the interviewer asks questions for.
pub fn total_turns() -> usize {
    return STAGE_TABLE
        .iter()
        .map(|rule| return rule.max_turn + 1)
        .max()
        .unwrap_or(0);
}
