//! Educational interaction records.

use serde::{Deserialize, Serialize};

/// How the user engaged with a surfaced finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionAction {
    Viewed,
    Dismissed,
    LearnedMore,
    TookAction,
}

impl InteractionAction {
    /// Action name as a string.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Viewed => "viewed",
            Self::Dismissed => "dismissed",
            Self::LearnedMore => "learned_more",
            Self::TookAction => "took_action",
        }
    }

    /// Parse from string. Anything outside the known set is rejected at
    /// the recorder boundary.
    pub fn parse_str(s: &str) -> Option<Self> {
        match s {
            "viewed" => Some(Self::Viewed),
            "dismissed" => Some(Self::Dismissed),
            "learned_more" => Some(Self::LearnedMore),
            "took_action" => Some(Self::TookAction),
            _ => None,
        }
    }
}

/// One recorded engagement with a surfaced finding. Pure record,
/// appended to the session log and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EducationalInteraction {
    /// Recording time, unix milliseconds.
    pub timestamp_ms: u64,
    /// Id of the finding (or lesson) the user engaged with.
    pub subject_id: String,
    /// What the user did.
    pub action: InteractionAction,
    /// Optional quiz/comprehension score in [0, 100].
    pub comprehension_score: Option<f64>,
}
