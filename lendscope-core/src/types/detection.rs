//! Detection events, categories, severity, and cumulative statistics.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// The four manipulation categories a signature can report under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectionCategory {
    /// Interface construct designed to manipulate rather than inform.
    DarkPattern,
    /// Coercive or misleading payment mechanics.
    Manipulation,
    /// Language waiving legal rights or protections.
    LegalViolation,
    /// Cost concealed from the displayed price of the loan.
    HiddenCost,
}

impl DetectionCategory {
    /// All four categories, in reporting order.
    pub fn all() -> &'static [DetectionCategory] {
        &[
            Self::DarkPattern,
            Self::Manipulation,
            Self::LegalViolation,
            Self::HiddenCost,
        ]
    }

    /// Category name as a string.
    pub fn name(&self) -> &'static str {
        match self {
            Self::DarkPattern => "dark_pattern",
            Self::Manipulation => "manipulation",
            Self::LegalViolation => "legal_violation",
            Self::HiddenCost => "hidden_cost",
        }
    }

    /// Parse from string.
    pub fn parse_str(s: &str) -> Option<Self> {
        match s {
            "dark_pattern" => Some(Self::DarkPattern),
            "manipulation" => Some(Self::Manipulation),
            "legal_violation" => Some(Self::LegalViolation),
            "hidden_cost" => Some(Self::HiddenCost),
            _ => None,
        }
    }
}

/// Detection severity, ordered least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    /// Severity name as a string.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }

    /// Parse from string.
    pub fn parse_str(s: &str) -> Option<Self> {
        match s {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            "critical" => Some(Self::Critical),
            _ => None,
        }
    }
}

/// The user-facing explanation triplet attached to every detection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Explanation {
    /// What the interface is doing.
    pub whats_happening: String,
    /// Why the user should care.
    pub why_it_matters: String,
    /// What the user can do about it.
    pub how_to_protect: String,
}

/// One detection result — immutable after creation.
///
/// Created exactly once per matched interface element; a matched element
/// can never produce a second event. Retained in a capped history and
/// eventually evicted oldest-first, which does not touch [`DetectionStats`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionEvent {
    /// Unique id, monotonically increasing per session.
    pub id: u64,
    /// Id of the catalogue signature that matched.
    pub signature_id: String,
    /// Manipulation category.
    pub category: DetectionCategory,
    /// Severity tier.
    pub severity: Severity,
    /// Human-readable signature name.
    pub name: String,
    /// One-line description of the construct.
    pub description: String,
    /// Keywords from the signature that were present in the node text.
    pub keyword_hits: SmallVec<[String; 2]>,
    /// User-facing explanation triplet.
    pub explanation: Explanation,
    /// Creation time, unix milliseconds.
    pub detected_at_ms: u64,
}

/// Cumulative detection statistics for a monitoring session.
///
/// Monotonically adjusted, never reset while the session runs, and
/// independent of history eviction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectionStats {
    /// Lifetime number of detections.
    pub total_count: u32,
    /// Lifetime number of critical detections.
    pub critical_count: u32,
    /// Lifetime number of hidden-cost detections.
    pub hidden_cost_count: u32,
    /// Lifetime number of manipulation detections.
    pub manipulation_count: u32,
    /// Bounded cumulative exposure indicator, clamped to [0, 100].
    pub vulnerability_score: u32,
}
