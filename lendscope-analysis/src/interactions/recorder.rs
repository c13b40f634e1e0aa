//! Interaction recorder — validated append-only engagement log.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use lendscope_core::errors::InteractionError;
use lendscope_core::types::interaction::{EducationalInteraction, InteractionAction};

/// Current unix time in milliseconds.
fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Behavior statistics re-derived from the accumulated interaction log.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BehaviorStats {
    pub viewed: u32,
    pub dismissed: u32,
    pub learned_more: u32,
    pub took_action: u32,
    /// Share of interactions that went beyond viewing/dismissing.
    pub engagement_rate: f64,
    /// Mean of recorded comprehension scores, if any were recorded.
    pub mean_comprehension: Option<f64>,
}

/// Append-only log of user engagement with surfaced findings.
///
/// The only validation is membership in the known action enum; an
/// unknown action is rejected at the boundary and nothing is recorded.
#[derive(Debug, Default)]
pub struct InteractionRecorder {
    log: Vec<EducationalInteraction>,
}

impl InteractionRecorder {
    /// An empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an engagement given the host's string action name.
    pub fn record(
        &mut self,
        subject_id: &str,
        action: &str,
        comprehension_score: Option<f64>,
    ) -> Result<EducationalInteraction, InteractionError> {
        let action = InteractionAction::parse_str(action).ok_or_else(|| {
            InteractionError::UnknownAction {
                action: action.to_string(),
            }
        })?;
        Ok(self.record_action(subject_id, action, comprehension_score))
    }

    /// Record an engagement with an already-typed action.
    pub fn record_action(
        &mut self,
        subject_id: &str,
        action: InteractionAction,
        comprehension_score: Option<f64>,
    ) -> EducationalInteraction {
        let interaction = EducationalInteraction {
            timestamp_ms: now_ms(),
            subject_id: subject_id.to_string(),
            action,
            comprehension_score,
        };
        self.log.push(interaction.clone());
        interaction
    }

    /// The full log, in recording order.
    pub fn log(&self) -> &[EducationalInteraction] {
        &self.log
    }

    /// Number of recorded interactions.
    pub fn len(&self) -> usize {
        self.log.len()
    }

    /// Whether anything has been recorded.
    pub fn is_empty(&self) -> bool {
        self.log.is_empty()
    }

    /// Re-derive behavior statistics from the accumulated log. Pure with
    /// respect to the log; called by the periodic ticker and on demand.
    pub fn behavior_stats(&self) -> BehaviorStats {
        let mut stats = BehaviorStats::default();
        let mut score_sum = 0.0;
        let mut score_count = 0u32;
        for interaction in &self.log {
            match interaction.action {
                InteractionAction::Viewed => stats.viewed += 1,
                InteractionAction::Dismissed => stats.dismissed += 1,
                InteractionAction::LearnedMore => stats.learned_more += 1,
                InteractionAction::TookAction => stats.took_action += 1,
            }
            if let Some(score) = interaction.comprehension_score {
                score_sum += score;
                score_count += 1;
            }
        }
        let total = self.log.len() as f64;
        if total > 0.0 {
            stats.engagement_rate = f64::from(stats.learned_more + stats.took_action) / total;
        }
        if score_count > 0 {
            stats.mean_comprehension = Some(score_sum / f64::from(score_count));
        }
        stats
    }
}
