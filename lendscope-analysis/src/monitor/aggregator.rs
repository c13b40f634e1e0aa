//! Detection aggregator — capped history plus cumulative statistics.
//!
//! History shows the most recent detections, newest first, truncated to
//! the configured cap. Statistics are lifetime counts: eviction from the
//! visible history never decrements them, and the snapshot exposes both
//! side by side.

use serde::{Deserialize, Serialize};

use lendscope_core::config::MonitorConfig;
use lendscope_core::types::detection::{DetectionCategory, DetectionEvent, DetectionStats, Severity};

/// Directive asking the host to un-minimize its view and select the
/// named event. Emitted for critical detections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurfaceDirective {
    /// Id of the event to select.
    pub event_id: u64,
}

/// Read-only view of history plus stats, refreshed on every detection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionSnapshot {
    /// Most recent events, newest first, at most the history cap.
    pub history: Vec<DetectionEvent>,
    /// Lifetime statistics, independent of history truncation.
    pub stats: DetectionStats,
}

/// Accumulates detection events for one monitoring session.
#[derive(Debug)]
pub struct DetectionAggregator {
    history: Vec<DetectionEvent>,
    stats: DetectionStats,
    history_cap: usize,
    critical_delta: u32,
    high_delta: u32,
    base_delta: u32,
    auto_surface: bool,
}

impl DetectionAggregator {
    /// Aggregator with the given configuration.
    pub fn new(config: &MonitorConfig) -> Self {
        Self {
            history: Vec::new(),
            stats: DetectionStats::default(),
            history_cap: config.effective_history_cap(),
            critical_delta: config.effective_critical_delta(),
            high_delta: config.effective_high_delta(),
            base_delta: config.effective_base_delta(),
            auto_surface: config.effective_auto_surface(),
        }
    }

    /// Record one event: prepend to history, truncate to the cap, and
    /// fold it into the cumulative statistics. Returns a surface
    /// directive when the event is critical and auto-surfacing is on.
    pub fn record(&mut self, event: DetectionEvent) -> Option<SurfaceDirective> {
        let directive = (event.severity == Severity::Critical && self.auto_surface)
            .then_some(SurfaceDirective { event_id: event.id });

        self.stats.total_count += 1;
        if event.severity == Severity::Critical {
            self.stats.critical_count += 1;
        }
        if event.category == DetectionCategory::HiddenCost {
            self.stats.hidden_cost_count += 1;
        }
        if event.category == DetectionCategory::Manipulation {
            self.stats.manipulation_count += 1;
        }
        let delta = match event.severity {
            Severity::Critical => self.critical_delta,
            Severity::High => self.high_delta,
            _ => self.base_delta,
        };
        self.stats.vulnerability_score = (self.stats.vulnerability_score + delta).min(100);

        self.history.insert(0, event);
        self.history.truncate(self.history_cap);

        directive
    }

    /// Current history + stats view.
    pub fn snapshot(&self) -> DetectionSnapshot {
        DetectionSnapshot {
            history: self.history.clone(),
            stats: self.stats,
        }
    }

    /// Lifetime statistics.
    pub fn stats(&self) -> DetectionStats {
        self.stats
    }

    /// Number of events currently visible in history.
    pub fn history_len(&self) -> usize {
        self.history.len()
    }
}
