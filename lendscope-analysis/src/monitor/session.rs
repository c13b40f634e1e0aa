//! Monitoring session — the explicit process-scoped handle the hosting
//! interface owns.
//!
//! Created when monitoring starts, torn down when it stops. Owns the
//! pattern matcher, the aggregator, and the interaction log, and drives
//! the optional behavior-statistics ticker. After `stop()` the session
//! ignores further mutations (clean unsubscribe); the ticker is always
//! cancelled on stop and on drop.

use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;

use crossbeam_channel::{bounded, select, tick, Sender};

use lendscope_core::config::MonitorConfig;
use lendscope_core::errors::{AnalysisError, InteractionError};
use lendscope_core::events::MonitorEventHandler;
use lendscope_core::types::interaction::EducationalInteraction;
use lendscope_core::types::loan::LoanTerms;
use lendscope_core::types::node::RenderedNode;

use crate::cost::classifier::classify;
use crate::cost::model::compute_exposure;
use crate::cost::report::ExposureReport;
use crate::interactions::{BehaviorStats, InteractionRecorder};
use crate::signatures::catalogue::SignatureCatalogue;
use crate::signatures::matcher::PatternMatcher;

use super::aggregator::{DetectionAggregator, DetectionSnapshot};

/// Periodic re-derivation of behavior statistics on a dedicated thread.
/// Cancelled through the stop channel; `Drop` joins the thread so no
/// timer outlives its session.
struct BehaviorTicker {
    stop_tx: Sender<()>,
    handle: Option<JoinHandle<()>>,
}

impl BehaviorTicker {
    fn start(
        interval: Duration,
        recorder: Arc<Mutex<InteractionRecorder>>,
        stats: Arc<Mutex<BehaviorStats>>,
    ) -> Self {
        let (stop_tx, stop_rx) = bounded::<()>(1);
        let ticks = tick(interval);
        let handle = std::thread::spawn(move || loop {
            select! {
                recv(ticks) -> _ => {
                    let derived = recorder
                        .lock()
                        .map(|r| r.behavior_stats())
                        .unwrap_or_default();
                    if let Ok(mut cell) = stats.lock() {
                        *cell = derived;
                    }
                }
                recv(stop_rx) -> _ => break,
            }
        });
        Self {
            stop_tx,
            handle: Some(handle),
        }
    }

    fn stop(&mut self) {
        let _ = self.stop_tx.try_send(());
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for BehaviorTicker {
    fn drop(&mut self) {
        self.stop();
    }
}

/// One observation session over a rendered lending interface.
pub struct MonitorSession {
    config: MonitorConfig,
    matcher: PatternMatcher,
    aggregator: DetectionAggregator,
    recorder: Arc<Mutex<InteractionRecorder>>,
    ticked_stats: Arc<Mutex<BehaviorStats>>,
    ticker: Option<BehaviorTicker>,
    stopped: bool,
}

impl MonitorSession {
    /// Start a session with the given configuration. The signature
    /// catalogue is the built-in table plus any config extras.
    pub fn new(config: MonitorConfig) -> Self {
        let catalogue = SignatureCatalogue::from_config(&config);
        Self::with_catalogue(config, catalogue)
    }

    /// Start a session with an explicit catalogue.
    pub fn with_catalogue(config: MonitorConfig, catalogue: SignatureCatalogue) -> Self {
        Self {
            matcher: PatternMatcher::new(catalogue),
            aggregator: DetectionAggregator::new(&config),
            recorder: Arc::new(Mutex::new(InteractionRecorder::new())),
            ticked_stats: Arc::new(Mutex::new(BehaviorStats::default())),
            ticker: None,
            stopped: false,
            config,
        }
    }

    /// Spawn the periodic behavior-statistics ticker. No-op if it is
    /// already running or the session is stopped. Hosts that prefer to
    /// poll [`MonitorSession::behavior_stats`] never need to call this.
    pub fn start_behavior_ticker(&mut self) {
        if self.ticker.is_some() || self.stopped {
            return;
        }
        let interval = Duration::from_millis(self.config.effective_behavior_tick_ms());
        self.ticker = Some(BehaviorTicker::start(
            interval,
            Arc::clone(&self.recorder),
            Arc::clone(&self.ticked_stats),
        ));
    }

    /// Process a batch of newly rendered nodes from the host's mutation
    /// feed: scan, aggregate, and notify the handler. Critical events
    /// additionally fire `on_auto_surface`. Returns the refreshed
    /// snapshot. After `stop()` this is a no-op returning the final
    /// snapshot.
    pub fn observe(
        &mut self,
        nodes: &[RenderedNode],
        handler: &mut dyn MonitorEventHandler,
    ) -> DetectionSnapshot {
        if self.stopped {
            return self.aggregator.snapshot();
        }
        let events = self.matcher.scan(nodes);
        for event in events {
            handler.on_detection(&event);
            let directive = self.aggregator.record(event.clone());
            if directive.is_some() {
                handler.on_auto_surface(&event);
            }
        }
        self.aggregator.snapshot()
    }

    /// Handle a loan-terms change: synchronously recompute the full cost
    /// exposure and classification, notify the handler, and return the
    /// combined report. Nothing is memoized across calls.
    pub fn loan_terms_changed(
        &mut self,
        terms: &LoanTerms,
        handler: &mut dyn MonitorEventHandler,
    ) -> Result<ExposureReport, AnalysisError> {
        let exposure = compute_exposure(terms)?;
        handler.on_exposure(&exposure);
        let finding = classify(&exposure, terms);
        Ok(ExposureReport::from_parts(&exposure, finding))
    }

    /// Forward a user action to the interaction recorder.
    pub fn record_interaction(
        &mut self,
        subject_id: &str,
        action: &str,
        comprehension_score: Option<f64>,
    ) -> Result<EducationalInteraction, InteractionError> {
        let mut recorder = self
            .recorder
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        recorder.record(subject_id, action, comprehension_score)
    }

    /// Current history + stats snapshot.
    pub fn snapshot(&self) -> DetectionSnapshot {
        self.aggregator.snapshot()
    }

    /// Behavior statistics recomputed synchronously from the log.
    pub fn behavior_stats(&self) -> BehaviorStats {
        self.recorder
            .lock()
            .map(|r| r.behavior_stats())
            .unwrap_or_default()
    }

    /// The statistics most recently derived by the ticker.
    pub fn ticked_behavior_stats(&self) -> BehaviorStats {
        self.ticked_stats.lock().map(|s| *s).unwrap_or_default()
    }

    /// Stop observing: cancel the ticker and ignore all further
    /// mutations. Idempotent.
    pub fn stop(&mut self) {
        if let Some(mut ticker) = self.ticker.take() {
            ticker.stop();
        }
        self.stopped = true;
    }

    /// Whether the session has been stopped.
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }
}

impl Drop for MonitorSession {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lendscope_core::events::handler::NoopHandler;
    use lendscope_core::types::detection::{DetectionEvent, Severity};
    use lendscope_core::types::node::NodeRole;

    /// Handler that records which callbacks fired.
    #[derive(Default)]
    struct SpyHandler {
        detections: Vec<DetectionEvent>,
        surfaced: Vec<u64>,
        exposures: usize,
    }

    impl MonitorEventHandler for SpyHandler {
        fn on_detection(&mut self, event: &DetectionEvent) {
            self.detections.push(event.clone());
        }
        fn on_auto_surface(&mut self, event: &DetectionEvent) {
            self.surfaced.push(event.id);
        }
        fn on_exposure(&mut self, _exposure: &lendscope_core::CostExposure) {
            self.exposures += 1;
        }
    }

    #[test]
    fn test_observe_scans_and_aggregates() {
        let mut session = MonitorSession::new(MonitorConfig::default());
        let mut handler = SpyHandler::default();
        let snapshot = session.observe(
            &[
                RenderedNode::new(1, NodeRole::Timer, "offer ends soon"),
                RenderedNode::new(2, NodeRole::FeeDisplay, "just a small tip"),
            ],
            &mut handler,
        );
        assert_eq!(snapshot.history.len(), 2);
        assert_eq!(snapshot.stats.total_count, 2);
        assert_eq!(handler.detections.len(), 2);
        // The disguised-fee event is critical and auto-surfaces.
        assert_eq!(handler.surfaced.len(), 1);
        let surfaced = handler
            .detections
            .iter()
            .find(|e| e.id == handler.surfaced[0])
            .unwrap();
        assert_eq!(surfaced.severity, Severity::Critical);
    }

    #[test]
    fn test_observe_is_idempotent_per_node() {
        let mut session = MonitorSession::new(MonitorConfig::default());
        let mut handler = NoopHandler;
        let node = RenderedNode::new(5, NodeRole::Timer, "countdown running");
        session.observe(std::slice::from_ref(&node), &mut handler);
        let snapshot = session.observe(&[node], &mut handler);
        assert_eq!(snapshot.stats.total_count, 1);
    }

    #[test]
    fn test_stop_unsubscribes() {
        let mut session = MonitorSession::new(MonitorConfig::default());
        let mut handler = NoopHandler;
        session.stop();
        assert!(session.is_stopped());
        let snapshot = session.observe(
            &[RenderedNode::new(1, NodeRole::Timer, "countdown")],
            &mut handler,
        );
        assert_eq!(snapshot.stats.total_count, 0);
    }

    #[test]
    fn test_loan_terms_changed_reports() {
        let mut session = MonitorSession::new(MonitorConfig::default());
        let mut handler = SpyHandler::default();
        let report = session
            .loan_terms_changed(&LoanTerms::bare(300.0, 14, 400.0), &mut handler)
            .unwrap();
        assert_eq!(handler.exposures, 1);
        assert_eq!(report.true_apr, 400.0);
        assert_eq!(report.manipulation_severity, Severity::High);
    }

    #[test]
    fn test_interactions_flow_to_behavior_stats() {
        let mut session = MonitorSession::new(MonitorConfig::default());
        session
            .record_interaction("disguised-fee", "learned_more", Some(90.0))
            .unwrap();
        assert!(session.record_interaction("x", "shrugged", None).is_err());
        let stats = session.behavior_stats();
        assert_eq!(stats.learned_more, 1);
        assert_eq!(stats.mean_comprehension, Some(90.0));
    }

    #[test]
    fn test_ticker_stops_on_drop() {
        let config = MonitorConfig {
            behavior_tick_ms: Some(10),
            ..MonitorConfig::default()
        };
        let mut session = MonitorSession::new(config);
        session.start_behavior_ticker();
        session
            .record_interaction("urgency-timer", "viewed", None)
            .unwrap();
        std::thread::sleep(Duration::from_millis(50));
        assert_eq!(session.ticked_behavior_stats().viewed, 1);
        // stop() joins the ticker thread; dropping afterwards is a no-op.
        session.stop();
    }
}
