//! Handler trait the hosting interface implements to receive detections.

use crate::types::detection::DetectionEvent;
use crate::types::exposure::CostExposure;

/// Callbacks delivered by the monitoring session. All methods default to
/// no-ops so hosts implement only what they present.
pub trait MonitorEventHandler {
    /// A new detection was recorded.
    fn on_detection(&mut self, event: &DetectionEvent) {
        let _ = event;
    }

    /// A critical detection should be auto-surfaced: expand any minimized
    /// view and select this event.
    fn on_auto_surface(&mut self, event: &DetectionEvent) {
        let _ = event;
    }

    /// A fresh cost exposure was computed for changed loan terms.
    fn on_exposure(&mut self, exposure: &CostExposure) {
        let _ = exposure;
    }
}

/// Handler that ignores everything. Useful default for headless hosts
/// and tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopHandler;

impl MonitorEventHandler for NoopHandler {}
