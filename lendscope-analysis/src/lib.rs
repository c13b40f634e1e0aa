//! # lendscope-analysis
//!
//! Detection engine for the Lendscope education tool.
//! Contains the cost model, manipulation severity classifier, signature
//! catalogue and matcher, detection monitor, and interaction recorder.

pub mod cost;
pub mod interactions;
pub mod monitor;
pub mod signatures;

pub use cost::classifier::{classify, ManipulationFinding};
pub use cost::model::{compute_exposure, fee_apr};
pub use cost::report::{report_exposure, ExposureReport};
pub use interactions::{BehaviorStats, InteractionRecorder};
pub use monitor::aggregator::{DetectionAggregator, DetectionSnapshot, SurfaceDirective};
pub use monitor::session::MonitorSession;
pub use signatures::catalogue::{Signature, SignatureCatalogue};
pub use signatures::matcher::PatternMatcher;
