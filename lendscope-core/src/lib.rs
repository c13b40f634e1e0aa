//! # lendscope-core
//!
//! Foundation crate for the Lendscope detection core.
//! Defines all types, errors, config, and event handler traits.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod errors;
pub mod events;
pub mod types;

// Re-export the most commonly used types at the crate root.
pub use config::MonitorConfig;
pub use errors::error_code::LendscopeErrorCode;
pub use errors::{AnalysisError, InteractionError};
pub use events::handler::MonitorEventHandler;
pub use types::collections::FxHashSet;
pub use types::detection::{
    DetectionCategory, DetectionEvent, DetectionStats, Explanation, Severity,
};
pub use types::exposure::CostExposure;
pub use types::interaction::{EducationalInteraction, InteractionAction};
pub use types::loan::{Fee, FeeTiming, LoanTerms};
pub use types::node::{NodeRole, RenderedNode};
