//! User-interaction recording and derived behavior statistics.

pub mod recorder;

pub use recorder::{BehaviorStats, InteractionRecorder};
