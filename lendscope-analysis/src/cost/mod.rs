//! Cost transparency: the pure cost model, the manipulation severity
//! classifier, and the combined exposure report.

pub mod classifier;
pub mod model;
pub mod report;
