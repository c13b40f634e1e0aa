//! Detection monitoring: aggregation, session lifecycle, and the
//! behavior-statistics ticker.

pub mod aggregator;
pub mod session;
