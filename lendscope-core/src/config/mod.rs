//! Configuration for the detection core.

pub mod monitor_config;

pub use monitor_config::{KeywordSignatureConfig, MonitorConfig};
