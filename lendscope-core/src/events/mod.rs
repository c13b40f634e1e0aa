//! Event handler traits connecting the core to the hosting interface.

pub mod handler;

pub use handler::MonitorEventHandler;
