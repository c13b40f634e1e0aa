//! Shared type definitions for the detection core.

pub mod collections;
pub mod detection;
pub mod exposure;
pub mod interaction;
pub mod loan;
pub mod node;
