//! Deceptive-construct signatures and the matcher that scans rendered
//! nodes against them.

pub mod catalogue;
pub mod matcher;
