//! Host-boundary view of a rendered interface element.
//!
//! The concrete tree-mutation mechanism lives in the hosting interface;
//! the core only needs "a node appeared" plus its stable identity, its
//! structural role, and its visible text.

use serde::{Deserialize, Serialize};

/// Structural role of a rendered element, as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeRole {
    /// Fee amounts and fee labels.
    FeeDisplay,
    /// Legal/terms-and-conditions blocks.
    LegalText,
    /// Payment/debit schedule blocks.
    PaymentSchedule,
    /// Countdown or timer widgets.
    Timer,
    /// Anything else.
    Generic,
}

/// A newly rendered element delivered by the host's mutation feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedNode {
    /// Stable identity of the element for the life of the observation
    /// session. Keys the visited set that makes detection idempotent.
    pub id: u64,
    /// Structural role.
    pub role: NodeRole,
    /// Visible text content.
    pub text: String,
}

impl RenderedNode {
    /// Construct a node view.
    pub fn new(id: u64, role: NodeRole, text: impl Into<String>) -> Self {
        Self {
            id,
            role,
            text: text.into(),
        }
    }
}
