//! Stable string error codes.
//!
//! Codes are part of the host-facing contract and never change once
//! shipped; display messages may.

/// Principal was zero or negative.
pub const INVALID_PRINCIPAL: &str = "COST_INVALID_PRINCIPAL";
/// Term length was zero.
pub const INVALID_TERM_DAYS: &str = "COST_INVALID_TERM_DAYS";
/// A fee carried a negative amount.
pub const NEGATIVE_FEE_AMOUNT: &str = "COST_NEGATIVE_FEE_AMOUNT";
/// Interaction action outside the known enum.
pub const UNKNOWN_ACTION: &str = "INTERACTION_UNKNOWN_ACTION";

/// Maps every error variant to its stable string code.
pub trait LendscopeErrorCode {
    /// The stable code for this error.
    fn error_code(&self) -> &'static str;
}
