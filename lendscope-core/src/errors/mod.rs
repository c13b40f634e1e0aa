//! Error types for the detection core.

pub mod error_code;

pub use error_code::LendscopeErrorCode;

/// Errors from the cost model and classifier.
///
/// Financial computations have no recoverable-but-partial states: they
/// either fully succeed or fail with one of these, and no partial result
/// is ever returned.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("Invalid principal {principal}: must be > 0")]
    InvalidPrincipal { principal: f64 },

    #[error("Invalid term of {term_days} days: must be > 0")]
    InvalidTermDays { term_days: u32 },

    #[error("Negative amount {amount} on fee '{name}'")]
    NegativeFeeAmount { name: String, amount: f64 },
}

impl LendscopeErrorCode for AnalysisError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidPrincipal { .. } => error_code::INVALID_PRINCIPAL,
            Self::InvalidTermDays { .. } => error_code::INVALID_TERM_DAYS,
            Self::NegativeFeeAmount { .. } => error_code::NEGATIVE_FEE_AMOUNT,
        }
    }
}

/// Errors from the interaction recorder.
#[derive(Debug, thiserror::Error)]
pub enum InteractionError {
    #[error("Unknown interaction action '{action}'")]
    UnknownAction { action: String },
}

impl LendscopeErrorCode for InteractionError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownAction { .. } => error_code::UNKNOWN_ACTION,
        }
    }
}
