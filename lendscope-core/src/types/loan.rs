//! Loan terms and fee schedule — the input side of the cost model.

use serde::{Deserialize, Serialize};

/// When a fee is collected over the life of the loan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeeTiming {
    /// Collected at origination.
    Upfront,
    /// Collected across the term (per payment, per period).
    Ongoing,
    /// Collected at payoff. Back-end fees artificially lower displayed APR.
    End,
}

/// A single fee on the schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fee {
    /// Lender-facing fee name (e.g. "processing", "express").
    pub name: String,
    /// Dollar amount. Negative amounts are a domain error in the cost model.
    pub amount: f64,
    /// Whether the lender excludes this fee from the displayed APR.
    pub hidden: bool,
    /// Whether the lender presents this fee as required.
    pub mandatory: bool,
    /// When the fee is collected.
    pub timing: FeeTiming,
}

impl Fee {
    /// Convenience constructor for an upfront, mandatory, visible fee.
    pub fn upfront(name: impl Into<String>, amount: f64) -> Self {
        Self {
            name: name.into(),
            amount,
            hidden: false,
            mandatory: true,
            timing: FeeTiming::Upfront,
        }
    }
}

/// Nominal terms of a loan offer, immutable per calculation.
///
/// No validation happens at construction; the cost model validates on
/// every call so error reporting stays in one place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanTerms {
    /// Amount borrowed, in dollars. Must be > 0.
    pub principal: f64,
    /// Term length in days. Must be > 0.
    pub term_days: u32,
    /// Nominal annual interest rate as a percentage (15.0 = 15%).
    pub nominal_annual_rate_percent: f64,
    /// Ordered fee schedule.
    pub fees: Vec<Fee>,
}

impl LoanTerms {
    /// Terms with no fees attached.
    pub fn bare(principal: f64, term_days: u32, rate_percent: f64) -> Self {
        Self {
            principal,
            term_days,
            nominal_annual_rate_percent: rate_percent,
            fees: Vec::new(),
        }
    }
}
