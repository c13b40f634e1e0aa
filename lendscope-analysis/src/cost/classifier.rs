//! Manipulation severity classifier.
//!
//! Maps a cost exposure plus the fee schedule to a severity tier and a
//! list of human-readable manipulation findings. Stateless; recomputed
//! in full on every terms change.

use serde::{Deserialize, Serialize};

use lendscope_core::types::detection::Severity;
use lendscope_core::types::exposure::CostExposure;
use lendscope_core::types::loan::{FeeTiming, LoanTerms};

/// Severity tier plus the ordered findings that justify it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManipulationFinding {
    /// Most severe tier any threshold reached.
    pub severity: Severity,
    /// Natural-language findings, in generation order. Conditions are
    /// independent; several can fire for the same terms.
    pub findings: Vec<String>,
}

/// Tier thresholds. `true_apr` and `discrepancy` are evaluated
/// independently; the most severe tier either reaches wins.
fn tier(exposure: &CostExposure) -> Severity {
    if exposure.true_apr > 500.0 || exposure.discrepancy > 100.0 {
        Severity::Critical
    } else if exposure.true_apr > 300.0 || exposure.discrepancy > 50.0 {
        Severity::High
    } else if exposure.true_apr > 200.0 || exposure.discrepancy > 25.0 {
        Severity::Medium
    } else {
        Severity::Low
    }
}

/// Classify an exposure against its originating terms.
pub fn classify(exposure: &CostExposure, terms: &LoanTerms) -> ManipulationFinding {
    let mut findings = Vec::new();

    if exposure.total_hidden_fees > 0.0 {
        findings.push(format!(
            "hidden fees of ${:.2} not included in displayed APR",
            exposure.total_hidden_fees
        ));
    }

    if exposure.discrepancy > 50.0 {
        findings.push(format!(
            "true APR is {:.2}% higher than displayed",
            exposure.discrepancy
        ));
    }

    if exposure.true_apr > 400.0 {
        findings.push("true APR exceeds usury thresholds in most states".to_string());
    }

    let back_end_fees: f64 = terms
        .fees
        .iter()
        .filter(|f| f.timing == FeeTiming::End)
        .map(|f| f.amount)
        .sum();
    if back_end_fees > 0.10 * terms.principal {
        findings.push("back-end fees artificially lower displayed APR".to_string());
    }

    let sham_optional = terms
        .fees
        .iter()
        .filter(|f| !f.mandatory && f.amount > 0.0)
        .count();
    if sham_optional > 0 {
        findings.push(format!(
            "{sham_optional} 'optional' fees are actually required"
        ));
    }

    let has_express_fee = terms
        .fees
        .iter()
        .any(|f| f.name.to_lowercase().contains("express") && f.amount > 50.0);
    if has_express_fee {
        findings.push("express processing fee for instant digital processing".to_string());
    }

    ManipulationFinding {
        severity: tier(exposure),
        findings,
    }
}
