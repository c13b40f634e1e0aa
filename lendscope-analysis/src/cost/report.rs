//! Combined APR exposure report — the host-facing output of the cost
//! pipeline.

use serde::{Deserialize, Serialize};

use lendscope_core::errors::AnalysisError;
use lendscope_core::types::detection::Severity;
use lendscope_core::types::loan::LoanTerms;

use super::classifier::classify;
use super::model::compute_exposure;

/// The combined report delivered to the reporting callback on every
/// loan-terms change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExposureReport {
    pub displayed_apr: f64,
    pub true_apr: f64,
    pub discrepancy: f64,
    pub hidden_fees: f64,
    pub total_cost: f64,
    pub manipulation_severity: Severity,
    /// The classifier's findings, in generation order.
    pub exposed_tricks: Vec<String>,
}

impl ExposureReport {
    /// Assemble the report from a computed exposure and its finding.
    pub fn from_parts(
        exposure: &lendscope_core::types::exposure::CostExposure,
        finding: super::classifier::ManipulationFinding,
    ) -> Self {
        Self {
            displayed_apr: exposure.displayed_apr,
            true_apr: exposure.true_apr,
            discrepancy: exposure.discrepancy,
            hidden_fees: exposure.total_hidden_fees,
            total_cost: exposure.total_cost,
            manipulation_severity: finding.severity,
            exposed_tricks: finding.findings,
        }
    }
}

/// Run the full cost pipeline for one set of terms: model, then
/// classifier, then the combined report.
///
/// Synchronous and complete — every field is recomputed from scratch;
/// nothing is memoized across calls.
pub fn report_exposure(terms: &LoanTerms) -> Result<ExposureReport, AnalysisError> {
    let exposure = compute_exposure(terms)?;
    let finding = classify(&exposure, terms);
    Ok(ExposureReport::from_parts(&exposure, finding))
}

#[cfg(test)]
mod tests {
    use super::*;
    use lendscope_core::types::loan::{Fee, FeeTiming};

    #[test]
    fn test_report_combines_model_and_classifier() {
        let terms = LoanTerms {
            principal: 300.0,
            term_days: 14,
            nominal_annual_rate_percent: 15.0,
            fees: vec![Fee {
                name: "express".to_string(),
                amount: 20.0,
                hidden: true,
                mandatory: false,
                timing: FeeTiming::Upfront,
            }],
        };
        let report = report_exposure(&terms).unwrap();
        assert_eq!(report.hidden_fees, 20.0);
        assert!(report.true_apr > report.displayed_apr);
        assert!(!report.exposed_tricks.is_empty());
    }

    #[test]
    fn test_report_propagates_invalid_terms() {
        assert!(report_exposure(&LoanTerms::bare(-1.0, 14, 15.0)).is_err());
    }

    #[test]
    fn test_report_serializes_for_the_host() {
        let report = report_exposure(&LoanTerms::bare(500.0, 30, 36.0)).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["manipulation_severity"], "low");
        assert!(json["exposed_tricks"].as_array().unwrap().is_empty());
    }
}
