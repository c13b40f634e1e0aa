//! Property-based tests for the cost model and classifier invariants.
//!
//! For every valid set of terms:
//! 1. `true_apr >= displayed_apr` whenever all fees are non-negative.
//! 2. Equality holds exactly when no fee is hidden.
//! 3. Severity is monotonic in `true_apr` and in `discrepancy`.

use proptest::prelude::*;

use lendscope_analysis::cost::classifier::classify;
use lendscope_analysis::cost::model::compute_exposure;
use lendscope_core::types::exposure::CostExposure;
use lendscope_core::types::loan::{Fee, FeeTiming, LoanTerms};

fn fee_strategy() -> impl Strategy<Value = Fee> {
    (
        "[a-z]{1,8}",
        0.0f64..500.0,
        any::<bool>(),
        any::<bool>(),
        prop_oneof![
            Just(FeeTiming::Upfront),
            Just(FeeTiming::Ongoing),
            Just(FeeTiming::End),
        ],
    )
        .prop_map(|(name, amount, hidden, mandatory, timing)| Fee {
            name,
            amount,
            hidden,
            mandatory,
            timing,
        })
}

fn terms_strategy() -> impl Strategy<Value = LoanTerms> {
    (
        1.0f64..10_000.0,
        1u32..730,
        0.0f64..600.0,
        prop::collection::vec(fee_strategy(), 0..6),
    )
        .prop_map(|(principal, term_days, rate, fees)| LoanTerms {
            principal,
            term_days,
            nominal_annual_rate_percent: rate,
            fees,
        })
}

fn exposure_with(true_apr: f64, discrepancy: f64) -> CostExposure {
    CostExposure {
        displayed_apr: true_apr - discrepancy,
        true_apr,
        discrepancy,
        displayed_finance_charge: 0.0,
        true_finance_charge: 0.0,
        total_cost: 0.0,
        total_hidden_fees: 0.0,
        payback_ratio: 0.0,
    }
}

proptest! {
    #[test]
    fn true_apr_never_below_displayed(terms in terms_strategy()) {
        let exposure = compute_exposure(&terms).unwrap();
        prop_assert!(exposure.true_apr >= exposure.displayed_apr);
        prop_assert!(exposure.discrepancy >= 0.0);
    }

    #[test]
    fn no_hidden_fees_means_equality(terms in terms_strategy()) {
        let mut terms = terms;
        for fee in &mut terms.fees {
            fee.hidden = false;
        }
        let exposure = compute_exposure(&terms).unwrap();
        prop_assert_eq!(exposure.true_apr, exposure.displayed_apr);
        prop_assert_eq!(exposure.discrepancy, 0.0);
        prop_assert_eq!(exposure.total_hidden_fees, 0.0);
    }

    #[test]
    fn payback_ratio_at_least_one(terms in terms_strategy()) {
        let exposure = compute_exposure(&terms).unwrap();
        prop_assert!(exposure.payback_ratio >= 1.0);
        prop_assert!(exposure.total_cost >= terms.principal - 0.01);
    }

    #[test]
    fn severity_monotonic_in_true_apr(
        apr_low in 0.0f64..1_000.0,
        apr_bump in 0.0f64..1_000.0,
        discrepancy in 0.0f64..200.0,
    ) {
        let terms = LoanTerms::bare(1_000.0, 30, 0.0);
        let low = classify(&exposure_with(apr_low, discrepancy), &terms);
        let high = classify(&exposure_with(apr_low + apr_bump, discrepancy), &terms);
        prop_assert!(high.severity >= low.severity);
    }

    #[test]
    fn severity_monotonic_in_discrepancy(
        true_apr in 0.0f64..1_000.0,
        disc_low in 0.0f64..200.0,
        disc_bump in 0.0f64..200.0,
    ) {
        let terms = LoanTerms::bare(1_000.0, 30, 0.0);
        let low = classify(&exposure_with(true_apr, disc_low), &terms);
        let high = classify(&exposure_with(true_apr, disc_low + disc_bump), &terms);
        prop_assert!(high.severity >= low.severity);
    }
}
