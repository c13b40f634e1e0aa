//! Pure cost model — displayed vs. true annualized cost.
//!
//! Recomputes everything from the terms on every call. There is no
//! incremental state; purity keeps the model trivially testable.

use lendscope_core::errors::AnalysisError;
use lendscope_core::types::exposure::CostExposure;
use lendscope_core::types::loan::{Fee, LoanTerms};

/// Round to 2 decimal places. Applied independently to every output
/// field at the return boundary; internal math stays unrounded.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Reject terms the arithmetic cannot meaningfully handle.
fn validate(terms: &LoanTerms) -> Result<(), AnalysisError> {
    if terms.principal <= 0.0 {
        return Err(AnalysisError::InvalidPrincipal {
            principal: terms.principal,
        });
    }
    if terms.term_days == 0 {
        return Err(AnalysisError::InvalidTermDays {
            term_days: terms.term_days,
        });
    }
    for fee in &terms.fees {
        if fee.amount < 0.0 {
            return Err(AnalysisError::NegativeFeeAmount {
                name: fee.name.clone(),
                amount: fee.amount,
            });
        }
    }
    Ok(())
}

/// Compute the full cost exposure for one set of loan terms.
///
/// Pure and deterministic; the input is never mutated. Fails with
/// [`AnalysisError`] on non-positive principal/term or a negative fee,
/// returning no partial result.
pub fn compute_exposure(terms: &LoanTerms) -> Result<CostExposure, AnalysisError> {
    validate(terms)?;

    let principal = terms.principal;
    let days = f64::from(terms.term_days);
    let annualize = 365.0 / days * 100.0;

    let interest = principal * (terms.nominal_annual_rate_percent / 100.0) * days / 365.0;
    let visible_fees: f64 = terms
        .fees
        .iter()
        .filter(|f| !f.hidden)
        .map(|f| f.amount)
        .sum();
    let hidden_fees: f64 = terms
        .fees
        .iter()
        .filter(|f| f.hidden)
        .map(|f| f.amount)
        .sum();

    let displayed_finance_charge = interest + visible_fees;
    let true_finance_charge = interest + visible_fees + hidden_fees;
    let displayed_apr = displayed_finance_charge / principal * annualize;
    let true_apr = true_finance_charge / principal * annualize;
    let total_cost = principal + true_finance_charge;

    Ok(CostExposure {
        displayed_apr: round2(displayed_apr),
        true_apr: round2(true_apr),
        discrepancy: round2(true_apr - displayed_apr),
        displayed_finance_charge: round2(displayed_finance_charge),
        true_finance_charge: round2(true_finance_charge),
        total_cost: round2(total_cost),
        total_hidden_fees: round2(hidden_fees),
        payback_ratio: round2(total_cost / principal),
    })
}

/// Annualized cost of a single fee against the given terms, rounded to
/// 2 decimal places.
pub fn fee_apr(terms: &LoanTerms, fee: &Fee) -> Result<f64, AnalysisError> {
    validate(terms)?;
    if fee.amount < 0.0 {
        return Err(AnalysisError::NegativeFeeAmount {
            name: fee.name.clone(),
            amount: fee.amount,
        });
    }
    let days = f64::from(terms.term_days);
    Ok(round2(fee.amount / terms.principal * (365.0 / days) * 100.0))
}
