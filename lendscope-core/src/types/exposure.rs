//! Derived cost exposure — the output side of the cost model.

use serde::{Deserialize, Serialize};

/// The full derived cost picture for one set of loan terms.
///
/// Recomputed from scratch on every terms change; no field is updated
/// incrementally. All fields are rounded to 2 decimal places at the
/// model's output boundary; internal computation is unrounded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostExposure {
    /// APR computed from interest plus fees the lender does not hide.
    pub displayed_apr: f64,
    /// APR computed from interest plus all fees, hidden or not.
    pub true_apr: f64,
    /// `true_apr - displayed_apr`. The core deception signal.
    pub discrepancy: f64,
    /// Interest plus visible fees.
    pub displayed_finance_charge: f64,
    /// Interest plus all fees.
    pub true_finance_charge: f64,
    /// Principal plus true finance charge.
    pub total_cost: f64,
    /// Sum of hidden fee amounts.
    pub total_hidden_fees: f64,
    /// `total_cost / principal`.
    pub payback_ratio: f64,
}

impl CostExposure {
    /// Whether any cost is being concealed from the displayed APR.
    pub fn has_hidden_cost(&self) -> bool {
        self.total_hidden_fees > 0.0
    }
}
