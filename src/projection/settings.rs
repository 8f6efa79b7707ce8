//! Ownership settings and default resolution

use serde::{Deserialize, Serialize};

use crate::curve::CostCurve;
use crate::error::CostError;

/// Default annual loan rate (3%)
pub const DEFAULT_LOAN_RATE: f64 = 0.03;

/// Default loan term in years
pub const DEFAULT_LOAN_YEARS: i32 = 4;

/// Default expected ownership lifetime in years
pub const DEFAULT_EXPECTED_LIFE: i32 = 20;

/// Default yearly registration / permit cost
pub const DEFAULT_YEARLY_PERMIT_COST: f64 = 2643.0;

/// Default insurance cost in the first year of ownership
pub const DEFAULT_INSURANCE_FIRST_YEAR: f64 = 14000.0;

/// Default insurance cost in the final year of ownership
pub const DEFAULT_INSURANCE_FINAL_YEAR: f64 = 6500.0;

/// Default maintenance control points
pub const DEFAULT_MAINTENANCE_POINTS: [(u32, f64); 4] =
    [(0, 1000.0), (5, 2000.0), (10, 3500.0), (15, 5000.0)];

/// Complete input to one projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OwnershipSettings {
    /// Purchase price
    pub cost: f64,
    /// Cash paid upfront
    pub down_payment: f64,
    /// Annual loan interest rate as a fraction
    pub loan_rate: f64,
    /// Loan term in years
    pub loan_years: i32,
    /// Expected ownership lifetime in years
    pub expected_life: i32,
    pub insurance_curve: CostCurve,
    pub maintenance_curve: CostCurve,
    /// Flat registration / permit cost charged every year
    pub yearly_permit_cost: f64,
}

impl OwnershipSettings {
    /// Settings for a purchase price with every other field defaulted
    pub fn with_defaults(cost: f64) -> Self {
        SettingsOverrides::new(cost).resolve()
    }

    /// Check the preconditions a projection relies on
    pub fn validate(&self) -> Result<(), CostError> {
        if self.expected_life <= 0 {
            return Err(CostError::InvalidLifetime(self.expected_life));
        }
        if self.loan_years < 0 {
            return Err(CostError::InvalidLoanTerm(self.loan_years));
        }
        if !self.loan_rate.is_finite() || self.loan_rate < 0.0 {
            return Err(CostError::InvalidRate(self.loan_rate));
        }

        for (field, value) in [
            ("cost", self.cost),
            ("down payment", self.down_payment),
            ("yearly permit cost", self.yearly_permit_cost),
        ] {
            if !value.is_finite() {
                return Err(CostError::InvalidAmount { field, value });
            }
        }

        Ok(())
    }

    /// Amount financed by the loan (negative when the down payment exceeds the price)
    pub fn principal(&self) -> f64 {
        self.cost - self.down_payment
    }
}

/// Partially specified settings; unset fields take the defaults.
///
/// `resolve` fills scalar fields first, then builds the default curves from the
/// resolved scalars (the default insurance curve ends at `expected_life - 1`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettingsOverrides {
    pub cost: f64,
    pub down_payment: Option<f64>,
    pub loan_rate: Option<f64>,
    pub loan_years: Option<i32>,
    pub expected_life: Option<i32>,
    pub insurance_curve: Option<CostCurve>,
    pub maintenance_curve: Option<CostCurve>,
    pub yearly_permit_cost: Option<f64>,
}

impl SettingsOverrides {
    pub fn new(cost: f64) -> Self {
        Self {
            cost,
            ..Self::default()
        }
    }

    /// Resolve all unset fields to their defaults
    pub fn resolve(self) -> OwnershipSettings {
        // Scalars
        let down_payment = self.down_payment.unwrap_or(0.0);
        let loan_rate = self.loan_rate.unwrap_or(DEFAULT_LOAN_RATE);
        let loan_years = self.loan_years.unwrap_or(DEFAULT_LOAN_YEARS);
        let expected_life = self.expected_life.unwrap_or(DEFAULT_EXPECTED_LIFE);
        let yearly_permit_cost = self.yearly_permit_cost.unwrap_or(DEFAULT_YEARLY_PERMIT_COST);

        // Curves, which may depend on the scalars above
        let insurance_curve = self
            .insurance_curve
            .unwrap_or_else(|| default_insurance_curve(expected_life));
        let maintenance_curve = self
            .maintenance_curve
            .unwrap_or_else(default_maintenance_curve);

        OwnershipSettings {
            cost: self.cost,
            down_payment,
            loan_rate,
            loan_years,
            expected_life,
            insurance_curve,
            maintenance_curve,
            yearly_permit_cost,
        }
    }
}

/// Insurance falling linearly from the first to the final year of ownership
pub fn default_insurance_curve(expected_life: i32) -> CostCurve {
    let final_year = u32::try_from(expected_life.saturating_sub(1)).unwrap_or(0);
    CostCurve::from_pairs(&[
        (0, DEFAULT_INSURANCE_FIRST_YEAR),
        (final_year, DEFAULT_INSURANCE_FINAL_YEAR),
    ])
}

pub fn default_maintenance_curve() -> CostCurve {
    CostCurve::from_pairs(&DEFAULT_MAINTENANCE_POINTS)
}
