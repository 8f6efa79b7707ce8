//! Projection engine for multi-year ownership costs

mod settings;
mod loan;
mod engine;
mod breakdown;

pub use settings::{
    OwnershipSettings, SettingsOverrides, default_insurance_curve, default_maintenance_curve,
    DEFAULT_EXPECTED_LIFE, DEFAULT_LOAN_RATE, DEFAULT_LOAN_YEARS, DEFAULT_YEARLY_PERMIT_COST,
};
pub use loan::{LoanSchedule, monthly_payment};
pub use engine::{ProjectionEngine, project};
pub use breakdown::{BreakdownSummary, YearCost, YearlyBreakdown};
