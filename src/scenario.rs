//! Scenario runner for projecting catalog vehicles
//!
//! Holds the financing and lifetime choices shared by every vehicle in a run,
//! turns stored vehicle records into settings, and compares many vehicles at
//! once.

use log::warn;
use rayon::prelude::*;

use crate::curve::CostCurve;
use crate::error::{CostError, CurveParseError};
use crate::projection::{project, OwnershipSettings, SettingsOverrides, YearlyBreakdown};
use crate::vehicle::Vehicle;

/// Projection of one vehicle within a comparison
#[derive(Debug, Clone)]
pub struct VehicleProjection {
    pub name: String,
    pub settings: OwnershipSettings,
    pub breakdown: YearlyBreakdown,
}

/// Shared scenario applied to every vehicle
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new().with_loan(0.05, 5);
/// let ranked = runner.compare(catalog.vehicles())?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScenarioRunner {
    down_payment: Option<f64>,
    loan_rate: Option<f64>,
    loan_years: Option<i32>,
    expected_life: Option<i32>,
}

impl ScenarioRunner {
    /// Create runner using the default financing and lifetime
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_down_payment(mut self, down_payment: f64) -> Self {
        self.down_payment = Some(down_payment);
        self
    }

    pub fn with_loan(mut self, loan_rate: f64, loan_years: i32) -> Self {
        self.loan_rate = Some(loan_rate);
        self.loan_years = Some(loan_years);
        self
    }

    pub fn with_loan_rate(mut self, loan_rate: f64) -> Self {
        self.loan_rate = Some(loan_rate);
        self
    }

    pub fn with_loan_years(mut self, loan_years: i32) -> Self {
        self.loan_years = Some(loan_years);
        self
    }

    pub fn with_expected_life(mut self, expected_life: i32) -> Self {
        self.expected_life = Some(expected_life);
        self
    }

    /// Overrides for an ad hoc purchase price
    pub fn overrides_for_price(&self, cost: f64) -> SettingsOverrides {
        SettingsOverrides {
            down_payment: self.down_payment,
            loan_rate: self.loan_rate,
            loan_years: self.loan_years,
            expected_life: self.expected_life,
            ..SettingsOverrides::new(cost)
        }
    }

    /// Overrides for a stored vehicle.
    ///
    /// A stored curve that cannot be decoded is logged and replaced by the
    /// default curve rather than failing the run.
    pub fn overrides_for(&self, vehicle: &Vehicle) -> SettingsOverrides {
        SettingsOverrides {
            insurance_curve: curve_or_default(&vehicle.name, "insurance", vehicle.insurance_curve()),
            maintenance_curve: curve_or_default(&vehicle.name, "maintenance", vehicle.maintenance_curve()),
            yearly_permit_cost: vehicle.yearly_permit_cost,
            ..self.overrides_for_price(vehicle.cost)
        }
    }

    /// Resolve and project a set of overrides.
    ///
    /// Financing and lifetime fields left unset in `overrides` take the
    /// runner's values before defaults are applied.
    pub fn run_overrides(&self, overrides: SettingsOverrides) -> Result<(OwnershipSettings, YearlyBreakdown), CostError> {
        let overrides = SettingsOverrides {
            down_payment: overrides.down_payment.or(self.down_payment),
            loan_rate: overrides.loan_rate.or(self.loan_rate),
            loan_years: overrides.loan_years.or(self.loan_years),
            expected_life: overrides.expected_life.or(self.expected_life),
            ..overrides
        };
        let settings = overrides.resolve();
        let breakdown = project(&settings)?;
        Ok((settings, breakdown))
    }

    /// Project a single stored vehicle
    pub fn run_vehicle(&self, vehicle: &Vehicle) -> Result<VehicleProjection, CostError> {
        let (settings, breakdown) = self.run_overrides(self.overrides_for(vehicle))?;
        Ok(VehicleProjection {
            name: vehicle.name.clone(),
            settings,
            breakdown,
        })
    }

    /// Project every vehicle in parallel, cheapest total first
    pub fn compare(&self, vehicles: &[Vehicle]) -> Result<Vec<VehicleProjection>, CostError> {
        let mut results = vehicles
            .par_iter()
            .map(|vehicle| self.run_vehicle(vehicle))
            .collect::<Result<Vec<_>, _>>()?;

        results.sort_by(|a, b| a.breakdown.total.total_cmp(&b.breakdown.total));
        Ok(results)
    }
}

fn curve_or_default(
    name: &str,
    kind: &str,
    parsed: Result<Option<CostCurve>, CurveParseError>,
) -> Option<CostCurve> {
    match parsed {
        Ok(curve) => curve,
        Err(err) => {
            warn!("vehicle '{}': ignoring stored {} curve, using default ({})", name, kind, err);
            None
        }
    }
}
