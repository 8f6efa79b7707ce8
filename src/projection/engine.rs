//! Core projection engine for yearly ownership costs

use log::debug;

use crate::curve::interpolate;
use crate::error::CostError;
use super::breakdown::{YearCost, YearlyBreakdown};
use super::loan::LoanSchedule;
use super::settings::OwnershipSettings;

/// Main projection engine
#[derive(Debug, Clone)]
pub struct ProjectionEngine {
    settings: OwnershipSettings,
}

impl ProjectionEngine {
    /// Create an engine, rejecting settings that cannot be projected
    pub fn new(settings: OwnershipSettings) -> Result<Self, CostError> {
        settings.validate()?;
        Ok(Self { settings })
    }

    pub fn settings(&self) -> &OwnershipSettings {
        &self.settings
    }

    /// Loan financing `cost - down_payment` over the configured term
    pub fn loan_schedule(&self) -> LoanSchedule {
        // Validation guarantees a non-negative term
        let term_years = u32::try_from(self.settings.loan_years).unwrap_or(0);
        LoanSchedule::amortize(self.settings.principal(), self.settings.loan_rate, term_years)
    }

    /// Run the projection over the expected lifetime
    pub fn project(&self) -> YearlyBreakdown {
        let settings = &self.settings;
        let life = usize::try_from(settings.expected_life).unwrap_or(0);

        let loan = self.loan_schedule();
        debug!(
            "loan: principal {:.2} at {:.4} over {} years, monthly {:.2}, yearly {:.2}",
            loan.principal, loan.annual_rate, loan.term_years, loan.monthly_payment, loan.yearly_payment
        );

        let insurance = interpolate(settings.insurance_curve.points(), life);
        let maintenance = interpolate(settings.maintenance_curve.points(), life);

        let upfront = settings.down_payment + loan.upfront_principal();
        let mut result = YearlyBreakdown::new(loan, upfront);

        for (year, (&insurance_cost, &maintenance_cost)) in
            (0u32..).zip(insurance.iter().zip(maintenance.iter()))
        {
            let mut row = YearCost::new(year);
            row.insurance = insurance_cost;
            row.maintenance = maintenance_cost;
            row.permit = settings.yearly_permit_cost;
            row.loan = loan.payment_in_year(year);

            row.total = row.insurance + row.permit + row.maintenance;
            if year < loan.term_years {
                row.total += row.loan;
            }

            result.add_year(row);
        }

        let yearly_sum: f64 = result.years.iter().map(|y| y.total).sum();
        result.total = yearly_sum + upfront;

        debug!(
            "projected {} years: total {:.2}, average monthly {:.2}",
            result.years.len(),
            result.total,
            result.average_monthly()
        );

        result
    }
}

/// Validate `settings` and run a single projection
pub fn project(settings: &OwnershipSettings) -> Result<YearlyBreakdown, CostError> {
    Ok(ProjectionEngine::new(settings.clone())?.project())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::CostCurve;
    use crate::projection::settings::SettingsOverrides;
    use approx::assert_relative_eq;

    fn reference_settings() -> OwnershipSettings {
        OwnershipSettings {
            cost: 209990.0,
            down_payment: 50000.0,
            loan_rate: 0.03,
            loan_years: 4,
            expected_life: 15,
            insurance_curve: CostCurve::from_pairs(&[(0, 14000.0), (5, 11000.0), (15, 6500.0)]),
            maintenance_curve: CostCurve::from_pairs(&[
                (0, 1000.0),
                (5, 2000.0),
                (10, 3500.0),
                (15, 5000.0),
            ]),
            yearly_permit_cost: 2643.0,
        }
    }

    #[test]
    fn test_reference_vehicle_total() {
        let result = project(&reference_settings()).unwrap();

        assert_eq!(result.years.len(), 15);
        assert_relative_eq!(result.total, 453876.0068009611, max_relative = 1e-12);
        assert_relative_eq!(result.average_monthly(), 2521.5333711164503, max_relative = 1e-12);

        assert_relative_eq!(result.years[0].total, 60138.25170024027, max_relative = 1e-12);
        assert_relative_eq!(result.years[3].total, 58938.25170024027, max_relative = 1e-12);
        assert_relative_eq!(result.years[4].total, 16043.0, max_relative = 1e-12);
        assert_relative_eq!(result.years[14].total, 14293.0, max_relative = 1e-12);
    }

    #[test]
    fn test_total_includes_down_payment_once() {
        let result = project(&reference_settings()).unwrap();
        let yearly: f64 = result.yearly_totals().iter().sum();
        assert_relative_eq!(result.total - yearly, 50000.0, max_relative = 1e-9);
        assert_eq!(result.upfront, 50000.0);
    }

    #[test]
    fn test_zero_rate_loan_is_straight_line() {
        let settings = OwnershipSettings {
            cost: 58000.0,
            down_payment: 10000.0,
            loan_rate: 0.0,
            ..reference_settings()
        };
        let result = project(&settings).unwrap();
        assert_eq!(result.loan.yearly_payment, (58000.0 - 10000.0) / 4.0);
        assert_eq!(result.years[0].loan, 12000.0);
    }

    #[test]
    fn test_loan_longer_than_ownership() {
        let settings = OwnershipSettings {
            loan_years: 8,
            expected_life: 5,
            ..reference_settings()
        };
        let result = project(&settings).unwrap();
        assert_eq!(result.years.len(), 5);
        assert!(result.years.iter().all(|y| y.loan == result.loan.yearly_payment));

        let loan_paid: f64 = result.years.iter().map(|y| y.loan).sum();
        assert_relative_eq!(loan_paid, result.loan.yearly_payment * 5.0, max_relative = 1e-12);
    }

    #[test]
    fn test_loan_stops_after_term() {
        let result = project(&reference_settings()).unwrap();
        assert!(result.years[..4].iter().all(|y| y.loan > 0.0));
        assert!(result.years[4..].iter().all(|y| y.loan == 0.0));
    }

    #[test]
    fn test_unfinanced_purchase_pays_principal_upfront() {
        let settings = OwnershipSettings {
            loan_years: 0,
            ..reference_settings()
        };
        let result = project(&settings).unwrap();
        assert_eq!(result.upfront, 209990.0);
        assert!(result.years.iter().all(|y| y.loan == 0.0));
        assert!(result.total.is_finite());
    }

    #[test]
    fn test_very_long_loan_term_projects() {
        let settings = SettingsOverrides {
            loan_years: Some(400_000_000),
            expected_life: Some(5),
            ..SettingsOverrides::new(30000.0)
        }
        .resolve();
        assert!(settings.validate().is_ok());

        let result = project(&settings).unwrap();
        assert_eq!(result.years.len(), 5);
        assert!(result.years.iter().all(|y| y.loan > 0.0 && y.loan.is_finite()));
        assert!(result.total.is_finite());
    }

    #[test]
    fn test_defaults_project() {
        let result = project(&SettingsOverrides::new(30000.0).resolve()).unwrap();
        assert_eq!(result.years.len(), 20);
        assert_relative_eq!(result.years[0].insurance, 14000.0);
        assert_relative_eq!(result.years[19].insurance, 6500.0);
        assert!(result.years.iter().all(|y| y.permit == 2643.0));
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let settings = OwnershipSettings {
            expected_life: 0,
            ..reference_settings()
        };
        assert_eq!(project(&settings), Err(CostError::InvalidLifetime(0)));
    }

    #[test]
    fn test_projection_is_repeatable() {
        let settings = reference_settings();
        assert_eq!(project(&settings).unwrap(), project(&settings).unwrap());
    }
}
