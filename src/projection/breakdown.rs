//! Yearly cost breakdown produced by a projection

use serde::{Deserialize, Serialize};
use std::io::Write;

use super::loan::LoanSchedule;

/// Costs for a single year of ownership
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearCost {
    /// Ownership year (0 = first year)
    pub year: u32,
    pub loan: f64,
    pub insurance: f64,
    pub maintenance: f64,
    pub permit: f64,
    /// Sum of the components above
    pub total: f64,
}

impl YearCost {
    /// Create a year with every component set to zero
    pub fn new(year: u32) -> Self {
        Self {
            year,
            loan: 0.0,
            insurance: 0.0,
            maintenance: 0.0,
            permit: 0.0,
            total: 0.0,
        }
    }
}

/// Complete projection result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearlyBreakdown {
    /// One row per year of expected ownership
    pub years: Vec<YearCost>,

    /// Loan used to finance the purchase
    pub loan: LoanSchedule,

    /// Cash paid at purchase (down payment, plus the principal when unfinanced)
    pub upfront: f64,

    /// Sum of all yearly totals plus the upfront payment
    pub total: f64,
}

impl YearlyBreakdown {
    pub fn new(loan: LoanSchedule, upfront: f64) -> Self {
        Self {
            years: Vec::new(),
            loan,
            upfront,
            total: 0.0,
        }
    }

    /// Add a year row
    pub fn add_year(&mut self, year: YearCost) {
        self.years.push(year);
    }

    /// Per-year totals in ownership order
    pub fn yearly_totals(&self) -> Vec<f64> {
        self.years.iter().map(|y| y.total).collect()
    }

    /// Average cost per month over the whole ownership period
    pub fn average_monthly(&self) -> f64 {
        if self.years.is_empty() {
            return 0.0;
        }
        self.total / (self.years.len() as f64 * 12.0)
    }

    /// Get summary statistics
    pub fn summary(&self) -> BreakdownSummary {
        BreakdownSummary {
            years: self.years.len() as u32,
            upfront: self.upfront,
            total_loan: self.years.iter().map(|y| y.loan).sum(),
            total_insurance: self.years.iter().map(|y| y.insurance).sum(),
            total_maintenance: self.years.iter().map(|y| y.maintenance).sum(),
            total_permit: self.years.iter().map(|y| y.permit).sum(),
            total: self.total,
            average_yearly: if self.years.is_empty() {
                0.0
            } else {
                self.total / self.years.len() as f64
            },
            average_monthly: self.average_monthly(),
        }
    }

    /// Write one CSV row per year
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), csv::Error> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        for year in &self.years {
            csv_writer.serialize(year)?;
        }
        csv_writer.flush()?;
        Ok(())
    }
}

/// Summary statistics for a projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakdownSummary {
    pub years: u32,
    pub upfront: f64,
    pub total_loan: f64,
    pub total_insurance: f64,
    pub total_maintenance: f64,
    pub total_permit: f64,
    pub total: f64,
    pub average_yearly: f64,
    pub average_monthly: f64,
}
