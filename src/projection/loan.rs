//! Fixed-rate loan amortization

use serde::{Deserialize, Serialize};

/// Payments for a fixed-rate loan repaid monthly
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanSchedule {
    /// Amount financed
    pub principal: f64,
    /// Annual interest rate
    pub annual_rate: f64,
    /// Term in years
    pub term_years: u32,
    /// Level monthly payment
    pub monthly_payment: f64,
    /// Sum of all payments over the term
    pub total_cost: f64,
    /// Payment charged in each year of the term
    pub yearly_payment: f64,
}

impl LoanSchedule {
    /// Amortize `principal` at `annual_rate` over `term_years` of monthly payments.
    ///
    /// A zero term means nothing is financed: all payments are zero and the
    /// principal is due upfront (see [`LoanSchedule::upfront_principal`]).
    pub fn amortize(principal: f64, annual_rate: f64, term_years: u32) -> Self {
        if term_years == 0 {
            return Self {
                principal,
                annual_rate,
                term_years,
                monthly_payment: 0.0,
                total_cost: 0.0,
                yearly_payment: 0.0,
            };
        }

        let monthly_payment = monthly_payment(principal, annual_rate / 12.0, f64::from(term_years) * 12.0);
        let total_cost = monthly_payment * 12.0 * f64::from(term_years);

        Self {
            principal,
            annual_rate,
            term_years,
            monthly_payment,
            total_cost,
            yearly_payment: total_cost / f64::from(term_years),
        }
    }

    /// Loan payment charged in ownership year `year` (0-indexed)
    pub fn payment_in_year(&self, year: u32) -> f64 {
        if year < self.term_years {
            self.yearly_payment
        } else {
            0.0
        }
    }

    /// Principal due at purchase when there is no loan term
    pub fn upfront_principal(&self) -> f64 {
        if self.term_years == 0 {
            self.principal
        } else {
            0.0
        }
    }

    /// Interest paid over the life of the loan
    pub fn total_interest(&self) -> f64 {
        self.total_cost - self.principal + self.upfront_principal()
    }
}

/// Level payment of a standard annuity.
///
/// A zero rate would divide by zero in the annuity formula, so it falls back
/// to straight-line repayment. For very long terms the growth factor
/// overflows and the payment converges to the interest on the principal.
pub fn monthly_payment(principal: f64, monthly_rate: f64, payments: f64) -> f64 {
    if monthly_rate == 0.0 {
        return principal / payments;
    }

    let growth = (1.0 + monthly_rate).powf(payments);
    if growth.is_infinite() {
        return principal * monthly_rate;
    }
    principal * monthly_rate * growth / (growth - 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_standard_amortization() {
        let loan = LoanSchedule::amortize(159990.0, 0.03, 4);
        assert_relative_eq!(loan.monthly_payment, 3541.2709750200224, max_relative = 1e-12);
        assert_relative_eq!(loan.yearly_payment, loan.monthly_payment * 12.0, max_relative = 1e-12);
        assert_relative_eq!(loan.total_cost, loan.monthly_payment * 48.0, max_relative = 1e-12);
        assert!(loan.total_interest() > 0.0);
    }

    #[test]
    fn test_zero_rate_is_straight_line() {
        let loan = LoanSchedule::amortize(48000.0, 0.0, 4);
        assert_eq!(loan.monthly_payment, 1000.0);
        assert_eq!(loan.yearly_payment, 12000.0);
        assert_eq!(loan.total_interest(), 0.0);
    }

    #[test]
    fn test_negative_principal_propagates() {
        let loan = LoanSchedule::amortize(-12000.0, 0.05, 2);
        assert!(loan.monthly_payment < 0.0);
        assert!(loan.yearly_payment < 0.0);
    }

    #[test]
    fn test_payments_stop_after_term() {
        let loan = LoanSchedule::amortize(20000.0, 0.04, 3);
        assert_eq!(loan.payment_in_year(0), loan.yearly_payment);
        assert_eq!(loan.payment_in_year(2), loan.yearly_payment);
        assert_eq!(loan.payment_in_year(3), 0.0);
    }

    #[test]
    fn test_zero_term_is_paid_upfront() {
        let loan = LoanSchedule::amortize(20000.0, 0.04, 0);
        assert_eq!(loan.yearly_payment, 0.0);
        assert_eq!(loan.payment_in_year(0), 0.0);
        assert_eq!(loan.upfront_principal(), 20000.0);
        assert_eq!(loan.total_interest(), 0.0);
    }

    #[test]
    fn test_very_long_term_stays_finite() {
        // 400 million years of monthly payments does not fit in a u32 count
        let loan = LoanSchedule::amortize(30000.0, 0.03, 400_000_000);
        assert_relative_eq!(loan.monthly_payment, 30000.0 * 0.0025, max_relative = 1e-12);
        assert!(loan.yearly_payment.is_finite());
        assert_eq!(loan.payment_in_year(4), loan.yearly_payment);

        let interest_free = LoanSchedule::amortize(48000.0, 0.0, 400_000_000);
        assert!(interest_free.monthly_payment > 0.0);
        assert!(interest_free.yearly_payment.is_finite());
    }
}
