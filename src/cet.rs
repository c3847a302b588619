use rust_decimal::Decimal;

use crate::decimal::{Money, Rate};
use crate::schedule::AmortizationSchedule;
use crate::types::LoanContract;

/// Approximate effective total cost (CET) of a loan.
///
/// This is the directional estimate used by the back office, not a
/// regulator-grade internal-rate-of-return solve: the total paid over the
/// schedule, plus IOF and insurance, is compared linearly against the
/// principal. A negative result is returned as computed; it signals
/// inconsistent inputs upstream and is deliberately not floored at zero.
pub struct EffectiveCostEstimator;

impl EffectiveCostEstimator {
    /// estimate the CET of a contract over its generated schedule
    pub fn estimate(contract: &LoanContract, schedule: &AmortizationSchedule) -> Rate {
        Self::estimate_from_totals(
            contract.principal,
            schedule.total_paid,
            contract.iof,
            contract.insurance,
        )
    }

    /// total amount the borrower pays beyond the principal
    pub fn total_cost(contract: &LoanContract, schedule: &AmortizationSchedule) -> Money {
        schedule.total_paid - contract.principal + contract.iof + contract.insurance
    }

    /// core estimate from raw totals
    pub fn estimate_from_totals(
        principal: Money,
        total_paid: Money,
        iof: Money,
        insurance: Money,
    ) -> Rate {
        let cost = total_paid - principal + iof + insurance;
        Rate::from_percent(cost.as_decimal() / principal.as_decimal() * Decimal::from(100))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_cet_from_totals() {
        // total paid 11,200 on 10,000 with IOF 50 and insurance 20:
        // cost 1,270 -> 12.70%
        let cet = EffectiveCostEstimator::estimate_from_totals(
            Money::from_major(10_000),
            Money::from_major(11_200),
            Money::from_major(50),
            Money::from_major(20),
        );
        assert_eq!(cet.as_percent().round_dp(2), dec!(12.70));
    }

    #[test]
    fn test_cet_without_extra_charges() {
        let cet = EffectiveCostEstimator::estimate_from_totals(
            Money::from_major(10_000),
            Money::from_major(11_200),
            Money::ZERO,
            Money::ZERO,
        );
        assert_eq!(cet.as_percent().round_dp(2), dec!(12.00));
    }

    #[test]
    fn test_negative_cost_is_not_floored() {
        // total paid below principal is bad input, but the estimate reports
        // it instead of masking it
        let cet = EffectiveCostEstimator::estimate_from_totals(
            Money::from_major(10_000),
            Money::from_major(9_000),
            Money::ZERO,
            Money::ZERO,
        );
        assert_eq!(cet.as_percent().round_dp(2), dec!(-10.00));
    }
}
