use rust_decimal::Decimal;

use crate::decimal::{Money, Rate};
use crate::errors::Result;
use crate::types::validate_terms;

/// Solve the fixed Price (French system) installment.
///
/// Closed-form annuity: `P * i(1+i)^n / ((1+i)^n - 1)` with the flat monthly
/// rate `i = annual / 12 / 100`. The zero-rate limit is `P / n`. Exponentiation
/// runs as a `Decimal` multiplication loop, which stays exact enough out to
/// 600-month terms where binary `pow` would lose precision for small rates.
pub fn solve_installment(
    principal: Money,
    annual_rate_percent: Decimal,
    term_months: u32,
) -> Result<Money> {
    validate_terms(principal, annual_rate_percent, term_months)?;

    let monthly_rate = Rate::from_percent(annual_rate_percent).monthly_rate();
    if monthly_rate.is_zero() {
        return Ok(principal / Decimal::from(term_months));
    }

    let rate = monthly_rate.as_decimal();
    let base = Decimal::ONE + rate;
    let mut compound = Decimal::ONE;
    for _ in 0..term_months {
        compound *= base;
    }

    let numerator = principal.as_decimal() * rate * compound;
    let denominator = compound - Decimal::ONE;

    Ok(Money::from_decimal(numerator / denominator))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_two_period_annuity() {
        let installment = solve_installment(Money::from_major(1_000), dec!(12), 2).unwrap();
        assert_eq!(installment.round_dp(2), Money::from_str_exact("507.51").unwrap());
    }

    #[test]
    fn test_one_period_is_principal_plus_interest() {
        let installment = solve_installment(Money::from_major(1_000), dec!(12), 1).unwrap();
        assert_eq!(installment.round_dp(2), Money::from_str_exact("1010.00").unwrap());
    }

    #[test]
    fn test_zero_rate_limit() {
        let installment = solve_installment(Money::from_major(1_200), dec!(0), 12).unwrap();
        assert_eq!(installment, Money::from_major(100));
    }

    #[test]
    fn test_small_rate_long_term_stays_finite() {
        // 0.1% a year over 50 years: (1+i)^n barely leaves 1, the
        // denominator must not collapse to zero
        let installment = solve_installment(Money::from_major(100_000), dec!(0.1), 600).unwrap();
        assert!(installment.is_positive());
        assert!(installment > Money::from_major(100_000) / dec!(600));
    }

    #[test]
    fn test_rejects_invalid_terms() {
        let err = solve_installment(Money::ZERO, dec!(10), 12).unwrap_err();
        assert_eq!(err.field(), "principal");

        let err = solve_installment(Money::from_major(100), dec!(10), 0).unwrap_err();
        assert_eq!(err.field(), "term_months");
    }
}
