use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::errors::Result;
use crate::types::{validate_terms, AmortizationSystem, LoanContract};

pub mod price;

pub use price::solve_installment;

/// One row of an amortization schedule.
///
/// The serialized field names are the column contract consumed by the
/// report/export collaborator; they must not change without updating it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstallmentRecord {
    #[serde(rename = "numero")]
    pub number: u32,
    #[serde(rename = "saldoInicial")]
    pub opening_balance: Money,
    #[serde(rename = "juros")]
    pub interest_portion: Money,
    #[serde(rename = "amortizacao")]
    pub principal_portion: Money,
    #[serde(rename = "saldoFinal")]
    pub closing_balance: Money,
}

impl InstallmentRecord {
    /// total due for the period
    pub fn installment(&self) -> Money {
        self.interest_portion + self.principal_portion
    }
}

/// full amortization schedule with derived totals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationSchedule {
    pub system: AmortizationSystem,
    pub principal: Money,
    pub annual_rate_percent: Decimal,
    pub term_months: u32,
    /// fixed installment actually applied to Price rows
    pub installment_value: Option<Money>,
    pub installments: Vec<InstallmentRecord>,
    pub total_interest: Money,
    pub total_paid: Money,
}

impl AmortizationSchedule {
    /// generate the schedule for a persisted contract
    pub fn for_contract(contract: &LoanContract) -> Result<Self> {
        AmortizationCalculator::new(contract.system).generate(
            contract.principal,
            contract.annual_rate_percent,
            contract.term_months,
            contract.installment_value,
        )
    }

    /// get row for a specific period (1-indexed)
    pub fn installment(&self, number: u32) -> Option<&InstallmentRecord> {
        self.installments.get(number.checked_sub(1)? as usize)
    }

    /// remaining balance after a given period
    pub fn balance_after(&self, number: u32) -> Money {
        self.installment(number)
            .map(|r| r.closing_balance)
            .unwrap_or(self.principal)
    }
}

/// Generates installment-by-installment schedules under the SAC or Price
/// system.
///
/// The monthly rate is the flat division `annual / 12 / 100` used across the
/// back office, not a compound-equivalent conversion; keeping it preserves
/// numeric parity with existing contract records.
pub struct AmortizationCalculator {
    system: AmortizationSystem,
}

impl AmortizationCalculator {
    pub fn new(system: AmortizationSystem) -> Self {
        Self { system }
    }

    /// Calculate the full schedule.
    ///
    /// `installment_value` applies to Price only: when absent the annuity
    /// installment is solved first; Sac ignores it. With a zero rate both
    /// systems degenerate to equal interest-free installments of
    /// `principal / term_months`.
    pub fn generate(
        &self,
        principal: Money,
        annual_rate_percent: Decimal,
        term_months: u32,
        installment_value: Option<Money>,
    ) -> Result<AmortizationSchedule> {
        validate_terms(principal, annual_rate_percent, term_months)?;

        let monthly_rate = Rate::from_percent(annual_rate_percent).monthly_rate();

        let (installments, applied_installment) = match self.system {
            AmortizationSystem::Sac => {
                (sac_rows(principal, monthly_rate, term_months), None)
            }
            AmortizationSystem::Price => {
                let installment = match installment_value {
                    Some(value) => value,
                    None => price::solve_installment(principal, annual_rate_percent, term_months)?,
                };
                (
                    price_rows(principal, monthly_rate, term_months, installment),
                    Some(installment),
                )
            }
        };

        let total_interest = installments
            .iter()
            .map(|r| r.interest_portion)
            .fold(Money::ZERO, |acc, x| acc + x);

        let total_paid = installments
            .iter()
            .map(|r| r.installment())
            .fold(Money::ZERO, |acc, x| acc + x);

        Ok(AmortizationSchedule {
            system: self.system,
            principal,
            annual_rate_percent,
            term_months,
            installment_value: applied_installment,
            installments,
            total_interest,
            total_paid,
        })
    }
}

/// constant principal portion, interest on the declining balance
fn sac_rows(principal: Money, monthly_rate: Rate, term_months: u32) -> Vec<InstallmentRecord> {
    let principal_portion = principal / Decimal::from(term_months);

    let mut rows = Vec::with_capacity(term_months as usize);
    let mut balance = principal;

    for number in 1..=term_months {
        let interest_portion =
            Money::from_decimal(balance.as_decimal() * monthly_rate.as_decimal());
        let closing_balance = balance - principal_portion;

        rows.push(InstallmentRecord {
            number,
            opening_balance: balance,
            interest_portion,
            principal_portion,
            closing_balance,
        });

        balance = closing_balance;
    }

    rows
}

/// Constant installment, the principal portion grows as interest shrinks.
///
/// The terminal balance is not forced to zero: with the solver-derived
/// installment it lands within a cent of zero on its own, and with an
/// arbitrary caller-supplied installment the residual is real information
/// the caller should see, not hide.
fn price_rows(
    principal: Money,
    monthly_rate: Rate,
    term_months: u32,
    installment: Money,
) -> Vec<InstallmentRecord> {
    let mut rows = Vec::with_capacity(term_months as usize);
    let mut balance = principal;

    for number in 1..=term_months {
        let interest_portion =
            Money::from_decimal(balance.as_decimal() * monthly_rate.as_decimal());
        let principal_portion = installment - interest_portion;
        let closing_balance = balance - principal_portion;

        rows.push(InstallmentRecord {
            number,
            opening_balance: balance,
            interest_portion,
            principal_portion,
            closing_balance,
        });

        balance = closing_balance;
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn cent() -> Money {
        Money::from_str_exact("0.01").unwrap()
    }

    fn assert_chained(schedule: &AmortizationSchedule) {
        for pair in schedule.installments.windows(2) {
            assert_eq!(pair[1].opening_balance, pair[0].closing_balance);
        }
    }

    #[test]
    fn test_sac_first_installment_values() {
        // 10,000 at 12% a year over 12 months: 1% a month flat
        let schedule = AmortizationCalculator::new(AmortizationSystem::Sac)
            .generate(Money::from_major(10_000), dec!(12), 12, None)
            .unwrap();

        assert_eq!(schedule.installments.len(), 12);

        let first = &schedule.installments[0];
        assert_eq!(first.opening_balance, Money::from_major(10_000));
        assert_eq!(first.interest_portion.round_dp(2), Money::from_str_exact("100.00").unwrap());
        assert_eq!(first.principal_portion.round_dp(2), Money::from_str_exact("833.33").unwrap());
        assert_eq!(first.installment().round_dp(2), Money::from_str_exact("933.33").unwrap());
        assert_eq!(first.closing_balance.round_dp(2), Money::from_str_exact("9166.67").unwrap());
    }

    #[test]
    fn test_sac_terminal_balance_and_principal_sum() {
        let principal = Money::from_major(10_000);
        let schedule = AmortizationCalculator::new(AmortizationSystem::Sac)
            .generate(principal, dec!(12), 12, None)
            .unwrap();

        assert_chained(&schedule);

        let last = schedule.installments.last().unwrap();
        assert!(last.closing_balance.abs() < cent());

        let principal_sum = schedule
            .installments
            .iter()
            .map(|r| r.principal_portion)
            .fold(Money::ZERO, |acc, x| acc + x);
        assert!((principal_sum - principal).abs() < cent());
    }

    #[test]
    fn test_sac_balance_strictly_decreases() {
        let schedule = AmortizationCalculator::new(AmortizationSystem::Sac)
            .generate(Money::from_major(360_000), dec!(10.5), 420, None)
            .unwrap();

        for row in &schedule.installments {
            assert!(row.closing_balance < row.opening_balance);
        }
    }

    #[test]
    fn test_price_two_period_schedule() {
        // 1,000 at 12% over 2 months: 1% a month, annuity installment 507.51
        let schedule = AmortizationCalculator::new(AmortizationSystem::Price)
            .generate(Money::from_major(1_000), dec!(12), 2, None)
            .unwrap();

        let installment = schedule.installment_value.unwrap();
        assert_eq!(installment.round_dp(2), Money::from_str_exact("507.51").unwrap());

        let first = &schedule.installments[0];
        assert_eq!(first.interest_portion.round_dp(2), Money::from_str_exact("10.00").unwrap());
        assert_eq!(
            first.principal_portion.round_dp(2),
            Money::from_str_exact("497.51").unwrap()
        );

        let last = schedule.installments.last().unwrap();
        assert!(last.closing_balance.abs() < cent());
    }

    #[test]
    fn test_price_principal_portion_grows() {
        let schedule = AmortizationCalculator::new(AmortizationSystem::Price)
            .generate(Money::from_major(100_000), dec!(12), 120, None)
            .unwrap();

        assert_chained(&schedule);

        for pair in schedule.installments.windows(2) {
            assert!(pair[1].principal_portion >= pair[0].principal_portion);
        }
    }

    #[test]
    fn test_price_solver_round_trip_long_term() {
        // 50-year term, the solved installment still closes the balance
        let schedule = AmortizationCalculator::new(AmortizationSystem::Price)
            .generate(Money::from_major(500_000), dec!(9), 600, None)
            .unwrap();

        let last = schedule.installments.last().unwrap();
        assert!(last.closing_balance.abs() < cent());
    }

    #[test]
    fn test_price_arbitrary_installment_leaves_residual() {
        // caller-supplied installment below the annuity value leaves debt open
        let schedule = AmortizationCalculator::new(AmortizationSystem::Price)
            .generate(
                Money::from_major(1_000),
                dec!(12),
                2,
                Some(Money::from_major(500)),
            )
            .unwrap();

        let last = schedule.installments.last().unwrap();
        assert!(last.closing_balance > cent());
    }

    #[test]
    fn test_zero_rate_equal_installments() {
        for system in [AmortizationSystem::Sac, AmortizationSystem::Price] {
            let schedule = AmortizationCalculator::new(system)
                .generate(Money::from_major(1_200), dec!(0), 12, None)
                .unwrap();

            for row in &schedule.installments {
                assert_eq!(row.interest_portion, Money::ZERO);
                assert_eq!(row.principal_portion, Money::from_major(100));
            }
            let last = schedule.installments.last().unwrap();
            assert!(last.closing_balance.abs() < cent());
        }
    }

    #[test]
    fn test_generate_is_idempotent() {
        let calculator = AmortizationCalculator::new(AmortizationSystem::Price);
        let a = calculator
            .generate(Money::from_major(25_000), dec!(18.5), 48, None)
            .unwrap();
        let b = calculator
            .generate(Money::from_major(25_000), dec!(18.5), 48, None)
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_invalid_inputs_name_the_field() {
        let calculator = AmortizationCalculator::new(AmortizationSystem::Sac);

        let err = calculator
            .generate(Money::from_major(-100), dec!(10), 12, None)
            .unwrap_err();
        assert_eq!(err.field(), "principal");

        let err = calculator
            .generate(Money::from_major(100), dec!(10), 0, None)
            .unwrap_err();
        assert_eq!(err.field(), "term_months");

        let err = calculator
            .generate(Money::from_major(100), dec!(-10), 12, None)
            .unwrap_err();
        assert_eq!(err.field(), "annual_rate_percent");
    }

    #[test]
    fn test_balance_after_accessor() {
        let schedule = AmortizationCalculator::new(AmortizationSystem::Sac)
            .generate(Money::from_major(1_200), dec!(0), 12, None)
            .unwrap();

        assert_eq!(schedule.balance_after(6), Money::from_major(600));
        // out of range falls back to the opening principal
        assert_eq!(schedule.balance_after(0), Money::from_major(1_200));
    }

    #[test]
    fn test_export_column_names() {
        let schedule = AmortizationCalculator::new(AmortizationSystem::Sac)
            .generate(Money::from_major(1_200), dec!(12), 2, None)
            .unwrap();

        let json = serde_json::to_string(&schedule.installments[0]).unwrap();
        let columns = ["numero", "saldoInicial", "juros", "amortizacao", "saldoFinal"];
        let mut previous = 0;
        for column in columns {
            let position = json
                .find(&format!("\"{column}\""))
                .unwrap_or_else(|| panic!("missing column {column}"));
            assert!(position >= previous, "column {column} out of order");
            previous = position;
        }
    }
}
