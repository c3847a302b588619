use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::errors::Result;
use crate::schedule::{AmortizationCalculator, AmortizationSchedule};
use crate::types::AmortizationSystem;

/// Transient schedule parameters from a form that has not been saved yet.
/// Mirrors the numeric fields of a contract with no identity attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftParameters {
    pub principal: Money,
    pub annual_rate_percent: Decimal,
    pub system: AmortizationSystem,
    pub term_months: u32,
    pub installment_value: Option<Money>,
}

/// Previews a schedule before a contract exists.
///
/// Delegates to the same calculator and installment solver as the persisted
/// path, so a preview and the schedule of a contract saved with the same
/// numbers are identical by construction rather than by two formulas kept in
/// sync.
pub struct ScheduleSimulator;

impl ScheduleSimulator {
    pub fn simulate(draft: &DraftParameters) -> Result<AmortizationSchedule> {
        AmortizationCalculator::new(draft.system).generate(
            draft.principal,
            draft.annual_rate_percent,
            draft.term_months,
            draft.installment_value,
        )
    }
}
