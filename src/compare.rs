use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::cet::EffectiveCostEstimator;
use crate::decimal::Money;
use crate::errors::{EngineError, Result};
use crate::schedule::AmortizationSchedule;
use crate::types::LoanContract;

/// most contracts a single comparison view holds side by side
pub const MAX_COMPARED_CONTRACTS: usize = 3;

/// One line of the side-by-side comparison table.
///
/// Request-scoped projection of a contract; monetary fields are rounded to
/// cents for the report. The serialized names are the column contract of the
/// export collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRow {
    #[serde(rename = "banco")]
    pub institution: String,
    #[serde(rename = "taxa")]
    pub annual_rate_percent: Decimal,
    #[serde(rename = "custoFinal")]
    pub total_cost: Money,
    #[serde(rename = "valorTotalPago")]
    pub total_paid: Money,
    #[serde(rename = "cet")]
    pub cet_percent: Decimal,
}

/// Aggregates schedule and effective-cost results for one to three contracts
/// into comparison rows, in the order given.
pub struct ContractComparator;

impl ContractComparator {
    pub fn compare(contracts: &[LoanContract]) -> Result<Vec<ComparisonRow>> {
        if contracts.is_empty() || contracts.len() > MAX_COMPARED_CONTRACTS {
            return Err(EngineError::invalid_input(
                "contracts",
                format!(
                    "expected between 1 and {} contracts, got {}",
                    MAX_COMPARED_CONTRACTS,
                    contracts.len()
                ),
            ));
        }

        contracts.iter().map(Self::row).collect()
    }

    fn row(contract: &LoanContract) -> Result<ComparisonRow> {
        let schedule = AmortizationSchedule::for_contract(contract)?;
        let cet = EffectiveCostEstimator::estimate(contract, &schedule);
        let total_cost = EffectiveCostEstimator::total_cost(contract, &schedule);

        Ok(ComparisonRow {
            institution: contract.institution.clone(),
            annual_rate_percent: contract.annual_rate_percent,
            total_cost: total_cost.round_dp(2),
            total_paid: schedule.total_paid.round_dp(2),
            cet_percent: cet.as_percent().round_dp(2),
        })
    }
}
