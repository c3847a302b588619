use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::decimal::Money;
use crate::errors::{EngineError, Result};

/// unique identifier for a loan contract
pub type ContractId = Uuid;

/// unique identifier for an investment position
pub type PositionId = Uuid;

/// amortization system for a loan contract
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AmortizationSystem {
    /// constant principal portion, declining installments
    Sac,
    /// constant installment (French/annuity system), growing principal portion
    Price,
}

/// loan contract status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContractStatus {
    Active,
    Settled,
    Cancelled,
}

/// investment position status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvestmentStatus {
    Active,
    Redeemed,
    Expired,
}

/// Loan contract as supplied by the persistence collaborator.
///
/// Plain data: schedules, costs and comparison rows are always derived from
/// it on demand and never stored back. Treat it as immutable once a schedule
/// has been generated; changing principal, rate or term invalidates any
/// previously computed schedule and callers must regenerate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanContract {
    pub id: ContractId,
    pub institution: String,
    pub principal: Money,
    pub annual_rate_percent: Decimal,
    pub system: AmortizationSystem,
    pub term_months: u32,
    /// fixed installment for Price contracts; solver-derived when absent
    pub installment_value: Option<Money>,
    pub iof: Money,
    pub insurance: Money,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    pub status: ContractStatus,
}

impl LoanContract {
    /// create an active SAC contract
    pub fn sac(
        institution: impl Into<String>,
        principal: Money,
        annual_rate_percent: Decimal,
        term_months: u32,
        start_date: DateTime<Utc>,
    ) -> Result<Self> {
        validate_terms(principal, annual_rate_percent, term_months)?;

        Ok(Self {
            id: Uuid::new_v4(),
            institution: institution.into(),
            principal,
            annual_rate_percent,
            system: AmortizationSystem::Sac,
            term_months,
            installment_value: None,
            iof: Money::ZERO,
            insurance: Money::ZERO,
            start_date,
            end_date: None,
            status: ContractStatus::Active,
        })
    }

    /// create an active Price contract
    ///
    /// When `installment_value` is `None` the schedule uses the annuity
    /// installment derived by the solver. A caller-supplied installment is
    /// taken as-is; the terminal balance of the resulting schedule is only
    /// guaranteed to approach zero for the solver-derived value.
    pub fn price(
        institution: impl Into<String>,
        principal: Money,
        annual_rate_percent: Decimal,
        term_months: u32,
        installment_value: Option<Money>,
        start_date: DateTime<Utc>,
    ) -> Result<Self> {
        validate_terms(principal, annual_rate_percent, term_months)?;
        if let Some(value) = installment_value {
            if !value.is_positive() {
                return Err(EngineError::invalid_input(
                    "installment_value",
                    format!("must be positive, got {value}"),
                ));
            }
        }

        Ok(Self {
            id: Uuid::new_v4(),
            institution: institution.into(),
            principal,
            annual_rate_percent,
            system: AmortizationSystem::Price,
            term_months,
            installment_value,
            iof: Money::ZERO,
            insurance: Money::ZERO,
            start_date,
            end_date: None,
            status: ContractStatus::Active,
        })
    }

    /// attach extra charges considered by the effective-cost estimate
    pub fn with_charges(mut self, iof: Money, insurance: Money) -> Result<Self> {
        if iof.is_negative() {
            return Err(EngineError::invalid_input(
                "iof",
                format!("must not be negative, got {iof}"),
            ));
        }
        if insurance.is_negative() {
            return Err(EngineError::invalid_input(
                "insurance",
                format!("must not be negative, got {insurance}"),
            ));
        }
        self.iof = iof;
        self.insurance = insurance;
        Ok(self)
    }
}

/// Fixed-income investment position as supplied by the persistence
/// collaborator. Yield projections are derived on demand, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestmentPosition {
    pub id: PositionId,
    pub institution: String,
    /// product type label (CDB, LCI, Tesouro, ...), opaque to the engine
    pub kind: String,
    pub principal_applied: Money,
    pub annual_rate_percent: Decimal,
    pub application_date: DateTime<Utc>,
    /// open-ended positions have no maturity and are projected to a given date
    pub maturity_date: Option<DateTime<Utc>>,
    pub status: InvestmentStatus,
}

impl InvestmentPosition {
    pub fn new(
        institution: impl Into<String>,
        kind: impl Into<String>,
        principal_applied: Money,
        annual_rate_percent: Decimal,
        application_date: DateTime<Utc>,
        maturity_date: Option<DateTime<Utc>>,
    ) -> Result<Self> {
        if !principal_applied.is_positive() {
            return Err(EngineError::invalid_input(
                "principal_applied",
                format!("must be positive, got {principal_applied}"),
            ));
        }
        if annual_rate_percent.is_sign_negative() {
            return Err(EngineError::invalid_input(
                "annual_rate_percent",
                format!("must not be negative, got {annual_rate_percent}"),
            ));
        }
        if let Some(maturity) = maturity_date {
            if maturity < application_date {
                return Err(EngineError::invalid_input(
                    "maturity_date",
                    "must not precede application_date".to_string(),
                ));
            }
        }

        Ok(Self {
            id: Uuid::new_v4(),
            institution: institution.into(),
            kind: kind.into(),
            principal_applied,
            annual_rate_percent,
            application_date,
            maturity_date,
            status: InvestmentStatus::Active,
        })
    }
}

/// shared preconditions for schedule generation and installment solving
pub(crate) fn validate_terms(
    principal: Money,
    annual_rate_percent: Decimal,
    term_months: u32,
) -> Result<()> {
    if !principal.is_positive() {
        return Err(EngineError::invalid_input(
            "principal",
            format!("must be positive, got {principal}"),
        ));
    }
    if annual_rate_percent.is_sign_negative() {
        return Err(EngineError::invalid_input(
            "annual_rate_percent",
            format!("must not be negative, got {annual_rate_percent}"),
        ));
    }
    if term_months == 0 {
        return Err(EngineError::invalid_input(
            "term_months",
            "must be at least 1".to_string(),
        ));
    }
    Ok(())
}
