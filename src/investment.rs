use chrono::{DateTime, Utc};
use hourglass_rs::SafeTimeProvider;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::errors::{EngineError, Result};
use crate::types::InvestmentPosition;

/// projected return of a fixed-income position, derived on demand
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YieldProjection {
    pub days_elapsed: u32,
    pub accrued_yield: Money,
    pub redemption_value: Money,
}

/// Projects accrued yield under the back office's simple-interest model:
/// a flat `annual / 365` daily rate with no compounding. Day count is plain
/// calendar-day subtraction, exclusive of the application date and inclusive
/// of the target date.
pub struct YieldProjector;

impl YieldProjector {
    /// project yield between two dates
    pub fn project(
        principal: Money,
        annual_rate_percent: Decimal,
        application_date: DateTime<Utc>,
        target_date: DateTime<Utc>,
    ) -> Result<YieldProjection> {
        if !principal.is_positive() {
            return Err(EngineError::invalid_input(
                "principal_applied",
                format!("must be positive, got {principal}"),
            ));
        }
        if annual_rate_percent.is_sign_negative() {
            return Err(EngineError::invalid_input(
                "annual_rate_percent",
                format!("must not be negative, got {annual_rate_percent}"),
            ));
        }

        let days = (target_date - application_date).num_days();
        if days < 0 {
            return Err(EngineError::invalid_input(
                "maturity_date",
                "must not precede application_date".to_string(),
            ));
        }

        let daily_rate_percent = annual_rate_percent / dec!(365);
        let accrued_yield = Money::from_decimal(
            principal.as_decimal() * daily_rate_percent * Decimal::from(days) / dec!(100),
        );

        Ok(YieldProjection {
            days_elapsed: days as u32,
            accrued_yield,
            redemption_value: principal + accrued_yield,
        })
    }

    /// Project a position to its maturity date, or to the current date for
    /// open-ended positions.
    pub fn project_position(
        position: &InvestmentPosition,
        time_provider: &SafeTimeProvider,
    ) -> Result<YieldProjection> {
        let target_date = position.maturity_date.unwrap_or_else(|| time_provider.now());
        Self::project(
            position.principal_applied,
            position.annual_rate_percent,
            position.application_date,
            target_date,
        )
    }
}
