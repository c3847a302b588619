pub mod cet;
pub mod compare;
pub mod decimal;
pub mod errors;
pub mod investment;
pub mod schedule;
pub mod simulate;
pub mod types;

// re-export key types
pub use cet::EffectiveCostEstimator;
pub use compare::{ComparisonRow, ContractComparator, MAX_COMPARED_CONTRACTS};
pub use decimal::{Money, Rate};
pub use errors::{EngineError, Result};
pub use investment::{YieldProjection, YieldProjector};
pub use schedule::{
    solve_installment, AmortizationCalculator, AmortizationSchedule, InstallmentRecord,
};
pub use simulate::{DraftParameters, ScheduleSimulator};
pub use types::{
    AmortizationSystem, ContractId, ContractStatus, InvestmentPosition, InvestmentStatus,
    LoanContract, PositionId,
};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
pub use uuid::Uuid;
