pub mod accrual;
pub mod error;
pub mod types;

#[cfg(feature = "schedule")]
pub mod schedule;

#[cfg(feature = "subsidy")]
pub mod subsidy;

#[cfg(feature = "simulation")]
pub mod simulation;

pub use error::SacSubsidyError;
pub use types::*;

/// Standard result type for all sac-subsidy operations
pub type SacSubsidyResult<T> = Result<T, SacSubsidyError>;
