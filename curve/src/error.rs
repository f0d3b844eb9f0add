use alloy_primitives::U256;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CurveError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CurveError {
    #[error("invalid curve parameters: {0}")]
    InvalidCurveParameters(String),
    #[error("cannot sell {requested} units, only {available} in supply")]
    InsufficientSupplyForSell { requested: u64, available: U256 },
    #[error("cannot buy {requested} units, only {available} left before max supply")]
    ExceedsMaxSupply { requested: u64, available: U256 },
    #[error("fee percentage {0} is above 100% (1e18)")]
    InvalidFeePercentage(U256),
    #[error("arithmetic overflow in 256-bit price computation")]
    MathOverflow,
    #[error("invalid number: {0}")]
    InvalidNumber(String),
}
