use crate::domain::{Address, TimeSec};
use thiserror::Error;

/// Failures of the pricing and accounting engine.
///
/// All variants describe malformed input; none are transient.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("Invalid price: {0}")]
    InvalidPrice(String),
    #[error("Invalid bound: {0}")]
    InvalidBound(String),
    #[error("Accrual target {target:?} is before last accrual {last:?}")]
    NonMonotonicTime { last: TimeSec, target: TimeSec },
    #[error("Reserve of {0} is zero")]
    ZeroReserve(String),
    #[error("Amount must be positive, got {0}")]
    NegativeAmount(String),
    #[error("Bound {bound} is shared by lendgines {lendgines:?}")]
    DuplicateBound {
        bound: String,
        lendgines: Vec<Address>,
    },
    #[error("Asset mismatch: {0}")]
    AssetMismatch(String),
    #[error("Bound {bound} is below current price {price}")]
    BoundBelowPrice { bound: String, price: String },
    #[error("Withdrawal of {requested} liquidity exceeds the {available} held by the pool")]
    InsufficientLiquidity { requested: String, available: String },
    #[error("Invalid rate curve: {0}")]
    InvalidCurve(String),
}
