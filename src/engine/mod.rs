//! Pure computation engine for lendgine pricing and position accounting.

pub mod accrual;
pub mod reserves;
pub mod selector;
pub mod sizing;
pub mod valuation;

pub use accrual::{accrue, borrow_rate, supply_rate, utilization, JumpRateCurve, SECONDS_PER_YEAR};
pub use reserves::{reserves_for_price, ReservesPerLiquidity};
pub use selector::{check_new_bound, next_bound, partition, Direction, LendgineSelector, Selection};
pub use sizing::{
    amounts_for_deposit, amounts_for_withdrawal, liquidity_for_position_size,
    liquidity_per_position, position_size_for_liquidity,
};
pub use valuation::{implied_price, market_tvl, position_value, value_per_liquidity};
