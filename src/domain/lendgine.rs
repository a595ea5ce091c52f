//! Lendgine descriptors and their point-in-time state.

use super::fraction::Fraction;
use super::price::Price;
use super::primitives::{Address, Asset, TimeSec};
use serde::{Deserialize, Serialize};

/// A deployed leveraged-position market. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Lendgine {
    pub address: Address,
    pub token0: Asset,
    pub token1: Asset,
    /// Upper price bound, token1 per token0.
    pub bound: Price,
}

impl Lendgine {
    /// Create a lendgine whose bound is `bound` token1 per token0.
    pub fn new(address: Address, token0: Asset, token1: Asset, bound: Fraction) -> Self {
        let bound = Price::new(token0.clone(), token1.clone(), bound);
        Self {
            address,
            token0,
            token1,
            bound,
        }
    }

    /// A lendgine is long relative to `base` when its token0 is `base`.
    pub fn is_long(&self, base: &Asset) -> bool {
        &self.token0 == base
    }

    pub fn is_short(&self, base: &Asset) -> bool {
        &self.token1 == base
    }

    /// Whether `price` is expressed token1 per token0 of this lendgine.
    pub fn matches_price(&self, price: &Price) -> bool {
        price.is_oriented(&self.token0, &self.token1)
    }
}

/// On-chain snapshot of a lendgine's pooled liquidity.
///
/// The engine never mutates a snapshot; accrual produces a new one.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LendgineState {
    /// Liquidity supplied and not currently borrowed.
    pub total_liquidity: Fraction,
    pub total_liquidity_borrowed: Fraction,
    pub reserve0: Fraction,
    pub reserve1: Fraction,
    /// Total supply of position claims on the pool.
    pub total_position_size: Fraction,
    pub last_accrual: TimeSec,
}

impl LendgineState {
    pub fn is_empty(&self) -> bool {
        self.total_liquidity.is_zero()
    }

    /// Liquidity supplied overall, borrowed or not.
    pub fn total_liquidity_supplied(&self) -> Fraction {
        &self.total_liquidity + &self.total_liquidity_borrowed
    }

    pub fn reserve(&self, token0: bool) -> &Fraction {
        if token0 {
            &self.reserve0
        } else {
            &self.reserve1
        }
    }
}

/// Quantities implied by a share of a lendgine's pool.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub liquidity: Fraction,
    pub position_size: Fraction,
    pub token0_amount: Fraction,
    pub token1_amount: Fraction,
}
