//! Reserve split backing one unit of liquidity.
//!
//! A lendgine's pool satisfies `r0 + B*r1 = r1^2/4 + B^2` per unit of
//! liquidity, where `B` is the upper bound. At price `P < B` the solution is
//! `r0 = P^2`, `r1 = 2(B - P)`; at or above the bound all value sits in token0.

use crate::domain::{Fraction, Lendgine, Price};
use crate::error::EngineError;
use serde::{Deserialize, Serialize};

/// Token amounts backing one unit of liquidity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservesPerLiquidity {
    pub reserve0: Fraction,
    pub reserve1: Fraction,
}

impl ReservesPerLiquidity {
    pub fn get(&self, token0: bool) -> &Fraction {
        if token0 {
            &self.reserve0
        } else {
            &self.reserve1
        }
    }

    /// Reserves backing `liquidity` units.
    pub fn scale(&self, liquidity: &Fraction) -> (Fraction, Fraction) {
        (&self.reserve0 * liquidity, &self.reserve1 * liquidity)
    }
}

/// Fail unless the lendgine's bound is strictly positive and quoted over the
/// lendgine's own pair.
pub(crate) fn checked_bound(lendgine: &Lendgine) -> Result<&Fraction, EngineError> {
    if !lendgine.matches_price(&lendgine.bound) {
        return Err(EngineError::AssetMismatch(format!(
            "bound of lendgine {} is quoted {}/{}, expected {}/{}",
            lendgine.address,
            lendgine.bound.quote,
            lendgine.bound.base,
            lendgine.token1,
            lendgine.token0
        )));
    }
    if !lendgine.bound.value.is_positive() {
        return Err(EngineError::InvalidBound(format!(
            "{} for lendgine {}",
            lendgine.bound.value, lendgine.address
        )));
    }
    Ok(&lendgine.bound.value)
}

/// Fail unless `price` is positive and oriented token1 per token0.
pub(crate) fn checked_price<'a>(
    lendgine: &Lendgine,
    price: &'a Price,
) -> Result<&'a Fraction, EngineError> {
    if !lendgine.matches_price(price) {
        return Err(EngineError::AssetMismatch(format!(
            "price {}/{} does not match lendgine {} ({}/{})",
            price.quote, price.base, lendgine.address, lendgine.token1, lendgine.token0
        )));
    }
    if !price.value.is_positive() {
        return Err(EngineError::InvalidPrice(price.value.to_string()));
    }
    Ok(&price.value)
}

/// Reserves per unit of liquidity for `lendgine` at `price`.
///
/// `price` must already be expressed token1 per token0; inverting an external
/// quote is the caller's job.
pub fn reserves_for_price(
    lendgine: &Lendgine,
    price: &Price,
) -> Result<ReservesPerLiquidity, EngineError> {
    let bound = checked_bound(lendgine)?;
    let price = checked_price(lendgine, price)?;

    if price >= bound {
        return Ok(ReservesPerLiquidity {
            reserve0: bound * bound,
            reserve1: Fraction::zero(),
        });
    }

    Ok(ReservesPerLiquidity {
        reserve0: price * price,
        reserve1: Fraction::from_integer(2) * (bound - price),
    })
}
