//! Valuing pooled liquidity from a lendgine snapshot.

use super::reserves::{checked_bound, reserves_for_price};
use crate::domain::{Asset, Fraction, Lendgine, LendgineState, Price};
use crate::error::EngineError;

/// Price, token1 per token0, implied by the snapshot's reserves.
///
/// Inverts `r1 = 2(B - P)` per unit of liquidity.
pub fn implied_price(lendgine: &Lendgine, state: &LendgineState) -> Result<Price, EngineError> {
    let bound = checked_bound(lendgine)?;
    let reserve1_per_liquidity = state
        .reserve1
        .checked_div(&state.total_liquidity)
        .ok_or_else(|| EngineError::ZeroReserve(format!("liquidity of {}", lendgine.address)))?;
    let half = Fraction::new(1, 2).unwrap_or_default();
    let value = bound - reserve1_per_liquidity * half;
    if !value.is_positive() {
        return Err(EngineError::InvalidPrice(value.to_string()));
    }
    Ok(Price::new(
        lendgine.token0.clone(),
        lendgine.token1.clone(),
        value,
    ))
}

/// Value of one unit of liquidity at `price`, in token0.
///
/// Along the curve `-dr0/dr1 = P`, so one token1 trades for `P` token0 at
/// the margin.
pub fn value_per_liquidity(lendgine: &Lendgine, price: &Price) -> Result<Fraction, EngineError> {
    let per_liquidity = reserves_for_price(lendgine, price)?;
    Ok(per_liquidity.reserve0 + &price.value * &per_liquidity.reserve1)
}

/// Token amounts owned by `liquidity` out of the pool's unborrowed liquidity.
pub fn position_value(state: &LendgineState, liquidity: &Fraction) -> (Fraction, Fraction) {
    match liquidity.checked_div(&state.total_liquidity) {
        Some(share) => (&state.reserve0 * &share, &state.reserve1 * &share),
        None => (Fraction::zero(), Fraction::zero()),
    }
}

/// Total value of supplied liquidity across a market's lendgines, in `base`.
///
/// Each lendgine is valued at the price implied by its own reserves. Empty
/// pools contribute nothing.
pub fn market_tvl(
    entries: &[(Lendgine, LendgineState)],
    base: &Asset,
) -> Result<Fraction, EngineError> {
    let mut total = Fraction::zero();
    for (lendgine, state) in entries {
        if !lendgine.is_long(base) && !lendgine.is_short(base) {
            return Err(EngineError::AssetMismatch(format!(
                "lendgine {} does not trade {}",
                lendgine.address, base
            )));
        }
        if state.is_empty() {
            continue;
        }

        let price = implied_price(lendgine, state)?;
        let value_in_token0 =
            value_per_liquidity(lendgine, &price)? * state.total_liquidity_supplied();
        let value = if lendgine.is_long(base) {
            value_in_token0
        } else {
            value_in_token0
                .checked_div(&price.value)
                .ok_or_else(|| EngineError::InvalidPrice(price.value.to_string()))?
        };
        total = total + value;
    }
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Address;

    fn f(n: i64, d: i64) -> Fraction {
        Fraction::new(n, d).unwrap()
    }

    fn lendgine() -> Lendgine {
        Lendgine::new(
            Address::new("0x1"),
            Asset::new(Address::new("0xa"), 18),
            Asset::new(Address::new("0xb"), 18),
            f(4, 1),
        )
    }

    #[test]
    fn test_implied_price_recovers_curve_price() {
        let l = lendgine();
        // 10 liquidity at P = 2: r0 = 40, r1 = 40.
        let state = LendgineState {
            total_liquidity: f(10, 1),
            reserve0: f(40, 1),
            reserve1: f(40, 1),
            ..Default::default()
        };
        assert_eq!(implied_price(&l, &state).unwrap().value, f(2, 1));
    }

    #[test]
    fn test_implied_price_of_empty_pool_fails() {
        let err = implied_price(&lendgine(), &LendgineState::default()).unwrap_err();
        assert!(matches!(err, EngineError::ZeroReserve(_)));
    }

    #[test]
    fn test_value_per_liquidity() {
        let l = lendgine();
        let price = Price::new(l.token0.clone(), l.token1.clone(), f(2, 1));
        // r0 = 4, plus r1 = 4 worth 8 token0.
        assert_eq!(value_per_liquidity(&l, &price).unwrap(), f(12, 1));
    }

    #[test]
    fn test_value_per_liquidity_rises_to_bound() {
        let l = lendgine();
        let values: Vec<Fraction> = [f(1, 2), f(1, 1), f(2, 1), f(3, 1), f(4, 1), f(5, 1)]
            .into_iter()
            .map(|p| {
                let price = Price::new(l.token0.clone(), l.token1.clone(), p);
                value_per_liquidity(&l, &price).unwrap()
            })
            .collect();
        assert_eq!(
            values,
            vec![f(15, 4), f(7, 1), f(12, 1), f(15, 1), f(16, 1), f(16, 1)]
        );
    }

    #[test]
    fn test_market_tvl_keeps_token0_value_for_base() {
        let l = lendgine();
        let state = LendgineState {
            total_liquidity: f(10, 1),
            reserve0: f(40, 1),
            reserve1: f(40, 1),
            ..Default::default()
        };
        let base = l.token0.clone();
        assert_eq!(market_tvl(&[(l, state)], &base).unwrap(), f(120, 1));
    }

    #[test]
    fn test_position_value() {
        let state = LendgineState {
            total_liquidity: f(10, 1),
            reserve0: f(40, 1),
            reserve1: f(20, 1),
            ..Default::default()
        };
        assert_eq!(position_value(&state, &f(5, 2)), (f(10, 1), f(5, 1)));
        assert_eq!(
            position_value(&LendgineState::default(), &f(1, 1)),
            (Fraction::zero(), Fraction::zero())
        );
    }
}
