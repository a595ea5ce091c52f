//! Conversions between liquidity, position size and token amounts.

use super::reserves::reserves_for_price;
use crate::domain::{Fraction, Lendgine, LendgineState, Position, Price};
use crate::error::EngineError;

fn token_label(lendgine: &Lendgine, token0: bool) -> String {
    let token = if token0 {
        &lendgine.token0
    } else {
        &lendgine.token1
    };
    format!("{} in lendgine {}", token, lendgine.address)
}

/// Liquidity represented by one unit of position size.
///
/// Before any position exists the two are one to one.
pub fn liquidity_per_position(state: &LendgineState) -> Fraction {
    state
        .total_liquidity_supplied()
        .checked_div(&state.total_position_size)
        .unwrap_or_else(Fraction::one)
}

pub fn position_size_for_liquidity(
    state: &LendgineState,
    liquidity: &Fraction,
) -> Result<Fraction, EngineError> {
    liquidity
        .checked_div(&liquidity_per_position(state))
        .ok_or_else(|| EngineError::ZeroReserve("liquidity per position".to_string()))
}

pub fn liquidity_for_position_size(state: &LendgineState, size: &Fraction) -> Fraction {
    size * liquidity_per_position(state)
}

/// Liquidity and token amounts for `amount` of one token, priced either off
/// the pool's reserves or, for an empty pool, off the bonding curve at `price`.
fn size_for_amount(
    lendgine: &Lendgine,
    state: &LendgineState,
    price: &Price,
    amount: &Fraction,
    is_token0: bool,
) -> Result<Position, EngineError> {
    if !amount.is_positive() {
        return Err(EngineError::NegativeAmount(amount.to_string()));
    }

    let (liquidity, paired) = if state.is_empty() {
        let per_liquidity = reserves_for_price(lendgine, price)?;
        let liquidity = amount
            .checked_div(per_liquidity.get(is_token0))
            .ok_or_else(|| EngineError::ZeroReserve(token_label(lendgine, is_token0)))?;
        let paired = &liquidity * per_liquidity.get(!is_token0);
        tracing::trace!(lendgine = %lendgine.address, %liquidity, "sized against empty pool");
        (liquidity, paired)
    } else {
        let share = amount
            .checked_div(state.reserve(is_token0))
            .ok_or_else(|| EngineError::ZeroReserve(token_label(lendgine, is_token0)))?;
        let liquidity = &state.total_liquidity * &share;
        let paired = state.reserve(!is_token0) * &share;
        tracing::trace!(lendgine = %lendgine.address, %share, "sized against pool reserves");
        (liquidity, paired)
    };

    let position_size = position_size_for_liquidity(state, &liquidity)?;
    let (token0_amount, token1_amount) = if is_token0 {
        (amount.clone(), paired)
    } else {
        (paired, amount.clone())
    };

    Ok(Position {
        liquidity,
        position_size,
        token0_amount,
        token1_amount,
    })
}

/// Liquidity minted and paired token required to deposit `input_amount`.
///
/// Slippage is not applied; see `SlippageTolerance` for the caller's side.
pub fn amounts_for_deposit(
    lendgine: &Lendgine,
    state: &LendgineState,
    price: &Price,
    input_amount: &Fraction,
    input_is_token0: bool,
) -> Result<Position, EngineError> {
    size_for_amount(lendgine, state, price, input_amount, input_is_token0)
}

/// Liquidity to burn and paired token released to withdraw `output_amount`.
///
/// # Errors
/// `InsufficientLiquidity` when a funded pool would have to burn more
/// liquidity than it holds unborrowed.
pub fn amounts_for_withdrawal(
    lendgine: &Lendgine,
    state: &LendgineState,
    price: &Price,
    output_amount: &Fraction,
    output_is_token0: bool,
) -> Result<Position, EngineError> {
    let position = size_for_amount(lendgine, state, price, output_amount, output_is_token0)?;
    if !state.is_empty() && position.liquidity > state.total_liquidity {
        tracing::warn!(
            lendgine = %lendgine.address,
            requested = %position.liquidity,
            available = %state.total_liquidity,
            "withdrawal exceeds pool liquidity"
        );
        return Err(EngineError::InsufficientLiquidity {
            requested: position.liquidity.to_string(),
            available: state.total_liquidity.to_string(),
        });
    }
    Ok(position)
}
