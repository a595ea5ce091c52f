//! Time-based interest accrual against borrowed liquidity.

use super::reserves::reserves_for_price;
use crate::domain::{Fraction, Lendgine, LendgineState, Price, TimeSec};
use crate::error::EngineError;
use serde::{Deserialize, Serialize};

/// Rates on the curve are annual; accrual works per second.
pub const SECONDS_PER_YEAR: i64 = 365 * 24 * 60 * 60;

/// Two-segment "jump rate" borrow curve.
///
/// Below `kink` utilization the annual rate is `u * multiplier`; above it the
/// excess utilization is charged at `jump_multiplier`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JumpRateCurve {
    pub kink: Fraction,
    pub multiplier: Fraction,
    pub jump_multiplier: Fraction,
}

impl JumpRateCurve {
    /// # Errors
    /// Rejects a kink outside `(0, 1]` and negative slopes.
    pub fn new(
        kink: Fraction,
        multiplier: Fraction,
        jump_multiplier: Fraction,
    ) -> Result<Self, EngineError> {
        let curve = Self {
            kink,
            multiplier,
            jump_multiplier,
        };
        curve.validate()?;
        Ok(curve)
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if !self.kink.is_positive() || self.kink > Fraction::one() {
            return Err(EngineError::InvalidCurve(format!(
                "kink must be in (0, 1], got {}",
                self.kink
            )));
        }
        if self.multiplier.is_negative() || self.jump_multiplier.is_negative() {
            return Err(EngineError::InvalidCurve(
                "slopes must be non-negative".to_string(),
            ));
        }
        Ok(())
    }

    /// Annual borrow rate at utilization `u`.
    pub fn annual_rate(&self, utilization: &Fraction) -> Fraction {
        if utilization <= &self.kink {
            utilization * &self.multiplier
        } else {
            let normal = &self.kink * &self.multiplier;
            let excess = utilization - &self.kink;
            normal + excess * &self.jump_multiplier
        }
    }

    pub fn rate_per_second(&self, utilization: &Fraction) -> Fraction {
        self.annual_rate(utilization) * seconds_per_year_inverse()
    }
}

impl Default for JumpRateCurve {
    fn default() -> Self {
        Self {
            kink: Fraction::new(4, 5).unwrap_or_default(),
            multiplier: Fraction::new(11, 8).unwrap_or_default(),
            jump_multiplier: Fraction::new(89, 2).unwrap_or_default(),
        }
    }
}

fn seconds_per_year_inverse() -> Fraction {
    Fraction::new(1, SECONDS_PER_YEAR).unwrap_or_default()
}

/// Share of supplied liquidity that is currently borrowed.
pub fn utilization(state: &LendgineState) -> Fraction {
    state
        .total_liquidity_borrowed
        .checked_div(&state.total_liquidity_supplied())
        .unwrap_or_default()
}

/// Annual borrow rate paid by borrowers of this pool.
pub fn borrow_rate(curve: &JumpRateCurve, state: &LendgineState) -> Fraction {
    curve.annual_rate(&utilization(state))
}

/// Annual rate earned by suppliers: the borrow rate diluted by utilization.
pub fn supply_rate(curve: &JumpRateCurve, state: &LendgineState) -> Fraction {
    let u = utilization(state);
    curve.annual_rate(&u) * u
}

/// Advance `state` to `target_time`, returning a new snapshot.
///
/// Interest grows `total_liquidity`; reserves are re-derived for the grown
/// liquidity at `price`. A zero elapsed time or an unborrowed pool only moves
/// the timestamp, so repeating a call with the same target is a no-op.
pub fn accrue(
    lendgine: &Lendgine,
    state: &LendgineState,
    target_time: TimeSec,
    curve: &JumpRateCurve,
    price: &Price,
) -> Result<LendgineState, EngineError> {
    let elapsed = target_time.as_i64() - state.last_accrual.as_i64();
    if elapsed < 0 {
        return Err(EngineError::NonMonotonicTime {
            last: state.last_accrual,
            target: target_time,
        });
    }

    if elapsed == 0 || state.total_liquidity_borrowed.is_zero() {
        return Ok(LendgineState {
            last_accrual: target_time,
            ..state.clone()
        });
    }

    curve.validate()?;
    let per_liquidity = reserves_for_price(lendgine, price)?;

    let u = utilization(state);
    let rate = curve.rate_per_second(&u);
    let interest = &state.total_liquidity_borrowed * rate * Fraction::from_integer(elapsed);
    let total_liquidity = &state.total_liquidity + &interest;
    let (reserve0, reserve1) = per_liquidity.scale(&total_liquidity);

    tracing::debug!(
        lendgine = %lendgine.address,
        elapsed,
        utilization = %u,
        interest = %interest,
        "accrued lendgine interest"
    );

    Ok(LendgineState {
        total_liquidity,
        total_liquidity_borrowed: state.total_liquidity_borrowed.clone(),
        reserve0,
        reserve1,
        total_position_size: state.total_position_size.clone(),
        last_accrual: target_time,
    })
}
