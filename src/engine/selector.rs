//! Picking lendgines whose bounds sit next to the current price.

use crate::domain::{Asset, Fraction, Lendgine, Price};
use crate::error::EngineError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Smallest bound at or above the price.
    Above,
    /// Largest bound strictly below the price.
    Below,
}

/// Split `lendgines` into those long and short relative to `base`.
///
/// Lendgines not involving `base` land in neither list.
pub fn partition<'a>(
    lendgines: &'a [Lendgine],
    base: &Asset,
) -> (Vec<&'a Lendgine>, Vec<&'a Lendgine>) {
    let long = lendgines.iter().filter(|l| l.is_long(base)).collect();
    let short = lendgines.iter().filter(|l| l.is_short(base)).collect();
    (long, short)
}

fn ensure_unique_bounds<'a, I>(lendgines: I) -> Result<(), EngineError>
where
    I: IntoIterator<Item = &'a Lendgine>,
{
    let mut seen: HashMap<(&Asset, &Asset, &Fraction), &Lendgine> = HashMap::new();
    for lendgine in lendgines {
        let key = (&lendgine.token0, &lendgine.token1, &lendgine.bound.value);
        if let Some(first) = seen.insert(key, lendgine) {
            tracing::warn!(
                first = %first.address,
                second = %lendgine.address,
                bound = %lendgine.bound.value,
                "duplicate lendgine bound"
            );
            return Err(EngineError::DuplicateBound {
                bound: lendgine.bound.value.to_string(),
                lendgines: vec![first.address.clone(), lendgine.address.clone()],
            });
        }
    }
    Ok(())
}

/// Find the lendgine whose bound is nearest to `price` in `direction`.
///
/// All lendgines must share one orientation matching `price`.
pub fn next_bound<'a, I>(
    price: &Price,
    lendgines: I,
    direction: Direction,
) -> Result<Option<&'a Lendgine>, EngineError>
where
    I: IntoIterator<Item = &'a Lendgine>,
{
    let candidates: Vec<&Lendgine> = lendgines.into_iter().collect();
    if let Some(mismatch) = candidates.iter().find(|l| !l.matches_price(price)) {
        return Err(EngineError::AssetMismatch(format!(
            "lendgine {} is not priced {}/{}",
            mismatch.address, price.quote, price.base
        )));
    }
    ensure_unique_bounds(candidates.iter().copied())?;

    let picked = match direction {
        Direction::Above => candidates
            .into_iter()
            .filter(|l| l.bound.value >= price.value)
            .min_by(|a, b| a.bound.value.cmp(&b.bound.value)),
        Direction::Below => candidates
            .into_iter()
            .filter(|l| l.bound.value < price.value)
            .max_by(|a, b| a.bound.value.cmp(&b.bound.value)),
    };

    tracing::trace!(
        price = %price.value,
        ?direction,
        picked = ?picked.map(|l| l.address.as_str()),
        "selected lendgine"
    );
    Ok(picked)
}

/// Default lendgine picks on either side of the price, per orientation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection<'a> {
    pub long_above: Option<&'a Lendgine>,
    pub long_below: Option<&'a Lendgine>,
    pub short_above: Option<&'a Lendgine>,
    pub short_below: Option<&'a Lendgine>,
}

impl<'a> Selection<'a> {
    /// Nearest long lendgine, preferring the one above the price.
    pub fn long(&self) -> Option<&'a Lendgine> {
        self.long_above.or(self.long_below)
    }

    pub fn short(&self) -> Option<&'a Lendgine> {
        self.short_above.or(self.short_below)
    }

    /// Lendgine to show first: longs before shorts, above before below.
    pub fn default_pick(&self) -> Option<&'a Lendgine> {
        self.long().or_else(|| self.short())
    }
}

/// Selects lendgines for a market denominated in `base`.
#[derive(Debug, Clone)]
pub struct LendgineSelector {
    base: Asset,
}

impl LendgineSelector {
    pub fn new(base: Asset) -> Self {
        Self { base }
    }

    pub fn base(&self) -> &Asset {
        &self.base
    }

    /// `price` is quoted per unit of the base asset; short lendgines are
    /// compared against its inverse.
    pub fn select<'a>(
        &self,
        price: &Price,
        lendgines: &'a [Lendgine],
    ) -> Result<Selection<'a>, EngineError> {
        if price.base != self.base {
            return Err(EngineError::AssetMismatch(format!(
                "price base {} is not selector base {}",
                price.base, self.base
            )));
        }
        let (long, short) = partition(lendgines, &self.base);
        let long: Vec<_> = long
            .into_iter()
            .filter(|l| l.token1 == price.quote)
            .collect();
        let short: Vec<_> = short
            .into_iter()
            .filter(|l| l.token0 == price.quote)
            .collect();

        let inverse = price.invert()?;
        Ok(Selection {
            long_above: next_bound(price, long.iter().copied(), Direction::Above)?,
            long_below: next_bound(price, long.iter().copied(), Direction::Below)?,
            short_above: next_bound(&inverse, short.iter().copied(), Direction::Above)?,
            short_below: next_bound(&inverse, short.iter().copied(), Direction::Below)?,
        })
    }
}

/// Validate the bound of a `token0`/`token1` lendgine about to be created.
///
/// `price` must be quoted token1 per token0, like the bound.
///
/// # Errors
/// `BoundBelowPrice` when the market already trades above `bound`, and
/// `DuplicateBound` when `existing` already has a lendgine with that pair
/// and bound.
pub fn check_new_bound(
    token0: &Asset,
    token1: &Asset,
    price: &Price,
    bound: &Fraction,
    existing: &[Lendgine],
) -> Result<(), EngineError> {
    if !bound.is_positive() {
        return Err(EngineError::InvalidBound(bound.to_string()));
    }
    if !price.is_oriented(token0, token1) {
        return Err(EngineError::AssetMismatch(format!(
            "price {}/{} does not match new lendgine {}/{}",
            price.quote, price.base, token1, token0
        )));
    }
    if !price.value.is_positive() {
        return Err(EngineError::InvalidPrice(price.value.to_string()));
    }
    if &price.value > bound {
        return Err(EngineError::BoundBelowPrice {
            bound: bound.to_string(),
            price: price.value.to_string(),
        });
    }
    if let Some(clash) = existing
        .iter()
        .find(|l| l.matches_price(price) && &l.bound.value == bound)
    {
        return Err(EngineError::DuplicateBound {
            bound: bound.to_string(),
            lendgines: vec![clash.address.clone()],
        });
    }
    Ok(())
}
