//! Exchange rates between two assets.

use super::fraction::Fraction;
use super::primitives::Asset;
use crate::error::EngineError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Amount of `quote` per one unit of `base`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Price {
    pub base: Asset,
    pub quote: Asset,
    pub value: Fraction,
}

impl Price {
    pub fn new(base: Asset, quote: Asset, value: Fraction) -> Self {
        Self { base, quote, value }
    }

    /// Swap base and quote.
    ///
    /// # Errors
    /// A zero price has no inverse.
    pub fn invert(&self) -> Result<Price, EngineError> {
        let value = self
            .value
            .invert()
            .ok_or_else(|| EngineError::InvalidPrice(self.value.to_string()))?;
        Ok(Price {
            base: self.quote.clone(),
            quote: self.base.clone(),
            value,
        })
    }

    /// Convert an amount of base into quote.
    pub fn quote(&self, base_amount: &Fraction) -> Fraction {
        base_amount * &self.value
    }

    /// True when both prices are expressed over the same ordered pair.
    pub fn same_pair(&self, other: &Price) -> bool {
        self.base == other.base && self.quote == other.quote
    }

    pub fn is_oriented(&self, base: &Asset, quote: &Asset) -> bool {
        &self.base == base && &self.quote == quote
    }
}

impl PartialOrd for Price {
    /// Prices over different pairs are incomparable.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if !self.same_pair(other) {
            return None;
        }
        Some(self.value.cmp(&other.value))
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}/{}", self.value, self.quote, self.base)
    }
}
