//! Domain primitives: TimeSec, Address, Asset.

use super::fraction::Fraction;
use num_bigint::BigInt;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Time in seconds since Unix epoch, as reported by block timestamps.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct TimeSec(pub i64);

impl TimeSec {
    /// Create a TimeSec from seconds.
    pub fn new(secs: i64) -> Self {
        TimeSec(secs)
    }

    /// Get the underlying seconds value.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

/// Contract address (hex string), compared case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Address(String);

impl Address {
    /// Create an Address, normalizing to lowercase.
    pub fn new(addr: impl Into<String>) -> Self {
        Address(addr.into().trim().to_lowercase())
    }

    /// Get the address as a string reference.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountParseError {
    #[error("invalid amount: {0}")]
    Invalid(String),
    #[error("amount {amount} has more than {decimals} decimal places")]
    TooPrecise { amount: String, decimals: u8 },
}

/// A token: an opaque address plus the number of decimal subunits per unit.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Asset {
    pub address: Address,
    pub decimals: u8,
}

impl Asset {
    pub fn new(address: Address, decimals: u8) -> Self {
        Self { address, decimals }
    }

    fn unit(&self) -> BigInt {
        BigInt::from(10u8).pow(u32::from(self.decimals))
    }

    /// Parse a human-entered amount (e.g. `"1.5"`) into whole units.
    ///
    /// # Errors
    /// Fails on malformed input or on more fractional digits than the asset
    /// can represent.
    pub fn parse_amount(&self, input: &str) -> Result<Fraction, AmountParseError> {
        let trimmed = input.trim();
        if trimmed.contains('/') {
            return Err(AmountParseError::Invalid(trimmed.to_string()));
        }
        let amount = Fraction::from_str_canonical(trimmed)
            .map_err(|_| AmountParseError::Invalid(trimmed.to_string()))?;

        let subunits = &amount * Fraction::from_integer(self.unit());
        if subunits.denom() != &BigInt::from(1) {
            return Err(AmountParseError::TooPrecise {
                amount: trimmed.to_string(),
                decimals: self.decimals,
            });
        }
        Ok(amount)
    }

    /// Scale whole units into integer subunits, flooring any remainder.
    pub fn to_subunits(&self, amount: &Fraction) -> BigInt {
        (amount * Fraction::from_integer(self.unit())).floor()
    }

    /// Scale integer subunits back into whole units.
    pub fn from_subunits(&self, subunits: impl Into<BigInt>) -> Fraction {
        Fraction::new(subunits.into(), self.unit()).unwrap_or_default()
    }
}

impl std::fmt::Display for Asset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.address)
    }
}
