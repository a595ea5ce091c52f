//! Exact rational numeric type backed by arbitrary-precision integers.
//!
//! Every value is kept reduced with a positive denominator, so structural
//! equality is value equality and hashing is consistent.

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, ToPrimitive, Zero};
use rust_decimal::Decimal as RustDecimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FractionParseError {
    #[error("malformed fraction: {0}")]
    Malformed(String),
    #[error("fraction has a zero denominator")]
    ZeroDenominator,
}

/// Lossless fraction for financial calculations.
///
/// Division is only exposed through checked methods; there is no `Div`
/// operator so a zero divisor can never panic inside the engine.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fraction {
    numer: BigInt,
    denom: BigInt,
}

impl Fraction {
    /// Create a reduced fraction. Returns `None` if `denom` is zero.
    pub fn new(numer: impl Into<BigInt>, denom: impl Into<BigInt>) -> Option<Self> {
        let denom = denom.into();
        if denom.is_zero() {
            return None;
        }
        Some(Self::reduced(numer.into(), denom))
    }

    pub fn from_integer(value: impl Into<BigInt>) -> Self {
        Fraction {
            numer: value.into(),
            denom: BigInt::one(),
        }
    }

    /// The additive identity (0).
    pub fn zero() -> Self {
        Self::from_integer(0)
    }

    /// The multiplicative identity (1).
    pub fn one() -> Self {
        Self::from_integer(1)
    }

    fn reduced(numer: BigInt, denom: BigInt) -> Self {
        let (numer, denom) = if denom.is_negative() {
            (-numer, -denom)
        } else {
            (numer, denom)
        };
        let gcd = numer.gcd(&denom);
        if gcd.is_one() {
            Fraction { numer, denom }
        } else {
            Fraction {
                numer: numer / &gcd,
                denom: denom / &gcd,
            }
        }
    }

    pub fn numer(&self) -> &BigInt {
        &self.numer
    }

    pub fn denom(&self) -> &BigInt {
        &self.denom
    }

    /// Returns true if the value is exactly zero.
    pub fn is_zero(&self) -> bool {
        self.numer.is_zero()
    }

    /// Returns true if the value is > 0.
    pub fn is_positive(&self) -> bool {
        self.numer.is_positive()
    }

    /// Returns true if the value is < 0.
    pub fn is_negative(&self) -> bool {
        self.numer.is_negative()
    }

    pub fn abs(&self) -> Self {
        Fraction {
            numer: self.numer.abs(),
            denom: self.denom.clone(),
        }
    }

    /// `self / rhs`, or `None` when `rhs` is zero.
    pub fn checked_div(&self, rhs: &Fraction) -> Option<Fraction> {
        if rhs.is_zero() {
            return None;
        }
        Some(Self::reduced(
            &self.numer * &rhs.denom,
            &self.denom * &rhs.numer,
        ))
    }

    /// `1 / self`, or `None` when `self` is zero.
    pub fn invert(&self) -> Option<Fraction> {
        if self.is_zero() {
            return None;
        }
        Some(Self::reduced(self.denom.clone(), self.numer.clone()))
    }

    /// Largest integer not greater than the value.
    pub fn floor(&self) -> BigInt {
        self.numer.div_floor(&self.denom)
    }

    /// Parse `"n/d"`, an integer, or a plain decimal such as `"1.25"`.
    ///
    /// # Errors
    /// Returns an error if the string is malformed or has a zero denominator.
    pub fn from_str_canonical(s: &str) -> Result<Self, FractionParseError> {
        let s = s.trim();
        if let Some((numer, denom)) = s.split_once('/') {
            let numer = parse_bigint(numer)?;
            let denom = parse_bigint(denom)?;
            return Fraction::new(numer, denom).ok_or(FractionParseError::ZeroDenominator);
        }

        if let Ok(integer) = BigInt::from_str(s) {
            return Ok(Fraction::from_integer(integer));
        }

        RustDecimal::from_str(s)
            .map(Fraction::from)
            .map_err(|_| FractionParseError::Malformed(s.to_string()))
    }

    /// Format as `"n"` or `"n/d"`.
    pub fn to_canonical_string(&self) -> String {
        if self.denom.is_one() {
            self.numer.to_string()
        } else {
            format!("{}/{}", self.numer, self.denom)
        }
    }

    /// Truncate toward negative infinity at `scale` fractional digits.
    ///
    /// Intended for presentation only; returns `None` when the scaled value
    /// does not fit a `rust_decimal` mantissa.
    pub fn to_decimal(&self, scale: u32) -> Option<RustDecimal> {
        let factor = BigInt::from(10u8).pow(scale);
        let scaled = (&self.numer * factor).div_floor(&self.denom);
        let mantissa = scaled.to_i128()?;
        RustDecimal::try_from_i128_with_scale(mantissa, scale).ok()
    }
}

fn parse_bigint(s: &str) -> Result<BigInt, FractionParseError> {
    BigInt::from_str(s.trim()).map_err(|_| FractionParseError::Malformed(s.to_string()))
}

impl Default for Fraction {
    fn default() -> Self {
        Fraction::zero()
    }
}

impl Ord for Fraction {
    fn cmp(&self, other: &Self) -> Ordering {
        // Denominators are always positive, so cross-multiplying keeps order.
        (&self.numer * &other.denom).cmp(&(&other.numer * &self.denom))
    }
}

impl PartialOrd for Fraction {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_canonical_string())
    }
}

impl FromStr for Fraction {
    type Err = FractionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_str_canonical(s)
    }
}

impl Serialize for Fraction {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Fraction {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Fraction::from_str_canonical(&s).map_err(serde::de::Error::custom)
    }
}

impl From<i64> for Fraction {
    fn from(value: i64) -> Self {
        Fraction::from_integer(value)
    }
}

impl From<u64> for Fraction {
    fn from(value: u64) -> Self {
        Fraction::from_integer(value)
    }
}

impl From<BigInt> for Fraction {
    fn from(value: BigInt) -> Self {
        Fraction::from_integer(value)
    }
}

impl From<RustDecimal> for Fraction {
    fn from(value: RustDecimal) -> Self {
        let denom = BigInt::from(10u8).pow(value.scale());
        Fraction::reduced(BigInt::from(value.mantissa()), denom)
    }
}

// Arithmetic operations
impl Add<&Fraction> for &Fraction {
    type Output = Fraction;

    fn add(self, rhs: &Fraction) -> Fraction {
        Fraction::reduced(
            &self.numer * &rhs.denom + &rhs.numer * &self.denom,
            &self.denom * &rhs.denom,
        )
    }
}

impl Sub<&Fraction> for &Fraction {
    type Output = Fraction;

    fn sub(self, rhs: &Fraction) -> Fraction {
        Fraction::reduced(
            &self.numer * &rhs.denom - &rhs.numer * &self.denom,
            &self.denom * &rhs.denom,
        )
    }
}

impl Mul<&Fraction> for &Fraction {
    type Output = Fraction;

    fn mul(self, rhs: &Fraction) -> Fraction {
        Fraction::reduced(&self.numer * &rhs.numer, &self.denom * &rhs.denom)
    }
}

macro_rules! forward_owned_binop {
    ($imp:ident, $method:ident) => {
        impl $imp<Fraction> for Fraction {
            type Output = Fraction;

            fn $method(self, rhs: Fraction) -> Fraction {
                (&self).$method(&rhs)
            }
        }

        impl $imp<&Fraction> for Fraction {
            type Output = Fraction;

            fn $method(self, rhs: &Fraction) -> Fraction {
                (&self).$method(rhs)
            }
        }

        impl $imp<Fraction> for &Fraction {
            type Output = Fraction;

            fn $method(self, rhs: Fraction) -> Fraction {
                self.$method(&rhs)
            }
        }
    };
}

forward_owned_binop!(Add, add);
forward_owned_binop!(Sub, sub);
forward_owned_binop!(Mul, mul);

impl Neg for Fraction {
    type Output = Fraction;

    fn neg(self) -> Fraction {
        Fraction {
            numer: -self.numer,
            denom: self.denom,
        }
    }
}

impl Neg for &Fraction {
    type Output = Fraction;

    fn neg(self) -> Fraction {
        -self.clone()
    }
}

impl std::iter::Sum for Fraction {
    fn sum<I: Iterator<Item = Fraction>>(iter: I) -> Self {
        iter.fold(Fraction::zero(), |acc, x| acc + x)
    }
}
