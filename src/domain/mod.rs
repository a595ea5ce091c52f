//! Domain types for the Numoen pricing engine.
//!
//! This module provides:
//! - Exact rational arithmetic via the Fraction type
//! - Domain primitives: TimeSec, Address, Asset
//! - Price, Lendgine and LendgineState snapshots

pub mod fraction;
pub mod lendgine;
pub mod price;
pub mod primitives;

pub use fraction::{Fraction, FractionParseError};
pub use lendgine::{Lendgine, LendgineState, Position};
pub use price::Price;
pub use primitives::{Address, AmountParseError, Asset, TimeSec};
