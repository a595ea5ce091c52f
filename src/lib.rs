pub mod config;
pub mod domain;
pub mod engine;
pub mod error;

pub use config::{Config, SlippageTolerance};
pub use domain::{
    Address, Asset, Fraction, Lendgine, LendgineState, Position, Price, TimeSec,
};
pub use engine::{
    accrue, amounts_for_deposit, amounts_for_withdrawal, next_bound, reserves_for_price,
    Direction, JumpRateCurve, LendgineSelector,
};
pub use error::EngineError;
