use crate::domain::Fraction;
use crate::engine::JumpRateCurve;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Caller-owned parameters passed into engine calls.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Config {
    pub rate_curve: JumpRateCurve,
    pub slippage: SlippageTolerance,
}

/// Fraction of a quoted amount the caller is willing to give up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlippageTolerance(Fraction);

impl SlippageTolerance {
    /// # Errors
    /// The tolerance must lie in `[0, 1)`.
    pub fn new(tolerance: Fraction) -> Result<Self, ConfigError> {
        if tolerance.is_negative() || tolerance >= Fraction::one() {
            return Err(ConfigError::InvalidValue(
                "NUMOEN_SLIPPAGE".to_string(),
                format!("must be in [0, 1), got {}", tolerance),
            ));
        }
        Ok(SlippageTolerance(tolerance))
    }

    pub fn as_fraction(&self) -> &Fraction {
        &self.0
    }

    /// Lowest amount still acceptable for a quote of `amount`.
    pub fn min_acceptable(&self, amount: &Fraction) -> Fraction {
        amount * (Fraction::one() - &self.0)
    }
}

impl Default for SlippageTolerance {
    fn default() -> Self {
        SlippageTolerance(Fraction::new(1, 200).unwrap_or_default())
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_map(std::env::vars().collect())
    }

    pub fn from_env_map(env_map: HashMap<String, String>) -> Result<Self, ConfigError> {
        let defaults = JumpRateCurve::default();
        let kink = parse_fraction(&env_map, "NUMOEN_KINK")?.unwrap_or(defaults.kink);
        let multiplier =
            parse_fraction(&env_map, "NUMOEN_MULTIPLIER")?.unwrap_or(defaults.multiplier);
        let jump_multiplier = parse_fraction(&env_map, "NUMOEN_JUMP_MULTIPLIER")?
            .unwrap_or(defaults.jump_multiplier);

        let rate_curve = JumpRateCurve::new(kink, multiplier, jump_multiplier)
            .map_err(|e| ConfigError::InvalidValue("rate curve".to_string(), e.to_string()))?;

        let slippage = match parse_fraction(&env_map, "NUMOEN_SLIPPAGE")? {
            Some(value) => SlippageTolerance::new(value)?,
            None => SlippageTolerance::default(),
        };

        Ok(Config {
            rate_curve,
            slippage,
        })
    }
}

fn parse_fraction(
    env_map: &HashMap<String, String>,
    key: &str,
) -> Result<Option<Fraction>, ConfigError> {
    env_map
        .get(key)
        .map(|s| {
            Fraction::from_str_canonical(s).map_err(|e| {
                ConfigError::InvalidValue(key.to_string(), format!("must be a fraction: {}", e))
            })
        })
        .transpose()
}
