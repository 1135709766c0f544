use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{GdaError, GdaResult};
use crate::math::{PreciseNumber, PRECISION_DECIMALS, U256};
use crate::utils::to_numeric;

/// Base of the time-decay term `base^(λ·T)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecayBase {
    /// `2^(λ·T)`
    #[default]
    Two,
    /// `e^(λ·T)`
    Natural,
}

impl DecayBase {
    /// Raise the base to `exponent`. `None` once the result leaves the working range.
    pub fn raise(&self, exponent: &PreciseNumber) -> Option<PreciseNumber> {
        match self {
            DecayBase::Two => exponent.exp2(),
            DecayBase::Natural => exponent.exp(),
        }
    }
}

impl FromStr for DecayBase {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "2" | "two" => Ok(DecayBase::Two),
            "e" | "natural" => Ok(DecayBase::Natural),
            _ => Err(format!("Invalid decay base: '{}'. Use 2 or e", s)),
        }
    }
}

impl fmt::Display for DecayBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecayBase::Two => write!(f, "2"),
            DecayBase::Natural => write!(f, "e"),
        }
    }
}

/// Which pricing model the oracle instantiates for each request.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    #[default]
    ExponentialDiscrete,
}

/// Engine-wide settings. Fixed for the lifetime of an [`crate::oracle::Oracle`],
/// never supplied per request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    pub model: ModelKind,
    pub decay_base: DecayBase,

    /// Cap on `λ·T`, as an integer with `decimals` places.
    pub max_exponent: u128,

    /// Decimals of the curve parameters and of the result.
    pub decimals: u8,

    /// Decimals of `num_total_purchases`, `time_since_start` and `quantity`.
    /// Zero means they are passed as plain integers.
    pub state_decimals: u8,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            model: ModelKind::default(),
            decay_base: DecayBase::default(),
            max_exponent: MAX_TIME_EXPONENT,
            decimals: WAD_DECIMALS,
            state_decimals: WAD_DECIMALS,
        }
    }
}

impl EngineConfig {
    /// Reject settings the converter cannot honour.
    pub fn validate(&self) -> GdaResult<()> {
        for (name, decimals) in [("decimals", self.decimals), ("state_decimals", self.state_decimals)] {
            if decimals > PRECISION_DECIMALS {
                return Err(GdaError::DomainViolation(format!(
                    "{} = {} exceeds the working precision of {}",
                    name, decimals, PRECISION_DECIMALS
                )));
            }
        }
        Ok(())
    }

    /// The decay-exponent cap in the working domain.
    pub fn max_exponent(&self) -> GdaResult<PreciseNumber> {
        to_numeric(U256::from(self.max_exponent), self.decimals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.decay_base, DecayBase::Two);
        assert_eq!(config.decimals, 18);
        assert_eq!(config.state_decimals, 18);
        assert_eq!(config.max_exponent().unwrap(), PreciseNumber::new(10).unwrap());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json() {
        let config: EngineConfig =
            serde_json::from_str(r#"{ "decay_base": "natural", "state_decimals": 0 }"#).unwrap();
        assert_eq!(config.decay_base, DecayBase::Natural);
        assert_eq!(config.state_decimals, 0);
        assert_eq!(config.max_exponent, MAX_TIME_EXPONENT);
        assert_eq!(config.model, ModelKind::ExponentialDiscrete);

        assert!(serde_json::from_str::<EngineConfig>(r#"{ "decay": "two" }"#).is_err());
    }

    #[test]
    fn test_validate() {
        let config = EngineConfig { state_decimals: 30, ..EngineConfig::default() };
        assert!(matches!(config.validate(), Err(GdaError::DomainViolation(_))));
    }

    #[test]
    fn test_decay_base_from_str() {
        assert_eq!("2".parse::<DecayBase>().unwrap(), DecayBase::Two);
        assert_eq!("e".parse::<DecayBase>().unwrap(), DecayBase::Natural);
        assert_eq!("natural".parse::<DecayBase>().unwrap(), DecayBase::Natural);
        assert!("10".parse::<DecayBase>().is_err());
    }
}
