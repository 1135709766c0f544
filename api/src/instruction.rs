use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::config::EngineConfig;
use crate::consts::*;
use crate::error::{GdaError, GdaResult};
use crate::math::U256;
use crate::state::{AuctionState, CurveParameters};
use crate::utils::{parse_uint, to_count, to_numeric};

/// The four quotes the oracle can produce.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Operation {
    /// Cumulative price of buying `quantity` units.
    BuyInputValue,
    /// Spot price after buying `quantity` units.
    BuySpotPrice,
    /// Cumulative proceeds of selling `quantity` units.
    SellOutputValue,
    /// Spot price on the sell side at `num_total_purchases + quantity`.
    SellSpotPrice,
}

impl Operation {
    pub const ALL: [Operation; 4] = [
        Operation::BuyInputValue,
        Operation::BuySpotPrice,
        Operation::SellOutputValue,
        Operation::SellSpotPrice,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Operation::BuyInputValue => "buy_input_value",
            Operation::BuySpotPrice => "buy_spot_price",
            Operation::SellOutputValue => "sell_output_value",
            Operation::SellSpotPrice => "sell_spot_price",
        }
    }
}

impl FromStr for Operation {
    type Err = GdaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operation::ALL
            .into_iter()
            .find(|op| op.name() == s)
            .ok_or_else(|| GdaError::UnsupportedOperation(s.to_string()))
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Request arguments as received: raw fixed-point integers keyed by name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OracleArgs {
    pub scale_factor: Option<U256>,
    pub decay_constant: Option<U256>,
    pub initial_price: Option<U256>,
    pub num_total_purchases: Option<U256>,
    pub time_since_start: Option<U256>,
    pub quantity: Option<U256>,

    /// Accepted for compatibility with older harnesses; not used in pricing.
    pub emission_rate: Option<U256>,
}

/// Request arguments decoded into the working domain.
#[derive(Clone, Debug, PartialEq)]
pub struct ParsedOracleArgs {
    pub params: CurveParameters,
    pub state: AuctionState,
}

impl OracleArgs {
    /// Build from `(name, value)` pairs, e.g. `[("quantity", "1000000000000000000")]`.
    pub fn from_pairs<I, K, V>(pairs: I) -> GdaResult<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut args = Self::default();
        for (name, value) in pairs {
            args.set(name.as_ref(), value.as_ref())?;
        }
        Ok(args)
    }

    /// Set one named argument from its base-10 string form.
    pub fn set(&mut self, name: &str, value: &str) -> GdaResult<()> {
        let (slot, name) = match name {
            ARG_SCALE_FACTOR => (&mut self.scale_factor, ARG_SCALE_FACTOR),
            ARG_DECAY_CONSTANT => (&mut self.decay_constant, ARG_DECAY_CONSTANT),
            ARG_INITIAL_PRICE => (&mut self.initial_price, ARG_INITIAL_PRICE),
            ARG_NUM_TOTAL_PURCHASES => (&mut self.num_total_purchases, ARG_NUM_TOTAL_PURCHASES),
            ARG_TIME_SINCE_START => (&mut self.time_since_start, ARG_TIME_SINCE_START),
            ARG_QUANTITY => (&mut self.quantity, ARG_QUANTITY),
            ARG_EMISSION_RATE => (&mut self.emission_rate, ARG_EMISSION_RATE),
            other => return Err(GdaError::UnknownArgument(other.to_string())),
        };
        *slot = Some(parse_uint(name, value)?);
        Ok(())
    }

    fn require(value: Option<U256>, name: &'static str) -> GdaResult<U256> {
        value.ok_or(GdaError::MissingArgument(name))
    }

    /// Check presence of every required argument and decode them.
    ///
    /// Curve parameters use `config.decimals`; `m`, `T` and `q` use `config.state_decimals`.
    pub fn to_struct(&self, config: &EngineConfig) -> GdaResult<ParsedOracleArgs> {
        let scale_factor = Self::require(self.scale_factor, ARG_SCALE_FACTOR)?;
        let decay_constant = Self::require(self.decay_constant, ARG_DECAY_CONSTANT)?;
        let initial_price = Self::require(self.initial_price, ARG_INITIAL_PRICE)?;
        let num_total_purchases = Self::require(self.num_total_purchases, ARG_NUM_TOTAL_PURCHASES)?;
        let time_since_start = Self::require(self.time_since_start, ARG_TIME_SINCE_START)?;
        let quantity = Self::require(self.quantity, ARG_QUANTITY)?;

        if let Some(emission_rate) = self.emission_rate {
            debug!(%emission_rate, "ignoring emission_rate");
        }

        let params = CurveParameters::new(
            to_numeric(initial_price, config.decimals)?,
            to_numeric(decay_constant, config.decimals)?,
            to_numeric(scale_factor, config.decimals)?,
        )?;
        let state = AuctionState::new(
            to_count(ARG_NUM_TOTAL_PURCHASES, num_total_purchases, config.state_decimals)?,
            to_numeric(time_since_start, config.state_decimals)?,
            to_count(ARG_QUANTITY, quantity, config.state_decimals)?,
        );

        Ok(ParsedOracleArgs { params, state })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::PreciseNumber;

    fn full_args() -> OracleArgs {
        OracleArgs::from_pairs([
            ("scale_factor", "1100000000000000000"),
            ("decay_constant", "500000000000000000"),
            ("initial_price", "2000000000000000000"),
            ("num_total_purchases", "3000000000000000000"),
            ("time_since_start", "1500000000000000000"),
            ("quantity", "2000000000000000000"),
        ])
        .unwrap()
    }

    #[test]
    fn test_operation_names() {
        for op in Operation::ALL {
            assert_eq!(op.name().parse::<Operation>().unwrap(), op);
            assert_eq!(op.to_string(), op.name());
        }
        assert_eq!(
            "buy_output_value".parse::<Operation>(),
            Err(GdaError::UnsupportedOperation("buy_output_value".to_string()))
        );
    }

    #[test]
    fn test_to_struct() {
        let parsed = full_args().to_struct(&EngineConfig::default()).unwrap();
        assert_eq!(parsed.params.scale_factor, PreciseNumber::from_ratio(11, 10).unwrap());
        assert_eq!(parsed.params.decay_constant, PreciseNumber::from_ratio(1, 2).unwrap());
        assert_eq!(parsed.params.initial_price, PreciseNumber::new(2).unwrap());
        assert_eq!(parsed.state.num_total_purchases, 3);
        assert_eq!(parsed.state.time_since_start, PreciseNumber::from_ratio(3, 2).unwrap());
        assert_eq!(parsed.state.quantity, 2);
    }

    #[test]
    fn test_unscaled_state() {
        let mut args = full_args();
        args.set("num_total_purchases", "3").unwrap();
        args.set("time_since_start", "15").unwrap();
        args.set("quantity", "2").unwrap();

        let config = EngineConfig { state_decimals: 0, ..EngineConfig::default() };
        let parsed = args.to_struct(&config).unwrap();
        assert_eq!(parsed.state, AuctionState::new(3, PreciseNumber::new(15).unwrap(), 2));
    }

    #[test]
    fn test_missing_argument() {
        let mut args = full_args();
        args.quantity = None;
        assert_eq!(
            args.to_struct(&EngineConfig::default()),
            Err(GdaError::MissingArgument("quantity"))
        );

        assert_eq!(
            OracleArgs::default().to_struct(&EngineConfig::default()),
            Err(GdaError::MissingArgument("scale_factor"))
        );
    }

    #[test]
    fn test_bad_arguments() {
        let mut args = OracleArgs::default();
        assert_eq!(
            args.set("price", "1"),
            Err(GdaError::UnknownArgument("price".to_string()))
        );
        assert!(matches!(args.set("decay_constant", "-1"), Err(GdaError::DomainViolation(_))));
        assert!(matches!(args.set("quantity", "ten"), Err(GdaError::InvalidNumber { .. })));
        assert!(args.set("emission_rate", "1").is_ok());
    }

    #[test]
    fn test_domain_violations() {
        let mut args = full_args();
        args.set("scale_factor", "1000000000000000000").unwrap();
        assert!(matches!(args.to_struct(&EngineConfig::default()), Err(GdaError::DomainViolation(_))));

        let mut args = full_args();
        args.set("quantity", "1500000000000000000").unwrap();
        assert!(matches!(args.to_struct(&EngineConfig::default()), Err(GdaError::DomainViolation(_))));
    }
}
