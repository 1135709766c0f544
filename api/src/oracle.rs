use tracing::debug;

use crate::config::EngineConfig;
use crate::curve::build_model;
use crate::encoding::encode_uint256;
use crate::error::GdaResult;
use crate::instruction::{OracleArgs, Operation};
use crate::math::U256;
use crate::utils::from_numeric;

/// Routes a named operation to the configured pricing model.
///
/// Holds only the engine configuration; every request is priced from
/// scratch, so one `Oracle` can serve any number of threads.
#[derive(Clone, Debug, Default)]
pub struct Oracle {
    config: EngineConfig,
}

impl Oracle {
    pub fn new(config: EngineConfig) -> GdaResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Price `operation` and return it in wei (floored at `config.decimals`).
    pub fn quote(&self, operation: Operation, args: &OracleArgs) -> GdaResult<U256> {
        let parsed = args.to_struct(&self.config)?;
        let model = build_model(parsed.params, &self.config)?;

        let price = match operation {
            Operation::BuyInputValue => model.cumulative_purchase_price(&parsed.state)?,
            Operation::BuySpotPrice => model.spot_price_buy(&parsed.state)?,
            Operation::SellOutputValue => model.cumulative_selling_price(&parsed.state)?,
            Operation::SellSpotPrice => model.spot_price_sell(&parsed.state)?,
        };

        let wei = from_numeric(&price, self.config.decimals)?;
        debug!(%operation, %price, %wei, "priced request");
        Ok(wei)
    }

    /// Price `operation` and return the line the harness expects on stdout.
    pub fn respond(&self, operation: Operation, args: &OracleArgs) -> GdaResult<String> {
        Ok(encode_uint256(&self.quote(operation, args)?))
    }
}
