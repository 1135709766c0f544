use tracing::debug;

use crate::config::{DecayBase, EngineConfig, ModelKind};
use crate::error::{GdaError, GdaResult};
use crate::math::PreciseNumber;
use crate::state::{AuctionState, CurveParameters};

const PURCHASE: &str = "cumulative purchase price";
const SALE: &str = "cumulative selling price";
const SPOT_BUY: &str = "buy spot price";
const SPOT_SELL: &str = "sell spot price";

/// Pricing capability of a discrete Gradual Dutch Auction.
///
/// Every method is a pure function of the model's parameters and `state`.
pub trait DiscreteGda {
    /// Total cost of buying `q` units after `m` have been sold.
    fn cumulative_purchase_price(&self, state: &AuctionState) -> GdaResult<PreciseNumber>;

    /// Total proceeds of selling `q` units when `m` have been sold.
    fn cumulative_selling_price(&self, state: &AuctionState) -> GdaResult<PreciseNumber>;

    /// Price of the next unit once `q` more have been bought.
    fn spot_price_buy(&self, state: &AuctionState) -> GdaResult<PreciseNumber>;

    /// Price of the marginal unit on the sell side at supply `m + q`.
    fn spot_price_sell(&self, state: &AuctionState) -> GdaResult<PreciseNumber>;
}

/// Instantiate the model selected by `config`.
pub fn build_model(
    params: CurveParameters,
    config: &EngineConfig,
) -> GdaResult<Box<dyn DiscreteGda + Send + Sync>> {
    debug!(model = ?config.model, decay_base = %config.decay_base, "building pricing model");
    match config.model {
        ModelKind::ExponentialDiscrete => {
            Ok(Box::new(ExponentialDiscreteGda::from_config(params, config)?))
        }
    }
}

/// Caps the decay exponent `λ·T` so the decay factor stays inside the working range.
///
/// Past the cap the auction prices as if exactly `max_exponent` worth of
/// decay had elapsed.
#[derive(Clone, Debug, PartialEq)]
pub struct StabilityGuard {
    pub max_exponent: PreciseNumber,
}

impl StabilityGuard {
    pub fn new(max_exponent: PreciseNumber) -> Self {
        Self { max_exponent }
    }

    pub fn is_saturated(&self, exponent: &PreciseNumber) -> bool {
        exponent.greater_than(&self.max_exponent)
    }

    /// `min(exponent, max_exponent)`
    pub fn clamp(&self, exponent: PreciseNumber) -> PreciseNumber {
        if self.is_saturated(&exponent) {
            self.max_exponent.clone()
        } else {
            exponent
        }
    }

    /// `clamp(λ·T)`. A product too large for the working range is saturated as well.
    pub fn decay_exponent(
        &self,
        decay_constant: &PreciseNumber,
        time_since_start: &PreciseNumber,
    ) -> PreciseNumber {
        match decay_constant.checked_mul(time_since_start) {
            Some(exponent) if !self.is_saturated(&exponent) => exponent,
            exponent => {
                debug!(
                    exponent = %exponent.map_or_else(|| "overflow".to_string(), |e| e.to_string()),
                    max_exponent = %self.max_exponent,
                    "decay exponent saturated"
                );
                self.max_exponent.clone()
            }
        }
    }
}

/// Discrete GDA with exponential price scaling per unit and exponential decay over time.
///
/// With `D = base^clamp(λ·T)`:
///
/// ```text
/// purchase(m, T, q) = k · α^m · (α^q − 1) / (D · (α − 1))
/// sale(m, T, q)     = k · D / α^(m+q−1) · (α^q − 1) / (α − 1)
/// spot_buy(m, T, q) = k · α^(m+q) / D
/// spot_sell(m, T, q) = k · D / α^(m+q)
/// ```
///
/// Sell-side prices fall to zero once `α^(m+q)` outgrows the working range.
/// A buy-side price that does not fit the working range cannot fit 256 bits of
/// wei either and is reported as [`GdaError::EncodingOverflow`].
#[derive(Clone, Debug)]
pub struct ExponentialDiscreteGda {
    pub params: CurveParameters,
    pub decay_base: DecayBase,
    pub guard: StabilityGuard,
}

impl ExponentialDiscreteGda {
    pub fn new(params: CurveParameters, decay_base: DecayBase, guard: StabilityGuard) -> Self {
        Self { params, decay_base, guard }
    }

    pub fn from_config(params: CurveParameters, config: &EngineConfig) -> GdaResult<Self> {
        let guard = StabilityGuard::new(config.max_exponent()?);
        Ok(Self::new(params, config.decay_base, guard))
    }

    /// `D = base^clamp(λ·T)`
    fn decay_factor(&self, state: &AuctionState, what: &'static str) -> GdaResult<PreciseNumber> {
        let exponent = self
            .guard
            .decay_exponent(&self.params.decay_constant, &state.time_since_start);
        self.decay_base
            .raise(&exponent)
            .ok_or(GdaError::ArithmeticOverflow(what))
    }

    /// `α^n`
    fn scale(&self, n: u64) -> Option<PreciseNumber> {
        self.params.scale_factor.pow(n)
    }

    /// `α − 1`
    fn scale_step(&self) -> GdaResult<PreciseNumber> {
        self.params
            .scale_factor
            .checked_sub(&PreciseNumber::one())
            .ok_or_else(|| GdaError::DomainViolation("scale_factor must be greater than 1".to_string()))
    }

    /// `value · α^n`, splitting the power when `α^n` alone leaves the working range.
    /// `None` only when the product itself does.
    fn mul_scale(&self, value: &PreciseNumber, n: u64) -> Option<PreciseNumber> {
        if value.is_zero() || n == 0 {
            return Some(value.clone());
        }
        match self.scale(n) {
            Some(scale) => value.checked_mul(&scale),
            None => {
                let half = n / 2;
                self.mul_scale(&self.mul_scale(value, n - half)?, half)
            }
        }
    }

    /// `value / α^n`. Shrinks towards zero instead of failing when `α^n` is out of range.
    fn div_scale(&self, value: &PreciseNumber, n: u64) -> Option<PreciseNumber> {
        if value.is_zero() || n == 0 {
            return Some(value.clone());
        }
        match self.scale(n) {
            Some(scale) => value.checked_div(&scale),
            None => {
                let half = n / 2;
                self.div_scale(&self.div_scale(value, n - half)?, half)
            }
        }
    }
}

impl DiscreteGda for ExponentialDiscreteGda {
    fn cumulative_purchase_price(&self, state: &AuctionState) -> GdaResult<PreciseNumber> {
        let decay = self.decay_factor(state, PURCHASE)?;
        let step = self.scale_step()?;
        let k = &self.params.initial_price;
        let m = state.num_total_purchases;
        let n = state.supply_after()?;

        let direct = || {
            let batch = self.scale(state.quantity)?.checked_sub(&PreciseNumber::one())?;
            self.mul_scale(&k.checked_mul(&batch)?, m)?
                .checked_div(&decay.checked_mul(&step)?)
        };
        // k / (D·(α − 1)) · (α^(m+q) − α^m), for when k·α^m·(α^q − 1) leaves the working range
        let split = || {
            let unit = k.checked_div(&decay)?.checked_div(&step)?;
            let high = self.mul_scale(&unit, n)?;
            high.checked_sub(&self.mul_scale(&unit, m)?)
        };

        direct().or_else(split).ok_or(GdaError::EncodingOverflow)
    }

    fn cumulative_selling_price(&self, state: &AuctionState) -> GdaResult<PreciseNumber> {
        // k·D·α/(α − 1) · (1 − α^−q) / α^m, so no power of α ever sits in a numerator
        let decay = self.decay_factor(state, SALE)?;
        let step = self.scale_step()?;

        let proceeds = self
            .params
            .initial_price
            .checked_mul(&decay)
            .and_then(|v| v.checked_mul(&self.params.scale_factor))
            .and_then(|v| v.checked_div(&step))
            .ok_or(GdaError::ArithmeticOverflow(SALE))?;

        self.div_scale(&proceeds, state.quantity)
            .and_then(|tail| proceeds.checked_sub(&tail))
            .and_then(|batch| self.div_scale(&batch, state.num_total_purchases))
            .ok_or(GdaError::ArithmeticOverflow(SALE))
    }

    fn spot_price_buy(&self, state: &AuctionState) -> GdaResult<PreciseNumber> {
        let decay = self.decay_factor(state, SPOT_BUY)?;
        let n = state.supply_after()?;
        let k = &self.params.initial_price;

        let direct = || k.checked_mul(&self.scale(n)?)?.checked_div(&decay);
        let split = || self.mul_scale(&k.checked_div(&decay)?, n);

        direct().or_else(split).ok_or(GdaError::EncodingOverflow)
    }

    fn spot_price_sell(&self, state: &AuctionState) -> GdaResult<PreciseNumber> {
        let decay = self.decay_factor(state, SPOT_SELL)?;
        let n = state.supply_after()?;
        self.params
            .initial_price
            .checked_mul(&decay)
            .and_then(|v| self.div_scale(&v, n))
            .ok_or(GdaError::ArithmeticOverflow(SPOT_SELL))
    }
}
