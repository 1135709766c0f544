use crate::error::{GdaError, GdaResult};
use crate::math::PreciseNumber;

/// Curve parameters of one pricing request.
#[derive(Clone, Debug, PartialEq)]
pub struct CurveParameters {
    /// `k`, price of the first unit at `T = 0` with nothing sold.
    pub initial_price: PreciseNumber,
    /// `λ`, how fast the price decays with elapsed time.
    pub decay_constant: PreciseNumber,
    /// `α`, multiplicative price step per unit sold. Must exceed one.
    pub scale_factor: PreciseNumber,
}

impl CurveParameters {
    /// Builds the parameters, rejecting `α <= 1`.
    ///
    /// `λ` and `k` are unsigned in the working domain, so `λ ≥ 0` holds by
    /// construction; negative inputs are rejected while parsing.
    pub fn new(
        initial_price: PreciseNumber,
        decay_constant: PreciseNumber,
        scale_factor: PreciseNumber,
    ) -> GdaResult<Self> {
        if scale_factor.less_than_or_equal(&PreciseNumber::one()) {
            return Err(GdaError::DomainViolation(format!(
                "scale_factor must be greater than 1, got {}",
                scale_factor
            )));
        }
        Ok(Self { initial_price, decay_constant, scale_factor })
    }
}

/// Snapshot of the auction a request is priced against.
#[derive(Clone, Debug, PartialEq)]
pub struct AuctionState {
    /// `m`, units sold before this request.
    pub num_total_purchases: u64,
    /// `T`, elapsed time since the price was last anchored.
    pub time_since_start: PreciseNumber,
    /// `q`, units bought or sold by this request.
    pub quantity: u64,
}

impl AuctionState {
    pub fn new(num_total_purchases: u64, time_since_start: PreciseNumber, quantity: u64) -> Self {
        Self { num_total_purchases, time_since_start, quantity }
    }

    /// `m + q`, the supply after the request is applied.
    pub fn supply_after(&self) -> GdaResult<u64> {
        self.num_total_purchases
            .checked_add(self.quantity)
            .ok_or(GdaError::ArithmeticOverflow("num_total_purchases + quantity"))
    }
}
