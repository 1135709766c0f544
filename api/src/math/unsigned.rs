use super::{InnerUint, WideUint};
use super::consts::*;
use std::fmt;

/// A `PreciseNumber` is an unsigned 384-bit fixed-point number with 27 decimal places of
/// precision.
///
/// ### Internal Representation
/// Internally, the value is stored as a [`InnerUint`], which wraps a little-endian array `[u64; 6]`.
/// This means the layout is:
///
/// ```text
/// InnerUint([w0, w1, w2, w3, w4, w5])
/// // equivalent to:
/// // value = w0 + (w1 << 64) + (w2 << 128) + ... + (w5 << 320)
/// ```
///
/// ### Fixed-Point Scaling
/// All values are scaled by [`ONE`] (10^27). That is, the internal number is interpreted
/// as `raw / ONE` to recover its real-world value.
///
/// Examples:
/// - `PreciseNumber::from_scaled_u128(1_000_000_000_000_000_000_000_000_000)` → 1.0
/// - `PreciseNumber::from_scaled_u128(500_000_000_000_000_000_000_000_000)` → 0.5
///
/// Callers hand the engine 18-decimal integers. The nine extra digits keep the
/// rounding error of a chain of multiplications and divisions well below one
/// wei once the result is floored back to 18 decimals.
///
/// The largest representable value is roughly `3.9 × 10^88`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct PreciseNumber {
    /// Internal value stored as a 384-bit integer, scaled by ONE (10^27).
    pub value: InnerUint,
}

impl PreciseNumber {

    /// Returns a `PreciseNumber` representing 0.0.
    pub fn zero() -> Self {
        Self { value: zero() }
    }

    /// Returns a `PreciseNumber` representing 1.0.
    pub fn one() -> Self {
        Self { value: one() }
    }

    /// Constructs a `PreciseNumber` from an integer value by scaling it by ONE (10^27).
    /// For example, `new(7)` produces `7.0`.
    /// Returns None on overflow during scaling.
    pub fn new(value: u128) -> Option<Self> {
        let value = InnerUint::from(value).checked_mul(one())?;
        Some(Self { value })
    }

    /// Constructs a `PreciseNumber` from a `u128` that is already scaled by ONE (i.e. in fixed-point space).
    pub fn from_scaled_u128(value: u128) -> Self {
        Self {
            value: InnerUint::from(value),
        }
    }

    /// Constructs `numerator / denominator`, rounded to the nearest ulp.
    /// Returns `None` if `denominator` is zero.
    pub fn from_ratio(numerator: u128, denominator: u128) -> Option<Self> {
        Self::new(numerator)?.checked_div(&Self::new(denominator)?)
    }

    pub fn is_zero(&self) -> bool {
        self.value.is_zero()
    }

    /// Compares two `PreciseNumber`s for approximate equality,
    /// allowing for a configurable `precision` window in raw units.
    pub fn almost_eq(&self, rhs: &Self, precision: InnerUint) -> bool {
        let (difference, _) = self.unsigned_sub(rhs);
        difference.value < precision
    }

    /// Returns `true` if `self > rhs`.
    pub fn greater_than(&self, rhs: &Self) -> bool {
        self.value > rhs.value
    }

    /// Returns `true` if `self <= rhs`.
    pub fn less_than_or_equal(&self, rhs: &Self) -> bool {
        self.value <= rhs.value
    }

    /// The fractional part, below one.
    pub fn fract(&self) -> Self {
        Self {
            value: self.value % one(),
        }
    }

    /// Whole part as a `u64`, or `None` if it does not fit.
    pub fn whole_u64(&self) -> Option<u64> {
        let whole = self.value / one();
        if whole.bits() > 64 {
            return None;
        }
        Some(whole.low_u64())
    }

    /// Divides `self / rhs` in fixed-point space, maintaining precision.
    /// The quotient is rounded half-up in the last place.
    /// Returns `None` on divide-by-zero or overflow.
    pub fn checked_div(&self, rhs: &Self) -> Option<Self> {
        if rhs.is_zero() {
            return None;
        }
        let divisor = rhs.value.widen();
        let correction = divisor / WideUint::from(2u64);
        let value = self
            .value
            .widen()
            .checked_mul(one().widen())?
            .checked_add(correction)?
            .checked_div(divisor)?
            .narrow()?;
        Some(Self { value })
    }

    /// Multiplies two `PreciseNumber`s and returns the result in fixed-point space.
    /// The double-width product is rescaled by ONE and rounded half-up.
    /// Returns `None` if the result does not fit the working width.
    pub fn checked_mul(&self, rhs: &Self) -> Option<Self> {
        let value = self
            .value
            .widen()
            .checked_mul(rhs.value.widen())?
            .checked_add(half().widen())?
            .checked_div(one().widen())?
            .narrow()?;
        Some(Self { value })
    }

    /// Adds two precise numbers. Returns `None` on overflow.
    pub fn checked_add(&self, rhs: &Self) -> Option<Self> {
        let value = self.value.checked_add(rhs.value)?;
        Some(Self { value })
    }

    /// Subtracts `rhs` from `self`. Returns `None` if the result would be negative.
    pub fn checked_sub(&self, rhs: &Self) -> Option<Self> {
        let value = self.value.checked_sub(rhs.value)?;
        Some(Self { value })
    }

    /// Computes the absolute difference between two numbers.
    /// Returns the result and a boolean indicating whether the result was originally negative.
    pub fn unsigned_sub(&self, rhs: &Self) -> (Self, bool) {
        if self.value >= rhs.value {
            (Self { value: self.value - rhs.value }, false)
        } else {
            (Self { value: rhs.value - self.value }, true)
        }
    }

    /// Raises `self` to a whole-number power by repeated squaring.
    /// Exact up to one rounding per multiplication.
    /// Returns `None` if an intermediate square or product overflows.
    pub fn pow(&self, exponent: u64) -> Option<Self> {
        let mut result = Self::one();
        let mut base = self.clone();
        let mut remaining = exponent;

        while remaining > 0 {
            if remaining & 1 == 1 {
                result = result.checked_mul(&base)?;
            }
            remaining >>= 1;
            if remaining > 0 {
                base = base.checked_mul(&base)?;
            }
        }

        Some(result)
    }

    /// Calculate the exponential of `self`, that is, *e* raised to the power `self`.
    ///
    /// The whole part is raised through [`E`] by squaring and the fractional
    /// part, which lies in `[0, 1)`, goes through the Taylor series.
    /// Returns `None` once the result leaves the working range.
    pub fn exp(&self) -> Option<Self> {
        let whole = self.whole_u64()?;
        let integral = E.pow(whole)?;
        let fractional = self.fract().exp_series()?;
        integral.checked_mul(&fractional)
    }

    /// Calculate `2^self`.
    ///
    /// The whole part is an exact binary shift; the fractional part is
    /// `e^(f * ln 2)` with `f * ln 2 < 0.7`, where the series converges fast.
    pub fn exp2(&self) -> Option<Self> {
        let whole = usize::try_from(self.whole_u64()?).ok()?;
        let fractional = self.fract().checked_mul(&LN2)?.exp_series()?;
        if fractional.value.bits().checked_add(whole)? > InnerUint::MAX.bits() {
            return None;
        }
        Some(Self {
            value: fractional.value << whole,
        })
    }

    /// `1 + x + x^2/2! + x^3/3! + ...` until the next term vanishes.
    fn exp_series(&self) -> Option<Self> {
        let mut sum = Self::one();
        let mut term = Self::one();

        for i in 1..=MAX_SERIES_TERMS {
            term = term.checked_mul(self)?;
            term.value = term.value / InnerUint::from(i);
            if term.is_zero() {
                break;
            }
            sum = sum.checked_add(&term)?;
        }

        Some(sum)
    }
}

/// Renders the number with its full 27-digit fraction, e.g. `"3.141500000000000000000000000"`.
impl fmt::Display for PreciseNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.value / one();
        let decimals = (self.value % one()).to_string();
        let padding = "0".repeat(PRECISION_DECIMALS as usize - decimals.len());
        write!(f, "{}.{}{}", whole, padding, decimals)
    }
}
