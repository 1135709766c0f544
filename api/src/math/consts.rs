use super::InnerUint;
use super::unsigned::PreciseNumber;

// PreciseNumber constants

/// Number of decimal places carried by a [`PreciseNumber`].
pub const PRECISION_DECIMALS: u8 = 27;

/// The representation of the number one as a precise number as 10^27
pub const ONE: u128 = 1_000_000_000_000_000_000_000_000_000;

/// Upper bound on the terms of the exponential series. The series for
/// arguments below ln(2) drops under one ulp well before this.
pub const MAX_SERIES_TERMS: u64 = 64;

/// Returns the internal representation of 1.0 in fixed-point format.
#[inline]
pub const fn one() -> InnerUint {
    InnerUint([11515845246265065472_u64, 54210108_u64, 0, 0, 0, 0])
}

/// Returns the internal representation of 0.5 in fixed-point format.
#[inline]
pub const fn half() -> InnerUint {
    InnerUint([5757922623132532736_u64, 27105054_u64, 0, 0, 0, 0])
}
pub const HALF: PreciseNumber = PreciseNumber { value: half() };

/// Returns the internal representation of 0.0.
#[inline]
pub const fn zero() -> InnerUint {
    InnerUint([0, 0, 0, 0, 0, 0])
}

// 0.693147180559945309417232121
#[inline]
pub const fn ln2() -> InnerUint {
    InnerUint([17538513934777439993_u64, 37575583_u64, 0, 0, 0, 0])
}
pub const LN2: PreciseNumber = PreciseNumber { value: ln2() };

// 2.718281828459045235360287471
#[inline]
pub const fn e() -> InnerUint {
    InnerUint([3544695108858039023_u64, 147358353_u64, 0, 0, 0, 0])
}
pub const E: PreciseNumber = PreciseNumber { value: e() };
