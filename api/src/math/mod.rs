// required for clippy
#![allow(clippy::assign_op_pattern)]
#![allow(clippy::ptr_offset_with_cast)]
#![allow(clippy::manual_range_contains)]

use uint::construct_uint;

construct_uint! {
    /// 256-bit unsigned integer, the caller-facing wei representation.
    pub struct U256(4);
}

construct_uint! {
    /// 384-bit backing store of [`PreciseNumber`].
    pub struct InnerUint(6);
}

construct_uint! {
    /// Double-width scratch space for fixed-point multiplication and division.
    pub struct WideUint(12);
}

pub mod consts;
pub mod unsigned;

pub use consts::*;
pub use unsigned::*;

impl InnerUint {
    /// Widens into the double-width scratch type. Never loses bits.
    pub fn widen(&self) -> WideUint {
        let mut words = [0u64; 12];
        words[..6].copy_from_slice(&self.0);
        WideUint(words)
    }

    /// Narrows down to 256 bits, or `None` if any of the upper words are set.
    pub fn to_u256(&self) -> Option<U256> {
        if self.0[4..].iter().any(|w| *w != 0) {
            return None;
        }
        let mut words = [0u64; 4];
        words.copy_from_slice(&self.0[..4]);
        Some(U256(words))
    }
}

impl WideUint {
    /// Narrows back into the working width, or `None` on overflow.
    pub fn narrow(&self) -> Option<InnerUint> {
        if self.0[6..].iter().any(|w| *w != 0) {
            return None;
        }
        let mut words = [0u64; 6];
        words.copy_from_slice(&self.0[..6]);
        Some(InnerUint(words))
    }
}

impl From<U256> for InnerUint {
    fn from(value: U256) -> Self {
        let mut words = [0u64; 6];
        words[..4].copy_from_slice(&value.0);
        InnerUint(words)
    }
}
