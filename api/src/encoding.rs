use crate::consts::*;
use crate::error::{GdaError, GdaResult};
use crate::math::U256;

/// ABI-encode a single `uint256`: `0x` followed by 64 lowercase hex digits, big-endian.
pub fn encode_uint256(value: &U256) -> String {
    let mut bytes = [0u8; RESULT_BYTES];
    value.to_big_endian(&mut bytes);
    format!("{}{}", RESULT_PREFIX, hex::encode(bytes))
}

/// Inverse of [`encode_uint256`]. The prefix is optional and shorter inputs
/// are treated as left-padded with zeros.
pub fn decode_uint256(encoded: &str) -> GdaResult<U256> {
    let digits = encoded.trim();
    let digits = digits.strip_prefix(RESULT_PREFIX).unwrap_or(digits);
    let invalid = || GdaError::InvalidNumber {
        name: "result",
        value: encoded.to_string(),
    };

    if digits.is_empty() || digits.len() > RESULT_BYTES * 2 {
        return Err(invalid());
    }

    let padded = format!("{:0>width$}", digits, width = RESULT_BYTES * 2);
    let bytes = hex::decode(padded).map_err(|_| invalid())?;
    Ok(U256::from_big_endian(&bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_encode() {
        assert_eq!(
            encode_uint256(&U256::zero()),
            "0x0000000000000000000000000000000000000000000000000000000000000000"
        );
        // 1e18
        assert_eq!(
            encode_uint256(&U256::from(1_000_000_000_000_000_000u128)),
            "0x0000000000000000000000000000000000000000000000000de0b6b3a7640000"
        );
        assert_eq!(
            encode_uint256(&U256::MAX),
            "0xffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff"
        );
    }

    #[test]
    fn test_encode_width() {
        for value in [U256::zero(), U256::one(), U256::from(u64::MAX), U256::MAX] {
            let encoded = encode_uint256(&value);
            assert_eq!(encoded.len(), 66);
            assert!(encoded.starts_with("0x"));
            assert_eq!(encoded, encoded.to_lowercase());
        }
    }

    #[test]
    fn test_decode() {
        assert_eq!(decode_uint256("0xde0b6b3a7640000").unwrap(), U256::from(1_000_000_000_000_000_000u128));
        assert_eq!(decode_uint256("ff").unwrap(), U256::from(255u64));
        assert!(decode_uint256("0x").is_err());
        assert!(decode_uint256("0xzz").is_err());
        assert!(decode_uint256(&format!("0x1{}", "0".repeat(64))).is_err());
    }

    proptest! {
        #[test]
        fn encoding_round_trip(words in any::<[u64; 4]>()) {
            let value = U256(words);
            prop_assert_eq!(decode_uint256(&encode_uint256(&value)).unwrap(), value);
        }
    }
}
