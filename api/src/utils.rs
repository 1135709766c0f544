use crate::error::{GdaError, GdaResult};
use crate::math::*;

/// `10^exponent` in the working width; only called with exponents up to [`PRECISION_DECIMALS`].
fn pow10(exponent: u8) -> InnerUint {
    InnerUint::from(10u64).pow(InnerUint::from(exponent))
}

fn check_decimals(decimals: u8) -> GdaResult<u8> {
    if decimals > PRECISION_DECIMALS {
        return Err(GdaError::DomainViolation(format!(
            "{} decimals exceed the working precision of {}",
            decimals, PRECISION_DECIMALS
        )));
    }
    Ok(PRECISION_DECIMALS - decimals)
}

/// Parse a base-10 integer argument (e.g. `"1100000000000000000"` for 1.1 at 18 decimals).
pub fn parse_uint(name: &'static str, value: &str) -> GdaResult<U256> {
    let value = value.trim();
    if value.starts_with('-') {
        return Err(GdaError::DomainViolation(format!("{} must not be negative", name)));
    }
    if value.is_empty() {
        return Err(GdaError::InvalidNumber { name, value: value.to_string() });
    }
    U256::from_dec_str(value).map_err(|_| GdaError::InvalidNumber {
        name,
        value: value.to_string(),
    })
}

/// Convert a fixed-point integer with `decimals` places into a precise number
/// (e.g., 1_100_000_000_000_000_000 with 18 decimals -> 1.1)
pub fn to_numeric(raw: U256, decimals: u8) -> GdaResult<PreciseNumber> {
    let shift = check_decimals(decimals)?;
    // 2^256 * 10^27 stays below 2^346, so this cannot overflow
    let value = InnerUint::from(raw) * pow10(shift);
    Ok(PreciseNumber { value })
}

/// Convert a precise number back into a fixed-point integer with `decimals`
/// places, flooring toward zero (e.g., 15.937424601 with 18 decimals -> 15_937_424_601_000_000_000)
pub fn from_numeric(value: &PreciseNumber, decimals: u8) -> GdaResult<U256> {
    let shift = check_decimals(decimals)?;
    (value.value / pow10(shift))
        .to_u256()
        .ok_or(GdaError::EncodingOverflow)
}

/// Decode a whole-unit count such as `num_total_purchases` or `quantity`.
pub fn to_count(name: &'static str, raw: U256, decimals: u8) -> GdaResult<u64> {
    let value = to_numeric(raw, decimals)?;
    if !value.fract().is_zero() {
        return Err(GdaError::DomainViolation(format!("{} must be a whole number of units", name)));
    }
    value
        .whole_u64()
        .ok_or_else(|| GdaError::DomainViolation(format!("{} does not fit in 64 bits", name)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn wad(value: u128) -> U256 {
        U256::from(value) * U256::from(1_000_000_000_000_000_000u128)
    }

    #[test]
    fn test_to_numeric() {
        let alpha = to_numeric(U256::from(1_100_000_000_000_000_000u128), 18).unwrap();
        assert_eq!(alpha, PreciseNumber::from_ratio(11, 10).unwrap());

        let raw = to_numeric(U256::from(7u64), 0).unwrap();
        assert_eq!(raw, PreciseNumber::new(7).unwrap());

        let smallest = to_numeric(U256::one(), 27).unwrap();
        assert_eq!(smallest.value, InnerUint::one());

        assert!(matches!(to_numeric(U256::one(), 28), Err(GdaError::DomainViolation(_))));
    }

    #[test]
    fn test_from_numeric_floors() {
        // 2/3 = 0.666666666666666666666666667 -> 0.666666666666666666 at 18 decimals
        let two_thirds = PreciseNumber::from_ratio(2, 3).unwrap();
        assert_eq!(
            from_numeric(&two_thirds, 18).unwrap(),
            U256::from(666_666_666_666_666_666u128)
        );
        assert_eq!(from_numeric(&two_thirds, 0).unwrap(), U256::zero());
    }

    #[test]
    fn test_from_numeric_overflow() {
        let huge = PreciseNumber::new(10).unwrap().pow(70).unwrap();
        assert_eq!(from_numeric(&huge, 18), Err(GdaError::EncodingOverflow));
    }

    #[test]
    fn test_to_count() {
        assert_eq!(to_count("quantity", wad(10), 18).unwrap(), 10);
        assert_eq!(to_count("quantity", U256::from(10u64), 0).unwrap(), 10);
        assert!(matches!(
            to_count("quantity", U256::from(1_500_000_000_000_000_000u128), 18),
            Err(GdaError::DomainViolation(_))
        ));
        assert!(matches!(
            to_count("quantity", U256::MAX, 0),
            Err(GdaError::DomainViolation(_))
        ));
    }

    #[test]
    fn test_parse_uint() {
        assert_eq!(parse_uint("quantity", "42").unwrap(), U256::from(42u64));
        assert_eq!(parse_uint("quantity", " 42 ").unwrap(), U256::from(42u64));
        assert!(matches!(parse_uint("quantity", "-1"), Err(GdaError::DomainViolation(_))));
        assert!(matches!(parse_uint("quantity", "1.5"), Err(GdaError::InvalidNumber { .. })));
        assert!(matches!(parse_uint("quantity", ""), Err(GdaError::InvalidNumber { .. })));
    }

    proptest! {
        #[test]
        fn fixed_point_round_trip(words in any::<[u64; 4]>(), decimals in 0u8..=27) {
            let raw = U256(words);
            let value = to_numeric(raw, decimals).unwrap();
            prop_assert_eq!(from_numeric(&value, decimals).unwrap(), raw);
        }
    }
}
