use alloy::primitives::U256;
use alloy::primitives::utils::{Unit, format_units};

use crate::errors::DeployError;

/// Decimals of the chain's native currency (wei per ether).
pub const NATIVE_DECIMALS: u8 = 18;

/// Converts a human-scale decimal amount into atomic units, `amount * 10^decimals`.
///
/// The conversion is done on the decimal string, so it is exact at any token
/// supply scale. Amounts with more fractional digits than `decimals` cannot be
/// represented and are rejected rather than truncated.
pub fn to_atomic_integer(amount: &str, decimals: u8) -> Result<U256, DeployError> {
    if Unit::new(decimals).is_none() {
        return Err(DeployError::InvalidDecimals(decimals.to_string()));
    }

    let trimmed = amount.trim();
    if trimmed.starts_with('-') {
        return Err(DeployError::invalid_amount(amount, "amount is negative"));
    }

    let (whole, fraction) = trimmed.split_once('.').unwrap_or((trimmed, ""));
    if whole.is_empty() && fraction.is_empty() {
        return Err(DeployError::invalid_amount(amount, "not a number"));
    }
    if !whole.bytes().all(|b| b.is_ascii_digit()) || !fraction.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(DeployError::invalid_amount(amount, "not a decimal number"));
    }

    let fraction = fraction.trim_end_matches('0');
    if fraction.len() > decimals as usize {
        return Err(DeployError::invalid_amount(
            amount,
            format!("more than {} fractional digits", decimals),
        ));
    }

    let digits = format!("{whole}{fraction:0<width$}", width = decimals as usize);
    U256::from_str_radix(&digits, 10)
        .map_err(|_| DeployError::invalid_amount(amount, "does not fit in 256 bits"))
}

/// Parses token decimals given as text (CLI flags, config values).
pub fn parse_decimals(raw: &str) -> Result<u8, DeployError> {
    let decimals = raw
        .trim()
        .parse::<u8>()
        .map_err(|_| DeployError::InvalidDecimals(raw.to_string()))?;
    match Unit::new(decimals) {
        Some(_) => Ok(decimals),
        None => Err(DeployError::InvalidDecimals(raw.to_string())),
    }
}

/// Human-readable rendering of an atomic amount, for summaries and logs.
pub fn format_atomic(value: U256, decimals: u8) -> String {
    format_units(value, decimals).unwrap_or_else(|_| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pow10(exp: u64) -> U256 {
        U256::from(10).pow(U256::from(exp))
    }

    #[test]
    fn test_whole_amounts_shift_by_decimals() {
        assert_eq!(
            to_atomic_integer("100", 18).unwrap(),
            U256::from(100) * pow10(18)
        );
        assert_eq!(to_atomic_integer("7", 0).unwrap(), U256::from(7));
        assert_eq!(to_atomic_integer("0", 6).unwrap(), U256::ZERO);
    }

    #[test]
    fn test_fractional_amounts_are_exact() {
        assert_eq!(to_atomic_integer("0.01", 18).unwrap(), pow10(16));
        assert_eq!(
            to_atomic_integer("1.5", 6).unwrap(),
            U256::from(1_500_000u64)
        );
        assert_eq!(to_atomic_integer(".25", 2).unwrap(), U256::from(25));
        // Trailing zeros past the precision still describe an integer.
        assert_eq!(to_atomic_integer("1.500", 1).unwrap(), U256::from(15));
    }

    #[test]
    fn test_matches_integer_multiplication() {
        for decimals in 0u8..=40 {
            for amount in [0u64, 1, 9, 42, 1_000_000, u64::MAX] {
                let expected = U256::from(amount) * pow10(decimals as u64);
                assert_eq!(
                    to_atomic_integer(&amount.to_string(), decimals).unwrap(),
                    expected,
                    "amount={amount} decimals={decimals}"
                );
            }
        }
    }

    #[test]
    fn test_large_supply_does_not_lose_precision() {
        // 10^27 + 1 would not survive a round trip through f64.
        let amount = "1000000000000000000000000001";
        let expected = U256::from_str_radix(amount, 10).unwrap() * pow10(18);
        assert_eq!(to_atomic_integer(amount, 18).unwrap(), expected);
    }

    #[test]
    fn test_rejects_invalid_amounts() {
        for bad in ["-1", "-0.5", "", "   ", ".", "abc", "1e18", "1.2.3", "0x10", "1,000"] {
            let err = to_atomic_integer(bad, 18).unwrap_err();
            assert!(
                matches!(err, DeployError::InvalidAmount { .. }),
                "{bad:?} gave {err:?}"
            );
        }
    }

    #[test]
    fn test_rejects_excess_precision() {
        let err = to_atomic_integer("0.001", 2).unwrap_err();
        assert!(matches!(err, DeployError::InvalidAmount { .. }));
        let err = to_atomic_integer("1.5", 0).unwrap_err();
        assert!(matches!(err, DeployError::InvalidAmount { .. }));
    }

    #[test]
    fn test_rejects_overflow() {
        let huge = "1".repeat(70);
        let err = to_atomic_integer(&huge, 18).unwrap_err();
        assert!(matches!(err, DeployError::InvalidAmount { .. }));
    }

    #[test]
    fn test_rejects_out_of_range_decimals() {
        let err = to_atomic_integer("1", 78).unwrap_err();
        assert!(matches!(err, DeployError::InvalidDecimals(_)));
    }

    #[test]
    fn test_parse_decimals() {
        assert_eq!(parse_decimals("18").unwrap(), 18);
        assert_eq!(parse_decimals(" 0 ").unwrap(), 0);
        for bad in ["-1", "1.5", "eighteen", "", "78", "300"] {
            assert!(
                matches!(parse_decimals(bad), Err(DeployError::InvalidDecimals(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_format_atomic() {
        assert_eq!(format_atomic(pow10(16), 18), "0.010000000000000000");
    }
}
