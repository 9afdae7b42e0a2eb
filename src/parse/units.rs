use alloy::primitives::aliases::I512;
use alloy::primitives::{U256, U512};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnitsError {
    #[error("`{0}` is not a decimal number")]
    Malformed(String),

    #[error("`{amount}` has more than {decimals} fractional digits")]
    TooManyDecimals { amount: String, decimals: u8 },

    #[error("`{0}` does not fit in 256 bits")]
    Overflow(String),
}

/// Scale a decimal string into the currency's smallest unit.
///
/// `"3.141592"` with 18 decimals becomes `3141592000000000000`. A
/// fractional part longer than `decimals` is rejected rather than rounded.
pub fn scale_units(amount: &str, decimals: u8) -> Result<U256, UnitsError> {
    let (int_part, frac_part) = match amount.split_once('.') {
        Some((i, f)) => (i, f),
        None => (amount, ""),
    };

    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if int_part.is_empty() || !all_digits(int_part) || !all_digits(frac_part) {
        return Err(UnitsError::Malformed(amount.to_string()));
    }
    if amount.contains('.') && frac_part.is_empty() {
        return Err(UnitsError::Malformed(amount.to_string()));
    }

    if frac_part.len() > decimals as usize {
        return Err(UnitsError::TooManyDecimals {
            amount: amount.to_string(),
            decimals,
        });
    }

    let mut digits = String::with_capacity(int_part.len() + decimals as usize);
    digits.push_str(int_part);
    digits.push_str(frac_part);
    digits.extend(std::iter::repeat_n('0', decimals as usize - frac_part.len()));

    let trimmed = digits.trim_start_matches('0');
    if trimmed.is_empty() {
        return Ok(U256::ZERO);
    }
    U256::from_str_radix(trimmed, 10).map_err(|_| UnitsError::Overflow(amount.to_string()))
}

/// Render an integer amount of smallest units as a decimal string,
/// without trailing fractional zeros (`1500000` at 6 decimals is `"1.5"`).
pub fn format_units(value: U256, decimals: u8) -> String {
    format_digits(&value.to_string(), decimals)
}

pub fn format_units_wide(value: U512, decimals: u8) -> String {
    format_digits(&value.to_string(), decimals)
}

pub fn format_signed_units(value: I512, decimals: u8) -> String {
    let formatted = format_units_wide(value.unsigned_abs(), decimals);
    if value.is_negative() {
        format!("-{formatted}")
    } else {
        formatted
    }
}

fn format_digits(digits: &str, decimals: u8) -> String {
    let decimals = decimals as usize;
    if decimals == 0 {
        return digits.to_string();
    }

    let padded = if digits.len() <= decimals {
        format!("{}{}", "0".repeat(decimals - digits.len() + 1), digits)
    } else {
        digits.to_string()
    };
    let (int_part, frac_part) = padded.split_at(padded.len() - decimals);
    let frac_part = frac_part.trim_end_matches('0');

    if frac_part.is_empty() {
        int_part.to_string()
    } else {
        format!("{int_part}.{frac_part}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale() {
        assert_eq!(
            scale_units("3.141592", 18).unwrap(),
            U256::from(3_141_592_000_000_000_000u128)
        );
        assert_eq!(scale_units("100", 6).unwrap(), U256::from(100_000_000u64));
        assert_eq!(scale_units("0", 18).unwrap(), U256::ZERO);
        assert_eq!(scale_units("0.000001", 6).unwrap(), U256::from(1u64));
        assert_eq!(scale_units("007", 0).unwrap(), U256::from(7u64));
    }

    #[test]
    fn test_too_many_decimals() {
        assert_eq!(
            scale_units("1.1234567", 6),
            Err(UnitsError::TooManyDecimals {
                amount: "1.1234567".into(),
                decimals: 6
            })
        );
        assert!(scale_units("1.5", 0).is_err());
    }

    #[test]
    fn test_malformed_and_overflow() {
        assert!(matches!(scale_units("1e18", 18), Err(UnitsError::Malformed(_))));
        assert!(matches!(scale_units("1,000", 18), Err(UnitsError::Malformed(_))));
        assert!(matches!(scale_units("1.", 18), Err(UnitsError::Malformed(_))));
        let huge = "9".repeat(80);
        assert!(matches!(scale_units(&huge, 0), Err(UnitsError::Overflow(_))));
    }

    #[test]
    fn test_format() {
        assert_eq!(format_units(U256::from(1_500_000u64), 6), "1.5");
        assert_eq!(format_units(U256::from(1u64), 6), "0.000001");
        assert_eq!(format_units(U256::ZERO, 18), "0");
        assert_eq!(format_units(U256::from(42u64), 0), "42");
        assert_eq!(
            format_units(U256::from(250_000_000_000_000_000u128), 18),
            "0.25"
        );
        assert_eq!(
            format_signed_units(I512::try_from(-5000i64).unwrap(), 3),
            "-5"
        );
    }
}
