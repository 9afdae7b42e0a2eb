use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rand::Rng;

use crate::errors::DisperseError;

const MAX_DECIMAL_PLACES: i32 = 18;

fn check_precision(decimal_places: i32) -> Result<usize, DisperseError> {
    if !(0..=MAX_DECIMAL_PLACES).contains(&decimal_places) {
        return Err(DisperseError::InvalidPrecision { decimal_places });
    }
    Ok(decimal_places as usize)
}

/// Format with exactly `places` fractional digits. Exact halves round away
/// from zero (`2.5` at 0 places is `"3"`).
fn format_fixed(value: f64, places: usize) -> String {
    // `places` is at most 18, so the scale is exact in f64.
    let scale = 10f64.powi(places as i32);
    let scaled = value * scale;
    let rounded = if scaled.abs() < 2f64.powi(53) {
        scaled.round() / scale
    } else {
        value
    };
    format!("{rounded:.places$}")
}

/// Draw one amount uniformly from `[min, max)` and render it with exactly
/// `decimal_places` fractional digits.
pub fn generate_random_amount_with<R: Rng>(
    rng: &mut R,
    min: f64,
    max: f64,
    decimal_places: i32,
) -> Result<String, DisperseError> {
    if !min.is_finite() || !max.is_finite() || min >= max {
        return Err(DisperseError::InvalidRange { min, max });
    }
    let places = check_precision(decimal_places)?;
    let value = rng.random_range(min..max);
    Ok(format_fixed(value, places))
}

pub fn generate_random_amount(min: f64, max: f64, decimal_places: i32) -> Result<String, DisperseError> {
    generate_random_amount_with(&mut rand::rng(), min, max, decimal_places)
}

/// One `"<address> <amount>"` line per address, newline-joined, each with
/// its own random draw.
pub fn generate_addresses_with_random_amounts_with<R: Rng>(
    rng: &mut R,
    addresses: &[String],
    min: f64,
    max: f64,
    decimal_places: i32,
) -> Result<String, DisperseError> {
    let lines = addresses
        .iter()
        .map(|address| {
            generate_random_amount_with(rng, min, max, decimal_places)
                .map(|amount| format!("{address} {amount}"))
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(lines.join("\n"))
}

pub fn generate_addresses_with_random_amounts(
    addresses: &[String],
    min: f64,
    max: f64,
    decimal_places: i32,
) -> Result<String, DisperseError> {
    generate_addresses_with_random_amounts_with(&mut rand::rng(), addresses, min, max, decimal_places)
}

/// Same shape as the random variant with one fixed amount on every line.
pub fn generate_addresses_with_uniform_amount(
    addresses: &[String],
    amount: f64,
    decimal_places: i32,
) -> Result<String, DisperseError> {
    let places = check_precision(decimal_places)?;
    if !amount.is_finite() || amount < 0.0 {
        return Err(DisperseError::InvalidAmount { value: amount });
    }
    let formatted = format_fixed(amount, places);
    Ok(addresses
        .iter()
        .map(|address| format!("{address} {formatted}"))
        .collect::<Vec<_>>()
        .join("\n"))
}

// ── CLI ──────────────────────────────────────────────────────────────

/// How the `generate` subcommand picks amounts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AmountPolicy {
    Uniform { amount: f64 },
    Random { min: f64, max: f64 },
}

pub struct GenerateConfig {
    pub addresses_file: PathBuf,
    pub policy: AmountPolicy,
    pub decimal_places: i32,
}

/// Non-empty trimmed lines of an address list file.
pub fn read_address_list(path: &Path) -> Result<Vec<String>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading addresses from {}", path.display()))?;
    Ok(text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(String::from)
        .collect())
}

/// CLI entry point for the `generate` subcommand.
pub fn run(config: &GenerateConfig) -> Result<()> {
    let addresses = read_address_list(&config.addresses_file)?;
    let output = match config.policy {
        AmountPolicy::Uniform { amount } => {
            generate_addresses_with_uniform_amount(&addresses, amount, config.decimal_places)?
        }
        AmountPolicy::Random { min, max } => {
            generate_addresses_with_random_amounts(&addresses, min, max, config.decimal_places)?
        }
    };
    println!("{output}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_rounds() {
        assert_eq!(format_fixed(0.26, 1), "0.3");
        assert_eq!(format_fixed(2.0, 0), "2");
        assert_eq!(format_fixed(0.25, 2), "0.25");
    }

    #[test]
    fn test_format_rounds_halves_up() {
        assert_eq!(format_fixed(2.5, 0), "3");
        assert_eq!(format_fixed(0.125, 2), "0.13");
        assert_eq!(format_fixed(1.5, 0), "2");
        assert_eq!(format_fixed(1.005, 2), "1.00");
    }
}
