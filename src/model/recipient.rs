use std::str::FromStr;

use alloy::primitives::{Address, U256};
use serde::{Deserialize, Serialize};

/// One transfer of a disperse batch.
///
/// Duplicated addresses are kept as separate entries; each one counts
/// toward the batch total on its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipient {
    /// Destination account. Rendered lowercase.
    pub address: Address,
    /// Amount in the currency's smallest unit.
    pub value: U256,
}

impl Recipient {
    pub fn new(address: Address, value: U256) -> Self {
        Recipient { address, value }
    }

    /// Lowercase `0x`-prefixed rendering of the address.
    pub fn address_hex(&self) -> String {
        format!("{:#x}", self.address)
    }
}

impl std::fmt::Display for Recipient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.address_hex(), self.value)
    }
}

/// Parse a `0x`-prefixed 40-hex-digit address.
///
/// All-lowercase and all-uppercase input is accepted as is; mixed case
/// must carry a valid EIP-55 checksum.
pub fn parse_address(input: &str) -> Option<Address> {
    let hex = input.strip_prefix("0x")?;
    if hex.len() != 40 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let has_lower = hex.bytes().any(|b| b.is_ascii_lowercase());
    let has_upper = hex.bytes().any(|b| b.is_ascii_uppercase());
    if has_lower && has_upper {
        Address::parse_checksummed(input, None).ok()
    } else {
        Address::from_str(input).ok()
    }
}
