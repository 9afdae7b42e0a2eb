//! Balance and allowance arithmetic for a disperse batch.
//!
//! Totals are widened to 512 bits, so summing any list of 256-bit values
//! cannot overflow; the remaining balance is signed and goes negative when
//! the batch costs more than the account holds.

use alloy::primitives::aliases::I512;
use alloy::primitives::{U256, U512};
use serde::Serialize;

use crate::model::chain;
use crate::model::{CurrencyMode, Recipient, TokenInfo};
use crate::parse::units::format_units;

/// Reason a disperse cannot go ahead yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DisperseMessage {
    NeedsAllowance,
    TotalExceedsBalance,
}

impl std::fmt::Display for DisperseMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DisperseMessage::NeedsAllowance => write!(f, "needs allowance"),
            DisperseMessage::TotalExceedsBalance => write!(f, "total exceeds balance"),
        }
    }
}

pub fn total_amount(recipients: &[Recipient]) -> U512 {
    recipients
        .iter()
        .fold(U512::ZERO, |acc, r| acc + U512::from(r.value))
}

/// Token balance in token mode, native balance otherwise. Missing values
/// count as zero.
pub fn balance(mode: Option<CurrencyMode>, token: &TokenInfo, native: Option<U256>) -> U256 {
    match mode {
        Some(CurrencyMode::Token) => token.balance_or_zero(),
        _ => native.unwrap_or(U256::ZERO),
    }
}

pub fn left_amount(balance: U256, total: U512) -> I512 {
    I512::from_raw(U512::from(balance)) - I512::from_raw(total)
}

/// A freshly queried allowance wins over the one cached on the token.
pub fn effective_allowance(fresh: Option<U256>, token: &TokenInfo) -> U256 {
    fresh.or(token.allowance).unwrap_or(U256::ZERO)
}

/// Allowance is checked before balance: a token batch without enough
/// allowance reports that even when the balance is also short.
pub fn disperse_message(
    mode: Option<CurrencyMode>,
    total: U512,
    left: I512,
    allowance: U256,
) -> Option<DisperseMessage> {
    if mode == Some(CurrencyMode::Token) && U512::from(allowance) < total {
        return Some(DisperseMessage::NeedsAllowance);
    }
    if left.is_negative() {
        return Some(DisperseMessage::TotalExceedsBalance);
    }
    None
}

/// Decimals used to scale amounts: the token's (default 18) in token mode,
/// 18 for native currency.
pub fn decimals(mode: Option<CurrencyMode>, token: &TokenInfo) -> u8 {
    match mode {
        Some(CurrencyMode::Token) => token.decimals.unwrap_or(18),
        _ => 18,
    }
}

pub fn symbol(mode: Option<CurrencyMode>, token: &TokenInfo, chain_id: Option<u64>) -> String {
    match mode {
        Some(CurrencyMode::Token) => token.symbol.clone().unwrap_or_else(|| "???".to_string()),
        _ => chain::native_symbol(chain_id),
    }
}

pub fn format_balance(value: U256, decimals: u8, symbol: &str) -> String {
    format!("{} {}", format_units(value, decimals), symbol)
}

/// Everything the confirm step shows for a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ledger {
    pub total: U512,
    pub balance: U256,
    pub left: I512,
    pub allowance: U256,
    pub message: Option<DisperseMessage>,
}

impl Ledger {
    pub fn compute(
        recipients: &[Recipient],
        mode: Option<CurrencyMode>,
        token: &TokenInfo,
        native: Option<U256>,
        fresh_allowance: Option<U256>,
    ) -> Self {
        let total = total_amount(recipients);
        let balance = balance(mode, token, native);
        let left = left_amount(balance, total);
        let allowance = effective_allowance(fresh_allowance, token);
        let message = disperse_message(mode, total, left, allowance);
        Ledger {
            total,
            balance,
            left,
            allowance,
            message,
        }
    }

    /// The token batch needs an approve before it can be sent.
    pub fn needs_allowance(&self) -> bool {
        U512::from(self.allowance) < self.total
    }

    pub fn is_eligible(&self) -> bool {
        self.message.is_none()
    }
}
