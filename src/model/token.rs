use alloy::primitives::{Address, U256};
use serde::{Deserialize, Serialize};

/// What a disperse batch moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CurrencyMode {
    /// The chain's native currency.
    Ether,
    /// An ERC20 token.
    Token,
}

impl std::fmt::Display for CurrencyMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CurrencyMode::Ether => write!(f, "ether"),
            CurrencyMode::Token => write!(f, "token"),
        }
    }
}

/// Everything known about the selected token. Fields fill in as the
/// token loader reads them from chain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decimals: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub balance: Option<U256>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowance: Option<U256>,
}

impl TokenInfo {
    /// Address, decimals and symbol are all known.
    pub fn is_complete(&self) -> bool {
        self.address.is_some() && self.decimals.is_some() && self.symbol.is_some()
    }

    pub fn balance_or_zero(&self) -> U256 {
        self.balance.unwrap_or(U256::ZERO)
    }

    pub fn allowance_or_zero(&self) -> U256 {
        self.allowance.unwrap_or(U256::ZERO)
    }
}
