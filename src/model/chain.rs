use serde::{Deserialize, Serialize};

/// An EVM network the app knows how to talk to.
///
/// The built-in registry is the "supported" set: a chain outside it can
/// still be used when a disperse contract is found on it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Chain {
    /// Human-readable chain name (e.g. "ethereum", "base").
    pub name: String,
    /// EVM chain ID.
    pub chain_id: u64,
    /// Name of the native currency (e.g. "ether").
    pub native_currency: String,
    /// Ticker of the native currency (e.g. "ETH").
    pub native_symbol: String,
}

// ── Methods ──────────────────────────────────────────────────────────

impl Chain {
    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

// ── Built-in registry ────────────────────────────────────────────────

macro_rules! chain_registry {
    ( $( $id:expr => ($name:expr, $currency:expr, $symbol:expr) ),* $(,)? ) => {
        const REGISTRY: &[(u64, &str, &str, &str)] = &[
            $( ($id, $name, $currency, $symbol), )*
        ];
    };
}

chain_registry! {
    1 => ("ethereum", "ether", "ETH"),
    10 => ("optimism", "ether", "ETH"),
    56 => ("bnb smart chain", "bnb", "BNB"),
    100 => ("gnosis", "xdai", "XDAI"),
    137 => ("polygon", "pol", "POL"),
    250 => ("fantom", "fantom", "FTM"),
    324 => ("zksync era", "ether", "ETH"),
    999 => ("hyperevm", "hype", "HYPE"),
    5000 => ("mantle", "mantle", "MNT"),
    8453 => ("base", "ether", "ETH"),
    42161 => ("arbitrum", "ether", "ETH"),
    42220 => ("celo", "celo", "CELO"),
    43114 => ("avalanche", "avax", "AVAX"),
    59144 => ("linea", "ether", "ETH"),
    81457 => ("blast", "ether", "ETH"),
    534352 => ("scroll", "ether", "ETH"),
    11155111 => ("sepolia", "sepolia ether", "ETH"),
    84532 => ("base sepolia", "sepolia ether", "ETH"),
}

/// Look up a chain in the built-in registry.
pub fn chain_by_id(chain_id: u64) -> Option<Chain> {
    REGISTRY
        .iter()
        .find(|(id, ..)| *id == chain_id)
        .map(|(id, name, currency, symbol)| Chain {
            name: (*name).to_string(),
            chain_id: *id,
            native_currency: (*currency).to_string(),
            native_symbol: (*symbol).to_string(),
        })
}

pub fn is_supported(chain_id: u64) -> bool {
    REGISTRY.iter().any(|(id, ..)| *id == chain_id)
}

pub fn network_name(chain_id: Option<u64>) -> Option<String> {
    chain_id.and_then(chain_by_id).map(|c| c.name)
}

/// Native currency ticker, "ETH" for unknown chains.
pub fn native_symbol(chain_id: Option<u64>) -> String {
    chain_id
        .and_then(chain_by_id)
        .map(|c| c.native_symbol)
        .unwrap_or_else(|| "ETH".to_string())
}

/// Native currency name, "ether" for unknown chains.
pub fn native_currency_name(chain_id: Option<u64>) -> String {
    chain_id
        .and_then(chain_by_id)
        .map(|c| c.native_currency)
        .unwrap_or_else(|| "ether".to_string())
}

/// The contract can be deployed to any identified network.
pub fn can_deploy_to_network(chain_id: Option<u64>) -> bool {
    matches!(chain_id, Some(id) if id != 0)
}

// ── Display ──────────────────────────────────────────────────────────

impl std::fmt::Display for Chain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (id: {})", self.name, self.chain_id)
    }
}
