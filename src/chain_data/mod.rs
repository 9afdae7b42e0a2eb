//! Read access to chain state the disperse flow depends on.

pub mod rpc;
pub mod token;

use alloy::primitives::{Address, Bytes, U256};
use async_trait::async_trait;

use crate::errors::ExternalCallError;

pub use rpc::RpcChainData;
pub use token::load_token;

/// ERC20 metadata read by the token loader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenMetadata {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

/// Bytecode, balance and allowance lookups.
///
/// Implementations are free to suspend; callers issue one request at a
/// time.
#[async_trait]
pub trait ChainData: Send + Sync {
    /// Chain the provider is currently attached to.
    async fn chain_id(&self) -> Result<u64, ExternalCallError>;

    /// Deployed code at `address`. Empty when there is none.
    async fn get_code(&self, address: Address, chain_id: u64) -> Result<Bytes, ExternalCallError>;

    async fn native_balance(&self, account: Address) -> Result<U256, ExternalCallError>;

    async fn token_balance(&self, token: Address, account: Address) -> Result<U256, ExternalCallError>;

    async fn token_allowance(
        &self,
        token: Address,
        owner: Address,
        spender: Address,
    ) -> Result<U256, ExternalCallError>;

    async fn token_metadata(&self, token: Address) -> Result<TokenMetadata, ExternalCallError>;
}
