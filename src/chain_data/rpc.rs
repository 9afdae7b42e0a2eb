use std::future::IntoFuture;
use std::time::Duration;

use alloy::primitives::{Address, Bytes, U256};
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use alloy::sol;
use async_trait::async_trait;

use crate::errors::ExternalCallError;

use super::{ChainData, TokenMetadata};

const CALL_TIMEOUT: Duration = Duration::from_secs(10);

// ── ERC20 contract interface ───────────────────────────────────────

sol! {
    #[allow(missing_docs)]
    #[sol(rpc)]
    contract IERC20 {
        function name() external view returns (string);
        function symbol() external view returns (string);
        function decimals() external view returns (uint8);
        function balanceOf(address account) external view returns (uint256);
        function allowance(address owner, address spender) external view returns (uint256);
    }
}

// ── Provider-backed chain data ─────────────────────────────────────

/// [`ChainData`] over a JSON-RPC endpoint. One instance serves the chain
/// the endpoint reported when it was connected.
pub struct RpcChainData {
    provider: DynProvider,
    chain_id: u64,
}

impl RpcChainData {
    /// Connect and learn which chain the endpoint serves.
    pub async fn connect(rpc_url: &str) -> Result<Self, ExternalCallError> {
        let url = rpc_url
            .parse()
            .map_err(|e| ExternalCallError::new(format!("invalid RPC URL {rpc_url}: {e}")))?;
        let provider = ProviderBuilder::new().connect_http(url).erased();
        let chain_id = with_timeout(provider.get_chain_id()).await?;
        Ok(RpcChainData { provider, chain_id })
    }

    fn check_chain(&self, chain_id: u64) -> Result<(), ExternalCallError> {
        if chain_id != self.chain_id {
            return Err(ExternalCallError::new(format!(
                "provider is attached to chain {}, not {chain_id}",
                self.chain_id
            )));
        }
        Ok(())
    }
}

async fn with_timeout<T, E>(fut: impl IntoFuture<Output = Result<T, E>>) -> Result<T, ExternalCallError>
where
    E: Into<ExternalCallError>,
{
    match tokio::time::timeout(CALL_TIMEOUT, fut).await {
        Ok(result) => result.map_err(Into::into),
        Err(_) => Err(ExternalCallError::with_short(
            format!("request timed out after {}s", CALL_TIMEOUT.as_secs()),
            "timeout",
        )),
    }
}

#[async_trait]
impl ChainData for RpcChainData {
    async fn chain_id(&self) -> Result<u64, ExternalCallError> {
        Ok(self.chain_id)
    }

    async fn get_code(&self, address: Address, chain_id: u64) -> Result<Bytes, ExternalCallError> {
        self.check_chain(chain_id)?;
        with_timeout(self.provider.get_code_at(address)).await
    }

    async fn native_balance(&self, account: Address) -> Result<U256, ExternalCallError> {
        with_timeout(self.provider.get_balance(account)).await
    }

    async fn token_balance(&self, token: Address, account: Address) -> Result<U256, ExternalCallError> {
        let erc20 = IERC20::new(token, &self.provider);
        with_timeout(erc20.balanceOf(account).call()).await
    }

    async fn token_allowance(
        &self,
        token: Address,
        owner: Address,
        spender: Address,
    ) -> Result<U256, ExternalCallError> {
        let erc20 = IERC20::new(token, &self.provider);
        with_timeout(erc20.allowance(owner, spender).call()).await
    }

    async fn token_metadata(&self, token: Address) -> Result<TokenMetadata, ExternalCallError> {
        let erc20 = IERC20::new(token, &self.provider);
        let name = with_timeout(erc20.name().call()).await?;
        let symbol = with_timeout(erc20.symbol().call()).await?;
        let decimals = with_timeout(erc20.decimals().call()).await?;
        Ok(TokenMetadata {
            name,
            symbol,
            decimals,
        })
    }
}
