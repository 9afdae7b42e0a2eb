use alloy::primitives::Address;

use crate::errors::DisperseError;
use crate::model::recipient::parse_address;
use crate::model::TokenInfo;

use super::ChainData;

/// Validate a user-entered token address and read everything the disperse
/// flow needs about it.
///
/// The allowance is read only when the disperse contract (`spender`) is
/// known; otherwise it stays unset.
pub async fn load_token(
    chain: &dyn ChainData,
    input: &str,
    account: Option<Address>,
    spender: Option<Address>,
) -> Result<TokenInfo, DisperseError> {
    let input = input.trim();
    let token = parse_address(input).ok_or_else(|| DisperseError::InvalidTokenAddress {
        input: input.to_string(),
    })?;
    let account = account.ok_or(DisperseError::WalletNotConnected)?;

    let metadata = chain.token_metadata(token).await?;
    let balance = chain.token_balance(token, account).await?;
    let allowance = match spender {
        Some(spender) => Some(chain.token_allowance(token, account, spender).await?),
        None => None,
    };

    Ok(TokenInfo {
        address: Some(token),
        name: Some(metadata.name),
        symbol: Some(metadata.symbol),
        decimals: Some(metadata.decimals),
        balance: Some(balance),
        allowance,
    })
}
