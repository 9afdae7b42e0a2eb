use std::error::Error as StdError;

use alloy::transports::{RpcError, TransportError};
use thiserror::Error;

/// Phrases wallets use when the user turns down a signing or approval request.
const REJECTION_PHRASES: [&str; 2] = ["User rejected", "User denied"];

#[derive(Debug, Error)]
pub enum DisperseError {
    #[error("Minimum amount must be less than maximum amount (min {min}, max {max})")]
    InvalidRange { min: f64, max: f64 },

    #[error("Decimal places must be between 0 and 18 (got {decimal_places})")]
    InvalidPrecision { decimal_places: i32 },

    #[error("Amount {value} cannot be represented")]
    InvalidAmount { value: f64 },

    #[error("invalid token address")]
    InvalidTokenAddress { input: String },

    #[error("please connect your wallet")]
    WalletNotConnected,

    #[error(transparent)]
    ExternalCall(#[from] ExternalCallError),
}

impl DisperseError {
    /// True for the programming-time misuse errors of the amount generator.
    pub fn is_policy_violation(&self) -> bool {
        matches!(
            self,
            DisperseError::InvalidRange { .. }
                | DisperseError::InvalidPrecision { .. }
                | DisperseError::InvalidAmount { .. }
        )
    }
}

/// Failure of a bytecode, balance, allowance or metadata query.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ExternalCallError {
    pub message: String,
    pub short_message: Option<String>,
}

impl ExternalCallError {
    pub fn new(message: impl Into<String>) -> Self {
        ExternalCallError {
            message: message.into(),
            short_message: None,
        }
    }

    pub fn with_short(message: impl Into<String>, short: impl Into<String>) -> Self {
        ExternalCallError {
            message: message.into(),
            short_message: Some(short.into()),
        }
    }

    /// Short-form message when available, else the full message.
    pub fn display_message(&self) -> &str {
        match self.short_message.as_deref() {
            Some(short) if !short.is_empty() => short,
            _ => &self.message,
        }
    }

    pub fn is_user_rejection(&self) -> bool {
        is_user_rejection(&self.message)
    }
}

impl From<TransportError> for ExternalCallError {
    fn from(err: TransportError) -> Self {
        match &err {
            RpcError::ErrorResp(payload) => {
                ExternalCallError::with_short(err.to_string(), payload.message.to_string())
            }
            _ => ExternalCallError::new(err.to_string()),
        }
    }
}

impl From<alloy::contract::Error> for ExternalCallError {
    fn from(err: alloy::contract::Error) -> Self {
        match err {
            alloy::contract::Error::TransportError(e) => e.into(),
            other => ExternalCallError::new(other.to_string()),
        }
    }
}

/// Human-readable message for an arbitrary error.
///
/// Errors that carry a short-form message (see [`ExternalCallError`]) are
/// reduced to it; anything else renders its full `Display`.
pub fn format_error(err: &(dyn StdError + 'static)) -> String {
    if let Some(ext) = err.downcast_ref::<ExternalCallError>() {
        return ext.display_message().to_string();
    }
    if let Some(DisperseError::ExternalCall(ext)) = err.downcast_ref::<DisperseError>() {
        return ext.display_message().to_string();
    }
    let message = err.to_string();
    if message.is_empty() {
        "An unexpected error occurred".to_string()
    } else {
        message
    }
}

/// Whether an error message describes a user cancelling a wallet request.
///
/// Cancellations are benign and must not be presented as faults.
pub fn is_user_rejection(message: &str) -> bool {
    REJECTION_PHRASES.iter().any(|p| message.contains(p))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_message_preferred() {
        let err = ExternalCallError::with_short("Full error message", "Token not found");
        assert_eq!(format_error(&err), "Token not found");

        let err = ExternalCallError::new("Contract read failed");
        assert_eq!(format_error(&err), "Contract read failed");
    }

    #[test]
    fn test_format_wrapped_external_error() {
        let err = DisperseError::from(ExternalCallError::with_short("long", "short"));
        assert_eq!(format_error(&err), "short");
        assert_eq!(
            format_error(&DisperseError::WalletNotConnected),
            "please connect your wallet"
        );
    }

    #[test]
    fn test_user_rejection() {
        assert!(is_user_rejection("MetaMask Tx Signature: User denied transaction signature."));
        assert!(is_user_rejection("User rejected the request."));
        assert!(!is_user_rejection("insufficient funds for gas"));
        assert!(ExternalCallError::new("User rejected the request.").is_user_rejection());
    }

    #[test]
    fn test_policy_violation() {
        assert!(DisperseError::InvalidRange { min: 5.0, max: 1.0 }.is_policy_violation());
        assert!(!DisperseError::WalletNotConnected.is_policy_violation());
    }
}
