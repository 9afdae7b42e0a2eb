//! Application state derived from wallet, network, contract and currency
//! signals.
//!
//! [`reduce`] is a pure function of the previous state and the current
//! signal tuple, re-run in full on every change. The only input that is not
//! part of the tuple is amount entry, applied with
//! [`SessionMachine::enter_amounts`].

pub mod currency;

use serde::{Deserialize, Serialize};

use crate::logging::SharedSink;
use crate::model::{CurrencyMode, Recipient, TokenInfo};

pub use currency::CurrencySelection;

const COMPONENT: &str = "session";

/// Ordered: each state presupposes the ones before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppState {
    /// No wallet provider is available at all.
    WalletRequired,
    /// A provider exists but no account is connected.
    UnlockWallet,
    /// Connected, but there is no usable disperse contract on this chain.
    NetworkUnavailable,
    /// Connected to a usable network; the currency is not fully specified.
    ConnectedToWallet,
    /// Currency fully specified.
    SelectedCurrency,
    /// At least one recipient parsed for the selected currency.
    EnteredAmounts,
}

impl std::fmt::Display for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            AppState::WalletRequired => "WALLET_REQUIRED",
            AppState::UnlockWallet => "UNLOCK_WALLET",
            AppState::NetworkUnavailable => "NETWORK_UNAVAILABLE",
            AppState::ConnectedToWallet => "CONNECTED_TO_WALLET",
            AppState::SelectedCurrency => "SELECTED_CURRENCY",
            AppState::EnteredAmounts => "ENTERED_AMOUNTS",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WalletStatus {
    Disconnected,
    Connecting,
    Reconnecting,
    Connected,
}

impl WalletStatus {
    /// Connection is being (re)established; signals are not settled yet.
    pub fn is_transient(self) -> bool {
        matches!(self, WalletStatus::Connecting | WalletStatus::Reconnecting)
    }

    pub fn is_connected(self) -> bool {
        self == WalletStatus::Connected
    }
}

/// Everything [`reduce`] looks at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSignals {
    /// A wallet provider exists in the host environment.
    #[serde(default = "default_true")]
    pub provider_available: bool,
    pub status: WalletStatus,
    #[serde(default)]
    pub chain_id: Option<u64>,
    pub chain_supported: bool,
    pub contract_deployed: bool,
    #[serde(default)]
    pub bytecode_loading: bool,
    #[serde(default)]
    pub has_contract_address: bool,
    #[serde(default)]
    pub mode: Option<CurrencyMode>,
    #[serde(default)]
    pub token: TokenInfo,
}

fn default_true() -> bool {
    true
}

/// State once the network is usable: depends only on the currency.
fn currency_state(mode: CurrencyMode, token: &TokenInfo) -> AppState {
    match mode {
        CurrencyMode::Ether => AppState::SelectedCurrency,
        CurrencyMode::Token if token.is_complete() => AppState::SelectedCurrency,
        CurrencyMode::Token => AppState::ConnectedToWallet,
    }
}

/// Derive the state from the current signals.
///
/// Returns `prior` unchanged while the wallet connection is in a transient
/// state, before any currency mode is chosen, and while contract discovery
/// is still running on a network that is not yet known to be usable.
pub fn reduce(prior: AppState, signals: &SessionSignals) -> AppState {
    if !signals.provider_available {
        return AppState::WalletRequired;
    }
    if signals.status.is_transient() {
        return prior;
    }
    let Some(mode) = signals.mode else {
        return prior;
    };

    if signals.status == WalletStatus::Disconnected {
        return AppState::UnlockWallet;
    }

    if !signals.chain_supported || !signals.contract_deployed {
        if signals.bytecode_loading && signals.has_contract_address {
            return prior;
        }
        // A verified contract on a chain outside the built-in set is usable.
        if !signals.contract_deployed {
            return AppState::NetworkUnavailable;
        }
    }

    currency_state(mode, &signals.token)
}

/// Holds the current [`AppState`] between signal changes.
pub struct SessionMachine {
    state: AppState,
    sink: SharedSink,
}

impl SessionMachine {
    pub fn new(sink: SharedSink) -> Self {
        SessionMachine {
            state: AppState::UnlockWallet,
            sink,
        }
    }

    pub fn state(&self) -> AppState {
        self.state
    }

    /// Re-derive the state after any signal change.
    pub fn apply(&mut self, signals: &SessionSignals) -> AppState {
        let next = reduce(self.state, signals);
        if next == AppState::NetworkUnavailable && self.state != next {
            self.sink.debug(
                COMPONENT,
                &format!(
                    "chain {:?} is not fully supported or contract is not valid",
                    signals.chain_id
                ),
            );
        } else if !signals.chain_supported && signals.contract_deployed && next >= AppState::ConnectedToWallet {
            self.sink.debug(
                COMPONENT,
                &format!(
                    "chain {:?} has a valid disperse contract despite not being in the built-in list",
                    signals.chain_id
                ),
            );
        }
        self.set(next);
        self.state
    }

    /// Amount entry nudge: a non-empty recipient list for a fully specified
    /// currency moves the session to [`AppState::EnteredAmounts`].
    pub fn enter_amounts(
        &mut self,
        recipients: &[Recipient],
        mode: Option<CurrencyMode>,
        token: &TokenInfo,
    ) -> AppState {
        let currency_complete = match mode {
            Some(CurrencyMode::Ether) => true,
            Some(CurrencyMode::Token) => token.is_complete(),
            None => false,
        };
        if !recipients.is_empty() && currency_complete {
            self.set(AppState::EnteredAmounts);
        }
        self.state
    }

    /// Direct transition requested by a user action (see [`CurrencySelection`]).
    pub(crate) fn set(&mut self, next: AppState) {
        if next != self.state {
            self.sink
                .debug(COMPONENT, &format!("app state changed to: {next}"));
            self.state = next;
        }
    }
}
