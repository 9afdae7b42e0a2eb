use crate::model::{CurrencyMode, TokenInfo};

use super::{AppState, SessionMachine};

/// The user's choice of what to disperse.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CurrencySelection {
    mode: Option<CurrencyMode>,
    token: TokenInfo,
}

impl CurrencySelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Native currency is selected until the user picks otherwise.
    pub fn with_default_mode() -> Self {
        CurrencySelection {
            mode: Some(CurrencyMode::Ether),
            token: TokenInfo::default(),
        }
    }

    pub fn mode(&self) -> Option<CurrencyMode> {
        self.mode
    }

    pub fn token(&self) -> &TokenInfo {
        &self.token
    }

    /// Pick ether or token mode.
    ///
    /// Token mode without a complete token falls back to asking for one.
    pub fn select_currency(&mut self, mode: CurrencyMode, machine: &mut SessionMachine) {
        self.mode = Some(mode);
        match mode {
            CurrencyMode::Ether => machine.set(AppState::SelectedCurrency),
            CurrencyMode::Token if self.token.is_complete() => machine.set(AppState::SelectedCurrency),
            CurrencyMode::Token => self.reset_token(machine),
        }
    }

    /// A token finished loading.
    pub fn select_token(&mut self, token: TokenInfo, machine: &mut SessionMachine) {
        self.token = token;
        self.mode = Some(CurrencyMode::Token);
        machine.set(AppState::SelectedCurrency);
    }

    /// Forget the token (load failed or the user switched tokens).
    pub fn reset_token(&mut self, machine: &mut SessionMachine) {
        self.token = TokenInfo::default();
        machine.set(AppState::ConnectedToWallet);
    }

    /// Keep an already loaded token but record a fresh allowance.
    pub fn update_allowance(&mut self, allowance: alloy::primitives::U256) {
        if self.token.address.is_some() {
            self.token.allowance = Some(allowance);
        }
    }
}
