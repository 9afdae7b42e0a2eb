use alloy::primitives::{Address, U256};

use disperse_engine::logging;
use disperse_engine::model::{CurrencyMode, Recipient, TokenInfo};
use disperse_engine::session::{
    AppState, CurrencySelection, SessionMachine, SessionSignals, WalletStatus, reduce,
};

fn connected(mode: CurrencyMode) -> SessionSignals {
    SessionSignals {
        provider_available: true,
        status: WalletStatus::Connected,
        chain_id: Some(1),
        chain_supported: true,
        contract_deployed: true,
        bytecode_loading: false,
        has_contract_address: true,
        mode: Some(mode),
        token: TokenInfo::default(),
    }
}

fn dai() -> TokenInfo {
    TokenInfo {
        address: Some(Address::repeat_byte(0x6b)),
        name: Some("Dai Stablecoin".into()),
        symbol: Some("DAI".into()),
        decimals: Some(18),
        balance: Some(U256::from(1000u64)),
        allowance: None,
    }
}

fn one_recipient() -> Vec<Recipient> {
    vec![Recipient::new(Address::repeat_byte(0x01), U256::from(1u64))]
}

// ── reduce ───────────────────────────────────────────────────────────

#[test]
fn test_ether_on_usable_network_selects_currency() {
    let s = connected(CurrencyMode::Ether);
    assert_eq!(reduce(AppState::UnlockWallet, &s), AppState::SelectedCurrency);
}

#[test]
fn test_token_without_decimals_waits_for_token() {
    let mut s = connected(CurrencyMode::Token);
    s.token = TokenInfo {
        decimals: None,
        ..dai()
    };
    assert_eq!(reduce(AppState::UnlockWallet, &s), AppState::ConnectedToWallet);

    s.token = dai();
    assert_eq!(reduce(AppState::ConnectedToWallet, &s), AppState::SelectedCurrency);
}

#[test]
fn test_missing_provider_wins() {
    let mut s = connected(CurrencyMode::Ether);
    s.provider_available = false;
    assert_eq!(reduce(AppState::EnteredAmounts, &s), AppState::WalletRequired);
}

#[test]
fn test_transient_status_keeps_prior() {
    for status in [WalletStatus::Connecting, WalletStatus::Reconnecting] {
        let mut s = connected(CurrencyMode::Ether);
        s.status = status;
        s.contract_deployed = false;
        assert_eq!(reduce(AppState::EnteredAmounts, &s), AppState::EnteredAmounts);
        assert_eq!(reduce(AppState::UnlockWallet, &s), AppState::UnlockWallet);
    }
}

#[test]
fn test_no_mode_keeps_prior() {
    let mut s = connected(CurrencyMode::Ether);
    s.mode = None;
    assert_eq!(reduce(AppState::UnlockWallet, &s), AppState::UnlockWallet);
}

#[test]
fn test_disconnected_asks_for_unlock() {
    let mut s = connected(CurrencyMode::Ether);
    s.status = WalletStatus::Disconnected;
    assert_eq!(reduce(AppState::SelectedCurrency, &s), AppState::UnlockWallet);
}

#[test]
fn test_undeployed_contract_is_unavailable() {
    let mut s = connected(CurrencyMode::Ether);
    s.contract_deployed = false;
    assert_eq!(reduce(AppState::SelectedCurrency, &s), AppState::NetworkUnavailable);
}

#[test]
fn test_loading_bytecode_keeps_prior() {
    let mut s = connected(CurrencyMode::Ether);
    s.contract_deployed = false;
    s.bytecode_loading = true;
    assert_eq!(reduce(AppState::SelectedCurrency, &s), AppState::SelectedCurrency);

    // Without a candidate address there is nothing to wait for.
    s.has_contract_address = false;
    assert_eq!(reduce(AppState::SelectedCurrency, &s), AppState::NetworkUnavailable);
}

#[test]
fn test_verified_contract_on_unlisted_chain_is_usable() {
    let mut s = connected(CurrencyMode::Ether);
    s.chain_id = Some(777_777);
    s.chain_supported = false;
    assert_eq!(reduce(AppState::UnlockWallet, &s), AppState::SelectedCurrency);
}

#[test]
fn test_reduce_is_stable() {
    let s = connected(CurrencyMode::Ether);
    let once = reduce(AppState::UnlockWallet, &s);
    assert_eq!(reduce(once, &s), once);
}

#[test]
fn test_signals_from_json() {
    let json = r#"{"status":"connected","chain_supported":true,"contract_deployed":true,"mode":"ether"}"#;
    let s: SessionSignals = serde_json::from_str(json).unwrap();
    assert!(s.provider_available);
    assert_eq!(reduce(AppState::UnlockWallet, &s), AppState::SelectedCurrency);
    assert_eq!(serde_json::to_string(&AppState::NetworkUnavailable).unwrap(), "\"NETWORK_UNAVAILABLE\"");
}

// ── SessionMachine ───────────────────────────────────────────────────

#[test]
fn test_machine_starts_locked() {
    let machine = SessionMachine::new(logging::noop_sink());
    assert_eq!(machine.state(), AppState::UnlockWallet);
}

#[test]
fn test_amount_entry_nudge() {
    let mut machine = SessionMachine::new(logging::noop_sink());
    machine.apply(&connected(CurrencyMode::Ether));

    assert_eq!(
        machine.enter_amounts(&[], Some(CurrencyMode::Ether), &TokenInfo::default()),
        AppState::SelectedCurrency
    );
    assert_eq!(
        machine.enter_amounts(&one_recipient(), Some(CurrencyMode::Ether), &TokenInfo::default()),
        AppState::EnteredAmounts
    );
}

#[test]
fn test_amount_entry_needs_complete_token() {
    let mut machine = SessionMachine::new(logging::noop_sink());
    let mut s = connected(CurrencyMode::Token);
    machine.apply(&s);
    assert_eq!(machine.state(), AppState::ConnectedToWallet);

    let partial = TokenInfo {
        symbol: None,
        ..dai()
    };
    assert_eq!(
        machine.enter_amounts(&one_recipient(), Some(CurrencyMode::Token), &partial),
        AppState::ConnectedToWallet
    );

    s.token = dai();
    machine.apply(&s);
    assert_eq!(
        machine.enter_amounts(&one_recipient(), Some(CurrencyMode::Token), &dai()),
        AppState::EnteredAmounts
    );
}

#[test]
fn test_signal_change_overrides_entered_amounts() {
    let mut machine = SessionMachine::new(logging::noop_sink());
    let mut s = connected(CurrencyMode::Ether);
    machine.apply(&s);
    machine.enter_amounts(&one_recipient(), s.mode, &s.token);
    assert_eq!(machine.state(), AppState::EnteredAmounts);

    s.status = WalletStatus::Disconnected;
    assert_eq!(machine.apply(&s), AppState::UnlockWallet);
}

// ── CurrencySelection ────────────────────────────────────────────────

#[test]
fn test_currency_selection_flow() {
    let mut machine = SessionMachine::new(logging::noop_sink());
    let mut selection = CurrencySelection::with_default_mode();
    assert_eq!(selection.mode(), Some(CurrencyMode::Ether));

    selection.select_currency(CurrencyMode::Token, &mut machine);
    assert_eq!(machine.state(), AppState::ConnectedToWallet);

    selection.select_token(dai(), &mut machine);
    assert_eq!(machine.state(), AppState::SelectedCurrency);
    assert_eq!(selection.token().symbol.as_deref(), Some("DAI"));

    selection.update_allowance(U256::from(50u64));
    assert_eq!(selection.token().allowance, Some(U256::from(50u64)));

    selection.reset_token(&mut machine);
    assert_eq!(machine.state(), AppState::ConnectedToWallet);
    assert!(selection.token().address.is_none());

    selection.select_currency(CurrencyMode::Ether, &mut machine);
    assert_eq!(machine.state(), AppState::SelectedCurrency);
}

#[test]
fn test_allowance_ignored_without_token() {
    let mut selection = CurrencySelection::new();
    selection.update_allowance(U256::from(1u64));
    assert_eq!(selection.token().allowance, None);
}
