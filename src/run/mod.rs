pub mod config;

use std::path::PathBuf;
use std::sync::Arc;

use alloy::primitives::Address;
use anyhow::{Context, Result, anyhow};

use crate::chain_data::{self, ChainData, RpcChainData};
use crate::errors::format_error;
use crate::ledger::{self, Ledger};
use crate::locate::{self, BytecodeMatcher, ContractLocator, LocatorState};
use crate::logging::{self, SharedSink};
use crate::model::chain;
use crate::model::deployment::{self, candidate_addresses};
use crate::model::recipient::parse_address;
use crate::model::{CurrencyMode, Recipient, VerifiedAddress};
use crate::parse::{RecipientParser, format_signed_units, format_units_wide};
use crate::session::{AppState, CurrencySelection, SessionMachine, SessionSignals, WalletStatus};

use config::RuntimeConfig;

/// CLI-facing config struct (before env var resolution).
pub struct RunConfig {
    pub rpc_url: Option<String>,
    pub deploy: PathBuf,
    pub custom_contract: Option<String>,
    pub cache_capacity: usize,
}

/// Arguments of the `check` subcommand besides the shared [`RunConfig`].
pub struct CheckArgs {
    pub recipients_file: PathBuf,
    pub account: String,
    pub token: Option<String>,
}

/// CLI entry point for the `locate` subcommand.
pub fn locate(cli_config: &RunConfig) -> Result<()> {
    let config = RuntimeConfig::from_cli(cli_config)?;

    println!("=== disperse locate ===");
    println!("RPC:        {}", config.rpc_url);
    println!("Candidates: {}", candidate_addresses(&config.deployment, config.custom_contract).len());
    println!();

    let rt = tokio::runtime::Runtime::new().context("creating tokio runtime")?;
    rt.block_on(locate_async(config))
}

async fn locate_async(config: RuntimeConfig) -> Result<()> {
    let chain = RpcChainData::connect(&config.rpc_url)
        .await
        .map_err(|e| anyhow!("connecting to {}: {}", config.rpc_url, e.display_message()))?;
    let chain_id = chain.chain_id().await.map_err(|e| anyhow!(format_error(&e)))?;
    println!("Network:    {} ({chain_id})", network_label(chain_id));

    let locator = discover(&chain, chain_id, &config, logging::tracing_sink()).await;
    match locator.state() {
        LocatorState::Verified(v) => println!("Disperse contract: {v}"),
        LocatorState::Exhausted => {
            println!("No disperse contract found on this chain.");
            if chain::can_deploy_to_network(Some(chain_id)) {
                println!("Deploy one and pass it with --custom-contract.");
            }
        }
        LocatorState::Pending { index } => println!("Discovery stopped at candidate #{index}."),
        LocatorState::Idle => println!("Nothing to check."),
    }

    if let Some(address) = deployment::contract_address(locator.verified().as_ref(), &config.deployment) {
        println!("Contract address in use: {address:#x}");
    }
    Ok(())
}

/// CLI entry point for the `check` subcommand.
pub fn check(args: &CheckArgs, cli_config: &RunConfig) -> Result<()> {
    let config = RuntimeConfig::from_cli(cli_config)?;
    let account = parse_address(args.account.trim())
        .ok_or_else(|| anyhow!("Invalid account address '{}'", args.account))?;
    let text = std::fs::read_to_string(&args.recipients_file)
        .with_context(|| format!("reading recipients from {}", args.recipients_file.display()))?;

    println!("=== disperse check ===");
    println!("RPC:      {}", config.rpc_url);
    println!("Account:  {account:#x}");
    println!("Currency: {}", args.token.as_deref().unwrap_or("native"));
    println!();

    let rt = tokio::runtime::Runtime::new().context("creating tokio runtime")?;
    rt.block_on(check_async(config, account, args.token.as_deref(), &text))
}

async fn check_async(config: RuntimeConfig, account: Address, token: Option<&str>, text: &str) -> Result<()> {
    let chain = RpcChainData::connect(&config.rpc_url)
        .await
        .map_err(|e| anyhow!("connecting to {}: {}", config.rpc_url, e.display_message()))?;
    let report = evaluate(&chain, &config, account, token, text, logging::tracing_sink()).await?;

    if let Some(e) = &report.token_error {
        println!("Token:      {e}");
    }
    let (decimals, symbol) = (report.decimals, report.symbol.as_str());
    println!("Network:    {} ({})", network_label(report.chain_id), report.chain_id);
    match &report.verified {
        Some(v) => println!("Contract:   {v}"),
        None => println!("Contract:   not found"),
    }
    println!("State:      {}", report.state);
    println!("Recipients: {}", report.recipients.len());
    println!("Total:      {} {symbol}", format_units_wide(report.ledger.total, decimals));
    println!("Balance:    {}", ledger::format_balance(report.ledger.balance, decimals, symbol));
    println!("Left:       {} {symbol}", format_signed_units(report.ledger.left, decimals));
    if report.mode == Some(CurrencyMode::Token) {
        println!("Allowance:  {}", ledger::format_balance(report.ledger.allowance, decimals, symbol));
    }
    match report.ledger.message {
        Some(message) => println!("Status:     {message}"),
        None if report.state == AppState::EnteredAmounts => println!("Status:     ready to disperse"),
        None => println!("Status:     not ready ({})", report.state),
    }
    Ok(())
}

/// Outcome of evaluating a recipient list for one account.
#[derive(Debug, Clone)]
pub struct CheckReport {
    pub chain_id: u64,
    pub verified: Option<VerifiedAddress>,
    pub state: AppState,
    pub mode: Option<CurrencyMode>,
    pub decimals: u8,
    pub symbol: String,
    pub recipients: Vec<Recipient>,
    pub ledger: Ledger,
    /// Why the requested token could not be loaded.
    pub token_error: Option<String>,
}

/// Discover the contract, settle the session state, parse `text` and
/// compute the ledger for `account`.
///
/// `token` selects token mode; native currency otherwise. Allowances are
/// only ever read against a verified contract.
pub async fn evaluate(
    chain: &dyn ChainData,
    config: &RuntimeConfig,
    account: Address,
    token: Option<&str>,
    text: &str,
    sink: SharedSink,
) -> Result<CheckReport> {
    let chain_id = chain.chain_id().await.map_err(|e| anyhow!(format_error(&e)))?;

    // ── Contract discovery ──
    let locator = discover(chain, chain_id, config, sink.clone()).await;
    let verified = locator.verified();
    let spender = verified.map(|v| v.address);

    // ── Currency ──
    let mut machine = SessionMachine::new(sink.clone());
    let mut selection = CurrencySelection::with_default_mode();
    let mut token_error = None;
    match token {
        Some(input) => match chain_data::load_token(chain, input, Some(account), spender).await {
            Ok(info) => selection.select_token(info, &mut machine),
            Err(e) => {
                token_error = Some(format_error(&e));
                selection.select_currency(CurrencyMode::Token, &mut machine);
            }
        },
        None => selection.select_currency(CurrencyMode::Ether, &mut machine),
    }

    let native = chain
        .native_balance(account)
        .await
        .map_err(|e| anyhow!("reading native balance: {}", format_error(&e)))?;

    let signals = SessionSignals {
        provider_available: true,
        status: WalletStatus::Connected,
        chain_id: Some(chain_id),
        chain_supported: chain::is_supported(chain_id),
        contract_deployed: locator.is_contract_deployed(),
        bytecode_loading: locator.is_bytecode_loading(),
        has_contract_address: deployment::contract_address(verified.as_ref(), &config.deployment).is_some(),
        mode: selection.mode(),
        token: selection.token().clone(),
    };
    machine.apply(&signals);

    // ── Amounts ──
    let mode = selection.mode();
    let decimals = ledger::decimals(mode, selection.token());
    let symbol = ledger::symbol(mode, selection.token(), Some(chain_id));
    let recipients = RecipientParser::new(sink).parse(text, decimals);
    // Amounts are only accepted once the network is usable.
    if machine.state() >= AppState::ConnectedToWallet {
        machine.enter_amounts(&recipients, mode, selection.token());
    }

    // The loader's allowance may already be stale; re-read it for the ledger.
    let fresh_allowance = match (mode, selection.token().address, spender) {
        (Some(CurrencyMode::Token), Some(token_address), Some(spender)) => {
            match chain.token_allowance(token_address, account, spender).await {
                Ok(allowance) => Some(allowance),
                Err(e) => {
                    tracing::warn!(error = %e.display_message(), "allowance refresh failed");
                    None
                }
            }
        }
        _ => None,
    };
    let ledger = Ledger::compute(&recipients, mode, selection.token(), Some(native), fresh_allowance);

    Ok(CheckReport {
        chain_id,
        verified,
        state: machine.state(),
        mode,
        decimals,
        symbol,
        recipients,
        ledger,
        token_error,
    })
}

/// Build a locator for the connected chain and run it to completion.
async fn discover(
    chain: &dyn ChainData,
    chain_id: u64,
    config: &RuntimeConfig,
    sink: SharedSink,
) -> ContractLocator {
    let matcher = Arc::new(BytecodeMatcher::new(&config.deployment.runtime, config.cache_capacity));
    let candidates = candidate_addresses(&config.deployment, config.custom_contract);
    let mut locator = ContractLocator::new(candidates, matcher, sink);
    locator.set_chain(Some(chain_id));
    locator.set_connected(true);

    locate::drive(&mut locator, chain, |e| {
        tracing::warn!(error = %e.display_message(), "bytecode lookup failed");
    })
    .await;
    locator
}

fn network_label(chain_id: u64) -> String {
    chain::network_name(Some(chain_id)).unwrap_or_else(|| "unknown network".to_string())
}
