use std::path::Path;

use alloy::primitives::Address;
use anyhow::{Context, Result, anyhow, bail};

use crate::model::Deployment;
use crate::model::recipient::parse_address;

pub const RPC_URL_ENV: &str = "DISPERSE_RPC_URL";
pub const CUSTOM_CONTRACT_ENV: &str = "DISPERSE_CUSTOM_CONTRACT";

/// Runtime configuration shared by the on-chain commands.
pub struct RuntimeConfig {
    pub rpc_url: String,
    pub deployment: Deployment,
    pub custom_contract: Option<Address>,
    pub cache_capacity: usize,
}

impl RuntimeConfig {
    pub fn from_cli(cli: &crate::run::RunConfig) -> Result<Self> {
        let rpc_url = match &cli.rpc_url {
            Some(url) => url.clone(),
            None => std::env::var(RPC_URL_ENV).map_err(|_| {
                anyhow!("No RPC endpoint. Pass --rpc-url or set the {RPC_URL_ENV} env var.")
            })?,
        };

        let custom = cli
            .custom_contract
            .clone()
            .or_else(|| std::env::var(CUSTOM_CONTRACT_ENV).ok());
        let custom_contract = match custom {
            Some(s) => Some(
                parse_address(s.trim())
                    .ok_or_else(|| anyhow!("Invalid custom contract address '{s}'"))?,
            ),
            None => None,
        };

        let deployment = load_deployment(&cli.deploy)?;

        Ok(RuntimeConfig {
            rpc_url,
            deployment,
            custom_contract,
            cache_capacity: cli.cache_capacity,
        })
    }
}

/// Read a deployment manifest (candidate addresses + runtime bytecode).
pub fn load_deployment(path: &Path) -> Result<Deployment> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("reading deployment manifest {}", path.display()))?;
    let deployment: Deployment = serde_json::from_str(&contents)
        .with_context(|| format!("parsing deployment manifest {}", path.display()))?;
    if deployment.runtime.trim_start_matches("0x").is_empty() {
        bail!(
            "Deployment manifest {} has an empty `runtime` bytecode",
            path.display()
        );
    }
    Ok(deployment)
}
