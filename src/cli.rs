use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::locate::DEFAULT_CACHE_CAPACITY;

/// Disperse decision engine: parse recipient lists, generate test batches,
/// locate the disperse contract and check a batch against an account.
#[derive(Parser)]
#[command(name = "disperse", version, about)]
pub struct Cli {
    /// Debug-level logging (overridden by RUST_LOG)
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Options shared by the subcommands that talk to a chain.
#[derive(Args)]
pub struct ChainArgs {
    /// JSON-RPC endpoint (falls back to DISPERSE_RPC_URL)
    #[arg(long)]
    pub rpc_url: Option<String>,

    /// Deployment manifest with candidate addresses and runtime bytecode
    #[arg(long, default_value = "deploy.json")]
    pub deploy: PathBuf,

    /// Extra candidate address checked after the built-in ones
    /// (falls back to DISPERSE_CUSTOM_CONTRACT)
    #[arg(long)]
    pub custom_contract: Option<String>,

    /// Entries kept in the bytecode verdict cache
    #[arg(long, default_value_t = DEFAULT_CACHE_CAPACITY)]
    pub cache_capacity: usize,
}

#[derive(Subcommand)]
pub enum Command {
    /// Extract (address, amount) pairs from free-form text
    Parse {
        /// File with the recipient text
        file: PathBuf,

        /// Token decimals used to scale amounts
        #[arg(long, default_value = "18")]
        decimals: u8,
    },

    /// Pair every address in a list with a generated amount
    Generate {
        /// File with one address per line
        file: PathBuf,

        /// Same amount for every address
        #[arg(long, conflicts_with_all = ["min", "max"])]
        amount: Option<f64>,

        /// Lower bound for random amounts
        #[arg(long, requires = "max")]
        min: Option<f64>,

        /// Upper bound for random amounts (exclusive)
        #[arg(long, requires = "min")]
        max: Option<f64>,

        /// Digits after the decimal point (0 to 18)
        #[arg(long, default_value = "2")]
        decimal_places: i32,
    },

    /// Find the verified disperse contract on the endpoint's chain
    Locate {
        #[command(flatten)]
        chain: ChainArgs,
    },

    /// Check a recipient list against an account's balance and allowance
    Check {
        /// File with the recipient text
        file: PathBuf,

        /// Account that would send the batch
        #[arg(long)]
        account: String,

        /// ERC20 token address (native currency when omitted)
        #[arg(long)]
        token: Option<String>,

        #[command(flatten)]
        chain: ChainArgs,
    },
}

impl From<ChainArgs> for crate::run::RunConfig {
    fn from(args: ChainArgs) -> Self {
        crate::run::RunConfig {
            rpc_url: args.rpc_url,
            deploy: args.deploy,
            custom_contract: args.custom_contract,
            cache_capacity: args.cache_capacity,
        }
    }
}
