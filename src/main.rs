use anyhow::bail;
use clap::Parser;

use disperse_engine::cli::{self, Command};
use disperse_engine::generate::{self, AmountPolicy, GenerateConfig};
use disperse_engine::{logging, parse, run};

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    logging::init_subscriber(cli.verbose);

    match cli.command {
        Command::Parse { file, decimals } => parse::run(&file, decimals),
        Command::Generate {
            file,
            amount,
            min,
            max,
            decimal_places,
        } => {
            let policy = match (amount, min, max) {
                (Some(amount), _, _) => AmountPolicy::Uniform { amount },
                (None, Some(min), Some(max)) => AmountPolicy::Random { min, max },
                _ => bail!("Pass either --amount or both --min and --max"),
            };
            generate::run(&GenerateConfig {
                addresses_file: file,
                policy,
                decimal_places,
            })
        }
        Command::Locate { chain } => run::locate(&chain.into()),
        Command::Check {
            file,
            account,
            token,
            chain,
        } => run::check(
            &run::CheckArgs {
                recipients_file: file,
                account,
                token,
            },
            &chain.into(),
        ),
    }
}
