pub mod chain_data;
pub mod errors;
pub mod generate;
pub mod ledger;
pub mod locate;
pub mod logging;
pub mod model;
pub mod parse;
pub mod run;
pub mod session;

#[cfg(feature = "full")]
pub mod cli;

#[cfg(feature = "wasm")]
pub mod wasm;
