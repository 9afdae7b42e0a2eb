pub mod chain;
pub mod deployment;
pub mod recipient;
pub mod token;

pub use chain::Chain;
pub use deployment::{CandidateAddress, CandidateLabel, Deployment, VerifiedAddress};
pub use recipient::Recipient;
pub use token::{CurrencyMode, TokenInfo};
