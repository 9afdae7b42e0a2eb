use alloy::primitives::Address;
use serde::{Deserialize, Serialize};

/// Where the disperse contract may live, and what its code looks like.
///
/// In JSON:
/// `{"legacy": "0xD152...", "createx": "0x...", "runtime": "0x6080..."}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deployment {
    /// Address of the original deployment, shared by most chains.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legacy: Option<Address>,
    /// Deterministic CreateX deployment address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub createx: Option<Address>,
    /// Expected runtime bytecode, hex with or without `0x`.
    pub runtime: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateLabel {
    Legacy,
    Createx,
    Custom,
}

impl std::fmt::Display for CandidateLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CandidateLabel::Legacy => write!(f, "legacy"),
            CandidateLabel::Createx => write!(f, "createx"),
            CandidateLabel::Custom => write!(f, "custom"),
        }
    }
}

/// An address that might host the disperse contract on the current chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CandidateAddress {
    pub address: Address,
    pub label: CandidateLabel,
}

/// The candidate whose code matched the expected runtime bytecode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VerifiedAddress {
    pub address: Address,
    pub label: CandidateLabel,
}

impl From<CandidateAddress> for VerifiedAddress {
    fn from(c: CandidateAddress) -> Self {
        VerifiedAddress {
            address: c.address,
            label: c.label,
        }
    }
}

impl std::fmt::Display for VerifiedAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.address, self.label)
    }
}

/// Ordered candidate list: legacy, createx, then the user's custom
/// deployment. Absent entries are skipped.
pub fn candidate_addresses(deployment: &Deployment, custom: Option<Address>) -> Vec<CandidateAddress> {
    [
        (deployment.legacy, CandidateLabel::Legacy),
        (deployment.createx, CandidateLabel::Createx),
        (custom, CandidateLabel::Custom),
    ]
    .into_iter()
    .filter_map(|(address, label)| address.map(|address| CandidateAddress { address, label }))
    .collect()
}

/// Address to show for the contract: the verified one, else legacy.
pub fn contract_address(verified: Option<&VerifiedAddress>, deployment: &Deployment) -> Option<Address> {
    verified.map(|v| v.address).or(deployment.legacy)
}
