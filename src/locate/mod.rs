//! Discovery of the disperse contract on the connected chain.
//!
//! Candidates are checked one at a time, in order. The cursor only moves
//! when code for the current candidate arrives; a match stops the search.
//! Changing chain resets the cursor and forgets the verified address before
//! any new request goes out, and replies addressed to the old chain are
//! discarded when they land.

pub mod bytecode;
pub mod driver;

use std::sync::Arc;

use alloy::primitives::{Address, Bytes};
use serde::Serialize;

use crate::logging::SharedSink;
use crate::model::{CandidateAddress, VerifiedAddress};

pub use bytecode::{BytecodeMatcher, DEFAULT_CACHE_CAPACITY};
pub use driver::{drive, locate_contract};

const COMPONENT: &str = "locator";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum LocatorState {
    /// No chain, no connection or no candidates: nothing to check.
    Idle,
    /// Waiting for code of the candidate at `index`.
    Pending { index: usize },
    Verified(VerifiedAddress),
    /// Every candidate was checked and none matched.
    Exhausted,
}

/// A bytecode lookup handed out by [`ContractLocator::next_request`].
///
/// The result must be fed back with the same request so stale replies
/// (from before a chain switch) can be told apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeRequest {
    pub chain_id: u64,
    pub index: usize,
    pub candidate: CandidateAddress,
    epoch: u64,
}

impl CodeRequest {
    pub fn address(&self) -> Address {
        self.candidate.address
    }
}

pub struct ContractLocator {
    candidates: Vec<CandidateAddress>,
    chain_id: Option<u64>,
    connected: bool,
    state: LocatorState,
    in_flight: Option<CodeRequest>,
    /// Bumped on every reset; requests from older epochs are stale.
    epoch: u64,
    matcher: Arc<BytecodeMatcher>,
    sink: SharedSink,
}

impl ContractLocator {
    pub fn new(candidates: Vec<CandidateAddress>, matcher: Arc<BytecodeMatcher>, sink: SharedSink) -> Self {
        sink.debug(COMPONENT, &format!("potential disperse addresses: {candidates:?}"));
        ContractLocator {
            candidates,
            chain_id: None,
            connected: false,
            state: LocatorState::Idle,
            in_flight: None,
            epoch: 0,
            matcher,
            sink,
        }
    }

    // ── Inputs ───────────────────────────────────────────────────────

    /// Switch chains. Any change resets synchronously.
    pub fn set_chain(&mut self, chain_id: Option<u64>) {
        if self.chain_id == chain_id {
            return;
        }
        self.chain_id = chain_id;
        self.reset();
    }

    pub fn set_connected(&mut self, connected: bool) {
        if self.connected == connected {
            return;
        }
        self.connected = connected;
        if !connected {
            // An answer for a disconnected session is not trusted.
            self.in_flight = None;
        }
    }

    /// Replace the candidate list (e.g. after a custom deployment).
    ///
    /// A verified address that is still a candidate is kept; otherwise the
    /// search starts over.
    pub fn set_candidates(&mut self, candidates: Vec<CandidateAddress>) {
        if candidates == self.candidates {
            return;
        }
        self.sink
            .debug(COMPONENT, &format!("potential disperse addresses: {candidates:?}"));
        self.candidates = candidates;
        match self.state {
            LocatorState::Verified(v) if self.is_candidate(&v) => {}
            _ => self.reset(),
        }
    }

    fn is_candidate(&self, v: &VerifiedAddress) -> bool {
        self.candidates
            .iter()
            .any(|c| c.address == v.address && c.label == v.label)
    }

    fn reset(&mut self) {
        self.epoch += 1;
        self.in_flight = None;
        self.state = if self.chain_id.is_some() && !self.candidates.is_empty() {
            LocatorState::Pending { index: 0 }
        } else {
            LocatorState::Idle
        };
    }

    // ── Requests and events ──────────────────────────────────────────

    /// The next lookup to perform, if one is due.
    ///
    /// Returns `None` while a request is outstanding, so at most one lookup
    /// is ever in flight.
    pub fn next_request(&mut self) -> Option<CodeRequest> {
        if self.in_flight.is_some() || !self.connected {
            return None;
        }
        let LocatorState::Pending { index } = self.state else {
            return None;
        };
        let chain_id = self.chain_id?;
        let candidate = *self.candidates.get(index)?;

        self.sink.debug(
            COMPONENT,
            &format!(
                "checking contract at {} address: {}",
                candidate.label, candidate.address
            ),
        );
        let request = CodeRequest {
            chain_id,
            index,
            candidate,
            epoch: self.epoch,
        };
        self.in_flight = Some(request);
        Some(request)
    }

    fn is_current(&self, request: &CodeRequest) -> bool {
        self.in_flight.as_ref() == Some(request) && request.epoch == self.epoch
    }

    /// Code for a requested candidate arrived. `None` means no code.
    pub fn on_bytecode(&mut self, request: &CodeRequest, code: Option<&Bytes>) -> LocatorState {
        if !self.is_current(request) {
            self.discard(request);
            return self.state;
        }
        self.in_flight = None;

        let code_len = code.map_or(0, |c| c.len());
        self.sink.debug(
            COMPONENT,
            &format!(
                "chain {}, address {}, code length: {code_len}",
                request.chain_id, request.candidate.address
            ),
        );

        if code.is_some_and(|c| self.matcher.matches_bytes(c)) {
            let verified = VerifiedAddress::from(request.candidate);
            self.sink.debug(
                COMPONENT,
                &format!(
                    "found valid disperse contract at {} address: {}",
                    verified.label, verified.address
                ),
            );
            self.state = LocatorState::Verified(verified);
            return self.state;
        }
        self.advance(request)
    }

    /// The lookup failed. The candidate counts as unverified and the
    /// cursor moves on, exactly as for an address without code.
    pub fn on_error(&mut self, request: &CodeRequest) -> LocatorState {
        if !self.is_current(request) {
            self.discard(request);
            return self.state;
        }
        self.in_flight = None;
        self.sink.debug(
            COMPONENT,
            &format!(
                "lookup failed for {} address: {}",
                request.candidate.label, request.candidate.address
            ),
        );
        self.advance(request)
    }

    fn discard(&self, request: &CodeRequest) {
        self.sink.debug(
            COMPONENT,
            &format!(
                "discarding stale bytecode for {} on chain {}",
                request.candidate.address, request.chain_id
            ),
        );
    }

    fn advance(&mut self, request: &CodeRequest) -> LocatorState {
        if request.index + 1 < self.candidates.len() {
            self.state = LocatorState::Pending {
                index: request.index + 1,
            };
        } else {
            self.sink.debug(
                COMPONENT,
                &format!("no valid contract found on chain {}", request.chain_id),
            );
            self.state = LocatorState::Exhausted;
        }
        self.state
    }

    // ── Outputs ──────────────────────────────────────────────────────

    pub fn state(&self) -> LocatorState {
        self.state
    }

    pub fn verified(&self) -> Option<VerifiedAddress> {
        match self.state {
            LocatorState::Verified(v) => Some(v),
            _ => None,
        }
    }

    pub fn is_contract_deployed(&self) -> bool {
        self.verified().is_some()
    }

    /// A lookup is in flight, or the next one is due on a live connection.
    pub fn is_bytecode_loading(&self) -> bool {
        if self.in_flight.is_some() {
            return true;
        }
        self.connected && self.chain_id.is_some() && matches!(self.state, LocatorState::Pending { .. })
    }

    pub fn has_candidate_address(&self) -> bool {
        !self.candidates.is_empty()
    }

    pub fn candidates(&self) -> &[CandidateAddress] {
        &self.candidates
    }

    pub fn chain_id(&self) -> Option<u64> {
        self.chain_id
    }

    pub fn in_flight(&self) -> Option<&CodeRequest> {
        self.in_flight.as_ref()
    }
}
