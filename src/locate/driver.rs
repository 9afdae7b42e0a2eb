use std::sync::Arc;

use crate::chain_data::ChainData;
use crate::errors::ExternalCallError;
use crate::logging::SharedSink;
use crate::model::{CandidateAddress, VerifiedAddress};

use super::{BytecodeMatcher, ContractLocator, LocatorState};

/// Run the locator against `chain` until it verifies or runs out of
/// candidates.
///
/// Lookups are issued strictly one after another. A failed lookup is
/// reported through `on_error` and the search continues with the next
/// candidate.
pub async fn drive<F>(locator: &mut ContractLocator, chain: &dyn ChainData, mut on_error: F) -> LocatorState
where
    F: FnMut(&ExternalCallError),
{
    while let Some(request) = locator.next_request() {
        match chain.get_code(request.address(), request.chain_id).await {
            Ok(code) => {
                locator.on_bytecode(&request, Some(&code));
            }
            Err(e) => {
                on_error(&e);
                locator.on_error(&request);
            }
        }
    }
    locator.state()
}

/// One-shot discovery on whatever chain `chain` is attached to.
pub async fn locate_contract<F>(
    chain: &dyn ChainData,
    candidates: Vec<CandidateAddress>,
    matcher: Arc<BytecodeMatcher>,
    sink: SharedSink,
    mut on_error: F,
) -> Option<VerifiedAddress>
where
    F: FnMut(&ExternalCallError),
{
    let chain_id = match chain.chain_id().await {
        Ok(id) => id,
        Err(e) => {
            on_error(&e);
            return None;
        }
    };

    let mut locator = ContractLocator::new(candidates, matcher, sink);
    locator.set_chain(Some(chain_id));
    locator.set_connected(true);
    drive(&mut locator, chain, on_error).await;
    locator.verified()
}
