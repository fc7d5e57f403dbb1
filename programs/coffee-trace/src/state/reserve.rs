use {
    alloy_primitives::{Address, B256},
    serde::Serialize,
};

use crate::{abi::IProofOfReserve, error::ContractError, state::chain_u64};

/// A submitted proof-of-reserve request. The oracle answers later through
/// its own callback; the outcome is not visible here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReserveVerification {
    pub transaction_hash: B256,
    pub request_id: B256,
    pub batch_id: u64,
    pub quantity: u64,
    pub recipient: Address,
    /// Verification descriptor handed to the oracle
    pub source: String,
}

impl ReserveVerification {
    pub fn from_event(
        transaction_hash: B256,
        event: &IProofOfReserve::VerificationRequested,
        source: &str,
    ) -> Result<Self, ContractError> {
        Ok(Self {
            transaction_hash,
            request_id: event.requestId,
            batch_id: chain_u64(event.batchId, "batchId")?,
            quantity: chain_u64(event.quantity, "quantity")?,
            recipient: event.recipient,
            source: source.to_string(),
        })
    }
}
