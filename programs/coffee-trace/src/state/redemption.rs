use {
    alloy_primitives::{Address, B256},
    chrono::{DateTime, Utc},
    serde::Serialize,
};

use crate::{
    abi::IRedemption,
    error::ContractError,
    state::{chain_timestamp, chain_u64, optional_chain_timestamp},
    status::RedemptionStatus,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Redemption {
    pub redemption_id: u64,
    pub consumer: Address,
    pub batch_id: u64,
    pub quantity: u64,
    pub delivery_address: String,
    pub requested_at: DateTime<Utc>,
    pub status: RedemptionStatus,
    /// Only set once the redemption is fulfilled
    pub fulfilled_at: Option<DateTime<Utc>>,
}

impl Redemption {
    /// Returns `None` for the empty record of an id that was never issued.
    pub fn from_chain(
        redemption_id: u64,
        raw: &IRedemption::getRedemptionDetailsReturn,
    ) -> Result<Option<Self>, ContractError> {
        if raw.consumer.is_zero() {
            return Ok(None);
        }
        let status = RedemptionStatus::from_code(u64::from(raw.status));
        let fulfilled_at = match status {
            RedemptionStatus::Fulfilled => optional_chain_timestamp(raw.fulfillmentDate, "fulfillmentDate")?,
            _ => None,
        };
        Ok(Some(Self {
            redemption_id,
            consumer: raw.consumer,
            batch_id: chain_u64(raw.batchId, "batchId")?,
            quantity: chain_u64(raw.quantity, "quantity")?,
            delivery_address: raw.deliveryAddress.clone(),
            requested_at: chain_timestamp(raw.requestDate, "requestDate")?,
            status,
            fulfilled_at,
        }))
    }
}

/// Result of `request_redemption`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RedemptionRequest {
    pub transaction_hash: B256,
    pub redemption_id: u64,
    pub batch_id: u64,
    pub quantity: u64,
}

impl RedemptionRequest {
    pub fn from_event(
        transaction_hash: B256,
        event: &IRedemption::RedemptionRequested,
    ) -> Result<Self, ContractError> {
        Ok(Self {
            transaction_hash,
            redemption_id: chain_u64(event.redemptionId, "redemptionId")?,
            batch_id: chain_u64(event.batchId, "batchId")?,
            quantity: chain_u64(event.quantity, "quantity")?,
        })
    }
}

/// Result of a status update or cancellation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RedemptionStatusChange {
    pub transaction_hash: B256,
    pub redemption_id: u64,
    pub previous: RedemptionStatus,
    pub status: RedemptionStatus,
}
