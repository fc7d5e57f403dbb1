use {
    alloy_primitives::B256,
    chrono::{DateTime, Utc},
    serde::Serialize,
};

use crate::{
    abi::ICoffeeToken,
    error::ContractError,
    state::{chain_timestamp, chain_u64},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchInfo {
    pub batch_id: u64,
    pub production_date: DateTime<Utc>,
    pub expiry_date: DateTime<Utc>,
    pub is_verified: bool,
    pub current_quantity: u64,
}

impl BatchInfo {
    /// Returns `None` for the all-zero record the token contract hands back
    /// for ids it never issued.
    pub fn from_chain(
        batch_id: u64,
        raw: &ICoffeeToken::getBatchInfoReturn,
    ) -> Result<Option<Self>, ContractError> {
        if raw.productionDate.is_zero() && raw.expiryDate.is_zero() && raw.currentQuantity.is_zero() {
            return Ok(None);
        }
        Ok(Some(Self {
            batch_id,
            production_date: chain_timestamp(raw.productionDate, "productionDate")?,
            expiry_date: chain_timestamp(raw.expiryDate, "expiryDate")?,
            is_verified: raw.isVerified,
            current_quantity: chain_u64(raw.currentQuantity, "currentQuantity")?,
        }))
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expiry_date
    }
}

/// Result of `create_batch`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchCreation {
    pub transaction_hash: B256,
    pub batch_id: u64,
    pub production_date: DateTime<Utc>,
    pub expiry_date: DateTime<Utc>,
    pub quantity: u64,
}

impl BatchCreation {
    pub fn from_event(
        transaction_hash: B256,
        event: &ICoffeeToken::BatchCreated,
    ) -> Result<Self, ContractError> {
        Ok(Self {
            transaction_hash,
            batch_id: chain_u64(event.batchId, "batchId")?,
            production_date: chain_timestamp(event.productionDate, "productionDate")?,
            expiry_date: chain_timestamp(event.expiryDate, "expiryDate")?,
            quantity: chain_u64(event.quantity, "quantity")?,
        })
    }
}

/// Result of `sync_inventory`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventorySync {
    pub transaction_hash: B256,
    pub batch_id: u64,
    pub old_quantity: u64,
    pub new_quantity: u64,
}
