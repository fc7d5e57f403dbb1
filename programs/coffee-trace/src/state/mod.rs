//! Application-level records decoded from contract state and events.

use {
    alloy_primitives::U256,
    chrono::{DateTime, Utc},
};

pub mod batch;
pub mod purchase;
pub mod redemption;
pub mod reserve;

pub use batch::{BatchCreation, BatchInfo, InventorySync};
pub use purchase::TokenPurchase;
pub use redemption::{Redemption, RedemptionRequest, RedemptionStatusChange};
pub use reserve::ReserveVerification;

use crate::error::ContractError;

/// Narrows a uint256 to the u64 the application works with.
pub fn chain_u64(value: U256, field: &'static str) -> Result<u64, ContractError> {
    u64::try_from(value).map_err(|_| ContractError::NumericOverflow { field, target: "u64" })
}

/// Chain timestamps are unix seconds.
pub fn chain_timestamp(value: U256, field: &'static str) -> Result<DateTime<Utc>, ContractError> {
    let seconds = i64::try_from(value)
        .map_err(|_| ContractError::NumericOverflow { field, target: "timestamp" })?;
    DateTime::from_timestamp(seconds, 0)
        .ok_or(ContractError::NumericOverflow { field, target: "timestamp" })
}

/// A zero timestamp means "not set".
pub fn optional_chain_timestamp(
    value: U256,
    field: &'static str,
) -> Result<Option<DateTime<Utc>>, ContractError> {
    if value.is_zero() {
        return Ok(None);
    }
    chain_timestamp(value, field).map(Some)
}
