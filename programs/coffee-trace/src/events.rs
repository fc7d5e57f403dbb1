//! Typed decoding of the events a transaction receipt carries.

use {
    alloy::sol_types::SolEvent,
    alloy_primitives::{Address, B256},
};

use crate::{
    abi::{event_name, ContractName, ICoffeeToken, IInventoryManager, IProofOfReserve, IRedemption, ITokenShop},
    error::FlowError,
    provider::{ReceiptLog, TxReceipt},
};

/// Outcome of looking for one event in a receipt.
#[derive(Debug, Clone, PartialEq)]
pub enum EventMatch<E> {
    Found(E),
    NotFound,
}

impl<E> EventMatch<E> {
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    pub fn found(self) -> Option<E> {
        match self {
            Self::Found(event) => Some(event),
            Self::NotFound => None,
        }
    }
}

impl<E: SolEvent> EventMatch<E> {
    /// A missing event is a failed operation, never a partial result.
    pub fn require(self, tx_hash: B256) -> Result<E, FlowError> {
        match self {
            Self::Found(event) => Ok(event),
            Self::NotFound => Err(FlowError::EventNotFound {
                event: event_name::<E>(),
                tx_hash,
            }),
        }
    }
}

fn decode_log<E: SolEvent>(log: &ReceiptLog) -> Result<E, FlowError> {
    E::decode_raw_log(log.topics.iter().copied(), &log.data).map_err(|e| FlowError::EventDecode {
        event: event_name::<E>(),
        reason: e.to_string(),
    })
}

/// Finds the first `E` emitted by `emitter`. Logs from other contracts are
/// ignored even when their topic matches.
pub fn find_event<E: SolEvent>(receipt: &TxReceipt, emitter: Address) -> Result<EventMatch<E>, FlowError> {
    find_event_where(receipt, emitter, |_: &E| true)
}

/// Like [`find_event`], but skips events for which `wanted` is false.
pub fn find_event_where<E: SolEvent>(
    receipt: &TxReceipt,
    emitter: Address,
    wanted: impl Fn(&E) -> bool,
) -> Result<EventMatch<E>, FlowError> {
    let logs = receipt
        .logs
        .iter()
        .filter(|log| log.address == emitter && log.topics.first() == Some(&E::SIGNATURE_HASH));
    for log in logs {
        let event = decode_log::<E>(log)?;
        if wanted(&event) {
            return Ok(EventMatch::Found(event));
        }
    }
    Ok(EventMatch::NotFound)
}

/// Every event the client knows about.
#[derive(Debug, Clone, PartialEq)]
pub enum ContractEvent {
    BatchCreated(ICoffeeToken::BatchCreated),
    VerificationRequested(IProofOfReserve::VerificationRequested),
    RedemptionRequested(IRedemption::RedemptionRequested),
    RedemptionStatusUpdated(IRedemption::RedemptionStatusUpdated),
    InventoryUpdated(IInventoryManager::InventoryUpdated),
    TokensPurchased(ITokenShop::TokensPurchased),
}

impl ContractEvent {
    /// Decodes a log emitted by `contract`. Unrecognised topics give
    /// `Ok(None)`.
    pub fn decode(contract: ContractName, log: &ReceiptLog) -> Result<Option<Self>, FlowError> {
        let Some(topic) = log.topics.first() else {
            return Ok(None);
        };
        let event = match contract {
            ContractName::CoffeeToken if *topic == ICoffeeToken::BatchCreated::SIGNATURE_HASH => {
                Self::BatchCreated(decode_log(log)?)
            }
            ContractName::ProofOfReserve
                if *topic == IProofOfReserve::VerificationRequested::SIGNATURE_HASH =>
            {
                Self::VerificationRequested(decode_log(log)?)
            }
            ContractName::Redemption if *topic == IRedemption::RedemptionRequested::SIGNATURE_HASH => {
                Self::RedemptionRequested(decode_log(log)?)
            }
            ContractName::Redemption if *topic == IRedemption::RedemptionStatusUpdated::SIGNATURE_HASH => {
                Self::RedemptionStatusUpdated(decode_log(log)?)
            }
            ContractName::InventoryManager
                if *topic == IInventoryManager::InventoryUpdated::SIGNATURE_HASH =>
            {
                Self::InventoryUpdated(decode_log(log)?)
            }
            ContractName::TokenShop if *topic == ITokenShop::TokensPurchased::SIGNATURE_HASH => {
                Self::TokensPurchased(decode_log(log)?)
            }
            _ => return Ok(None),
        };
        Ok(Some(event))
    }

    /// Decodes every log in `receipt` emitted at `address` by `contract`.
    pub fn all_from(
        receipt: &TxReceipt,
        contract: ContractName,
        address: Address,
    ) -> Result<Vec<Self>, FlowError> {
        receipt
            .logs
            .iter()
            .filter(|log| log.address == address)
            .filter_map(|log| Self::decode(contract, log).transpose())
            .collect()
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::BatchCreated(_) => "BatchCreated",
            Self::VerificationRequested(_) => "VerificationRequested",
            Self::RedemptionRequested(_) => "RedemptionRequested",
            Self::RedemptionStatusUpdated(_) => "RedemptionStatusUpdated",
            Self::InventoryUpdated(_) => "InventoryUpdated",
            Self::TokensPurchased(_) => "TokensPurchased",
        }
    }

    pub fn emit(&self) {
        match self {
            Self::BatchCreated(e) => {
                log::info!("Event: BatchCreated batch_id={} quantity={}", e.batchId, e.quantity);
            }
            Self::VerificationRequested(e) => {
                log::info!(
                    "Event: VerificationRequested request_id={} batch_id={} quantity={}",
                    e.requestId,
                    e.batchId,
                    e.quantity
                );
            }
            Self::RedemptionRequested(e) => {
                log::info!(
                    "Event: RedemptionRequested redemption_id={} consumer={} batch_id={} quantity={}",
                    e.redemptionId,
                    e.consumer,
                    e.batchId,
                    e.quantity
                );
            }
            Self::RedemptionStatusUpdated(e) => {
                log::info!(
                    "Event: RedemptionStatusUpdated redemption_id={} status={}",
                    e.redemptionId,
                    e.status
                );
            }
            Self::InventoryUpdated(e) => {
                log::info!(
                    "Event: InventoryUpdated batch_id={} {} -> {}",
                    e.batchId,
                    e.oldQuantity,
                    e.newQuantity
                );
            }
            Self::TokensPurchased(e) => {
                log::info!(
                    "Event: TokensPurchased buyer={} eth={} tokens={}",
                    e.buyer,
                    e.ethAmount,
                    e.tokenAmount
                );
            }
        }
    }
}

/// Builds the log a contract would emit for `event`.
#[cfg(any(test, feature = "test-utils"))]
pub fn encode_event<E: SolEvent>(address: Address, event: &E) -> ReceiptLog {
    let data = event.encode_log_data();
    ReceiptLog {
        address,
        topics: data.topics().to_vec(),
        data: data.data,
    }
}
