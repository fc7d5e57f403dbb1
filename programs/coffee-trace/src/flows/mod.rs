//! Write flows.
//!
//! Every flow runs the same pipeline: build the call, estimate gas, submit,
//! wait for the receipt, then decode the event that carries the result. A
//! flow either returns the decoded result or an error; a confirmed
//! transaction without its event is an error.

use alloy_primitives::Address;

use crate::{
    abi::ContractName,
    client::CoffeeClient,
    confirm::wait_for_receipt,
    error::FlowError,
    events::ContractEvent,
    provider::{ChainSigner, TxReceipt, TxRequest},
};

pub mod batch;
pub mod purchase;
pub mod redemption;
pub mod reserve;

impl CoffeeClient {
    /// Estimates, submits and confirms `tx`, then logs the events `contract`
    /// emitted at `address`.
    pub(crate) async fn submit<S: ChainSigner + ?Sized>(
        &self,
        signer: &S,
        contract: ContractName,
        address: Address,
        tx: TxRequest,
        action: &str,
    ) -> Result<TxReceipt, FlowError> {
        let cancel = self.cancellation_token();
        if cancel.is_cancelled() {
            return Err(FlowError::Cancelled { tx_hash: None });
        }

        let gas = signer
            .estimate_gas(&tx)
            .await
            .map_err(|e| FlowError::WouldFail(e.to_string()))?;
        log::debug!("{}: estimated gas {}", action, gas);

        if cancel.is_cancelled() {
            return Err(FlowError::Cancelled { tx_hash: None });
        }
        let tx_hash = signer.send_transaction(tx).await?;
        log::info!("{}: submitted transaction {} on {}", action, tx_hash, self.chain());

        let receipt = wait_for_receipt(signer, tx_hash, self.confirm_options(), cancel).await?;
        for event in ContractEvent::all_from(&receipt, contract, address)? {
            event.emit();
        }
        Ok(receipt)
    }
}
