use alloy_primitives::{Address, U256};

use crate::{
    abi::{ContractName, IProofOfReserve},
    client::CoffeeClient,
    error::FlowError,
    events::find_event,
    provider::ChainSigner,
    state::ReserveVerification,
};

impl CoffeeClient {
    /// Asks the proof-of-reserve oracle to check `quantity` units of
    /// `batch_id` against the inventory source and mint them to `recipient`.
    pub async fn verify_and_mint_batch<S: ChainSigner + ?Sized>(
        &self,
        batch_id: u64,
        quantity: u64,
        recipient: Address,
        signer: &S,
    ) -> Result<ReserveVerification, FlowError> {
        if quantity == 0 {
            return Err(FlowError::InvalidInput("quantity must be greater than zero".into()));
        }
        if recipient.is_zero() {
            return Err(FlowError::InvalidInput("recipient is the zero address".into()));
        }

        let reserve = self.contract(ContractName::ProofOfReserve, signer)?;
        let source = &self.config().verification_source;
        let call = IProofOfReserve::requestReserveVerificationCall {
            batchId: U256::from(batch_id),
            quantity: U256::from(quantity),
            recipient,
            source: source.clone(),
        };
        let tx = reserve.transaction(&call, U256::ZERO);

        let receipt = self
            .submit(signer, reserve.name(), reserve.address(), tx, "verifyAndMintBatch")
            .await?;
        let event = find_event::<IProofOfReserve::VerificationRequested>(&receipt, reserve.address())?
            .require(receipt.transaction_hash)?;
        Ok(ReserveVerification::from_event(receipt.transaction_hash, &event, source)?)
    }
}
