use {
    alloy_primitives::U256,
    chrono::{DateTime, Utc},
};

use crate::{
    abi::{ContractName, ICoffeeToken, IInventoryManager},
    client::CoffeeClient,
    error::FlowError,
    events::find_event,
    provider::ChainSigner,
    state::{chain_u64, BatchCreation, InventorySync},
};

fn chain_seconds(date: DateTime<Utc>, field: &str) -> Result<U256, FlowError> {
    u64::try_from(date.timestamp())
        .map(U256::from)
        .map_err(|_| FlowError::InvalidInput(format!("{} is before the unix epoch", field)))
}

impl CoffeeClient {
    /// Registers a new batch on the coffee token contract. The id is
    /// assigned by the contract and read back from `BatchCreated`.
    pub async fn create_batch<S: ChainSigner + ?Sized>(
        &self,
        production_date: DateTime<Utc>,
        expiry_date: DateTime<Utc>,
        quantity: u64,
        signer: &S,
    ) -> Result<BatchCreation, FlowError> {
        if quantity == 0 {
            return Err(FlowError::InvalidInput("quantity must be greater than zero".into()));
        }
        if expiry_date <= production_date {
            return Err(FlowError::InvalidInput(
                "expiry date must be after the production date".into(),
            ));
        }

        let token = self.contract(ContractName::CoffeeToken, signer)?;
        let call = ICoffeeToken::createBatchCall {
            productionDate: chain_seconds(production_date, "production date")?,
            expiryDate: chain_seconds(expiry_date, "expiry date")?,
            quantity: U256::from(quantity),
        };
        let tx = token.transaction(&call, U256::ZERO);

        let receipt = self
            .submit(signer, token.name(), token.address(), tx, "createBatch")
            .await?;
        let event = find_event::<ICoffeeToken::BatchCreated>(&receipt, token.address())?
            .require(receipt.transaction_hash)?;
        Ok(BatchCreation::from_event(receipt.transaction_hash, &event)?)
    }

    /// Pushes the physical inventory count of `batch_id` to the inventory
    /// manager.
    pub async fn sync_inventory<S: ChainSigner + ?Sized>(
        &self,
        batch_id: u64,
        new_quantity: u64,
        signer: &S,
    ) -> Result<InventorySync, FlowError> {
        let inventory = self.contract(ContractName::InventoryManager, signer)?;
        let call = IInventoryManager::updateInventoryCall {
            batchId: U256::from(batch_id),
            newQuantity: U256::from(new_quantity),
        };
        let tx = inventory.transaction(&call, U256::ZERO);

        let receipt = self
            .submit(signer, inventory.name(), inventory.address(), tx, "updateInventory")
            .await?;
        let event = find_event::<IInventoryManager::InventoryUpdated>(&receipt, inventory.address())?
            .require(receipt.transaction_hash)?;

        Ok(InventorySync {
            transaction_hash: receipt.transaction_hash,
            batch_id: chain_u64(event.batchId, "batchId")?,
            old_quantity: chain_u64(event.oldQuantity, "oldQuantity")?,
            new_quantity: chain_u64(event.newQuantity, "newQuantity")?,
        })
    }
}
