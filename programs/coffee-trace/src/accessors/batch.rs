use alloy_primitives::{Address, U256};

use crate::{
    abi::{ContractName, ICoffeeToken},
    accessors::{classify, Lookup},
    client::CoffeeClient,
    error::ContractError,
    provider::ChainReader,
    state::{chain_u64, BatchInfo},
};

impl CoffeeClient {
    async fn read_batch_info<R: ChainReader + ?Sized>(
        &self,
        batch_id: u64,
        provider: &R,
    ) -> Result<Option<BatchInfo>, ContractError> {
        let token = self.contract(ContractName::CoffeeToken, provider)?;
        let raw = token
            .call(ICoffeeToken::getBatchInfoCall {
                batchId: U256::from(batch_id),
            })
            .await?;
        BatchInfo::from_chain(batch_id, &raw)
    }

    pub async fn try_get_batch_info<R: ChainReader + ?Sized>(
        &self,
        batch_id: u64,
        provider: &R,
    ) -> Lookup<BatchInfo> {
        classify(self.read_batch_info(batch_id, provider).await)
    }

    pub async fn get_batch_info<R: ChainReader + ?Sized>(
        &self,
        batch_id: u64,
        provider: &R,
    ) -> Option<BatchInfo> {
        self.try_get_batch_info(batch_id, provider)
            .await
            .or_log(format!("batch info for {}", batch_id))
    }

    pub async fn try_get_active_batch_ids<R: ChainReader + ?Sized>(
        &self,
        provider: &R,
    ) -> Result<Vec<u64>, ContractError> {
        let token = self.contract(ContractName::CoffeeToken, provider)?;
        let ids = token.call(ICoffeeToken::getActiveBatchIdsCall {}).await?;
        ids.into_iter().map(|id| chain_u64(id, "batchId")).collect()
    }

    pub async fn get_active_batch_ids<R: ChainReader + ?Sized>(&self, provider: &R) -> Vec<u64> {
        self.try_get_active_batch_ids(provider)
            .await
            .unwrap_or_else(|e| {
                log::warn!("Error getting active batch ids: {}", e);
                Vec::new()
            })
    }

    /// Balance of the batch token `batch_id` held by `account`.
    pub async fn try_get_token_balance<R: ChainReader + ?Sized>(
        &self,
        account: Address,
        batch_id: u64,
        provider: &R,
    ) -> Result<U256, ContractError> {
        let token = self.contract(ContractName::CoffeeToken, provider)?;
        token
            .call(ICoffeeToken::balanceOfCall {
                account,
                id: U256::from(batch_id),
            })
            .await
    }

    pub async fn get_token_balance<R: ChainReader + ?Sized>(
        &self,
        account: Address,
        batch_id: u64,
        provider: &R,
    ) -> Option<U256> {
        self.try_get_token_balance(account, batch_id, provider)
            .await
            .map_err(|e| log::warn!("Error getting balance of batch {} for {}: {}", batch_id, account, e))
            .ok()
    }
}
