use alloy_primitives::{Address, U256};

use crate::{
    abi::{ContractName, IRedemption},
    accessors::{classify, Lookup},
    client::CoffeeClient,
    error::ContractError,
    provider::ChainReader,
    state::{chain_u64, Redemption},
};

impl CoffeeClient {
    pub(crate) async fn read_redemption<R: ChainReader + ?Sized>(
        &self,
        redemption_id: u64,
        provider: &R,
    ) -> Result<Option<Redemption>, ContractError> {
        let redemption = self.contract(ContractName::Redemption, provider)?;
        let raw = redemption
            .call(IRedemption::getRedemptionDetailsCall {
                redemptionId: U256::from(redemption_id),
            })
            .await?;
        Redemption::from_chain(redemption_id, &raw)
    }

    pub async fn try_get_redemption_details<R: ChainReader + ?Sized>(
        &self,
        redemption_id: u64,
        provider: &R,
    ) -> Lookup<Redemption> {
        classify(self.read_redemption(redemption_id, provider).await)
    }

    pub async fn get_redemption_details<R: ChainReader + ?Sized>(
        &self,
        redemption_id: u64,
        provider: &R,
    ) -> Option<Redemption> {
        self.try_get_redemption_details(redemption_id, provider)
            .await
            .or_log(format!("redemption details for {}", redemption_id))
    }

    pub async fn try_get_consumer_redemptions<R: ChainReader + ?Sized>(
        &self,
        consumer: Address,
        provider: &R,
    ) -> Result<Vec<u64>, ContractError> {
        let redemption = self.contract(ContractName::Redemption, provider)?;
        let ids = redemption
            .call(IRedemption::getConsumerRedemptionsCall { consumer })
            .await?;
        ids.into_iter().map(|id| chain_u64(id, "redemptionId")).collect()
    }

    pub async fn get_consumer_redemptions<R: ChainReader + ?Sized>(
        &self,
        consumer: Address,
        provider: &R,
    ) -> Vec<u64> {
        self.try_get_consumer_redemptions(consumer, provider)
            .await
            .unwrap_or_else(|e| {
                log::warn!("Error getting redemptions of {}: {}", consumer, e);
                Vec::new()
            })
    }
}
