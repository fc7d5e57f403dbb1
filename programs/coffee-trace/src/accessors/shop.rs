use alloy_primitives::U256;

use crate::{
    abi::{ContractName, ITokenShop},
    client::CoffeeClient,
    error::{ContractError, ProviderError},
    provider::ChainReader,
};

impl CoffeeClient {
    /// Tokens the shop sells per whole ETH.
    pub async fn try_get_token_shop_rate<R: ChainReader + ?Sized>(
        &self,
        provider: &R,
    ) -> Result<U256, ContractError> {
        let shop = self.contract(ContractName::TokenShop, provider)?;
        shop.call(ITokenShop::tokensPerEthCall {}).await
    }

    /// The on-chain rate as a decimal string, or the configured fallback
    /// when there is no provider or the read fails.
    pub async fn get_token_shop_rate(&self, provider: Option<&dyn ChainReader>) -> String {
        match self.rate_or_error(provider).await {
            Ok(rate) => rate.to_string(),
            Err(e) => {
                log::warn!(
                    "Error getting token shop rate, using fallback {}: {}",
                    self.config().fallback_rate,
                    e
                );
                self.config().fallback_rate.clone()
            }
        }
    }

    async fn rate_or_error(&self, provider: Option<&dyn ChainReader>) -> Result<U256, ContractError> {
        let provider = provider.ok_or(ProviderError::NoProvider)?;
        self.try_get_token_shop_rate(provider).await
    }

    /// Numeric form of [`Self::get_token_shop_rate`].
    pub(crate) async fn rate_or_fallback<R: ChainReader + ?Sized>(
        &self,
        provider: &R,
    ) -> Result<U256, ContractError> {
        match self.try_get_token_shop_rate(provider).await {
            Ok(rate) => Ok(rate),
            Err(e) => {
                log::warn!("Error getting token shop rate, using fallback: {}", e);
                Ok(self.config().fallback_rate_value()?)
            }
        }
    }
}
