use {
    alloy_primitives::{keccak256, U256},
    token_units::{parse_ether, TokenAmount},
};

use crate::{
    abi::{ContractName, ITokenShop},
    client::CoffeeClient,
    config::PurchaseMode,
    error::FlowError,
    events::find_event,
    provider::ChainSigner,
    state::TokenPurchase,
};

impl CoffeeClient {
    /// Buys WAGA tokens from the token shop for `eth_amount` ETH, given as a
    /// decimal string such as `"0.01"`.
    pub async fn buy_waga_tokens<S: ChainSigner + ?Sized>(
        &self,
        eth_amount: &str,
        signer: &S,
    ) -> Result<TokenPurchase, FlowError> {
        let wei = parse_ether(eth_amount)?;
        if wei.is_zero() {
            return Err(FlowError::InvalidInput("ETH amount must be greater than zero".into()));
        }

        match self.config().purchase_mode {
            PurchaseMode::Live => self.purchase(wei, signer).await,
            PurchaseMode::Simulated => self.simulate_purchase(wei, signer).await,
        }
    }

    async fn purchase<S: ChainSigner + ?Sized>(
        &self,
        wei: U256,
        signer: &S,
    ) -> Result<TokenPurchase, FlowError> {
        let shop = self.contract(ContractName::TokenShop, signer)?;
        let tx = shop.transaction(&ITokenShop::buyTokensCall {}, wei);

        let receipt = self
            .submit(signer, shop.name(), shop.address(), tx, "buyTokens")
            .await?;
        let event = find_event::<ITokenShop::TokensPurchased>(&receipt, shop.address())?
            .require(receipt.transaction_hash)?;
        Ok(TokenPurchase::from_event(
            receipt.transaction_hash,
            &event,
            self.config().token_decimals,
        )?)
    }

    /// Prices the purchase at the shop rate without sending anything. The
    /// hash identifies the simulation only; no such transaction exists.
    async fn simulate_purchase<S: ChainSigner + ?Sized>(
        &self,
        wei: U256,
        signer: &S,
    ) -> Result<TokenPurchase, FlowError> {
        let rate = self.rate_or_fallback(signer).await?;
        let eth_amount = TokenAmount::from_wei(wei);
        let token_amount = eth_amount.convert_at_rate(rate, self.config().token_decimals)?;
        let buyer = signer.address();
        log::warn!(
            "Simulated purchase of {} tokens for {} ETH by {}, no transaction sent",
            token_amount,
            eth_amount,
            buyer
        );

        Ok(TokenPurchase {
            success: true,
            transaction_hash: keccak256([buyer.as_slice(), &wei.to_be_bytes::<32>()].concat()),
            buyer,
            eth_amount,
            token_amount,
            simulated: true,
        })
    }
}
