use {
    alloy_primitives::{Address, B256},
    serde::Serialize,
    token_units::{AmountError, TokenAmount},
};

use crate::abi::ITokenShop;

/// Outcome of a token shop purchase. Amounts come from the
/// `TokensPurchased` event, not from client-side math, unless `simulated`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPurchase {
    pub success: bool,
    pub transaction_hash: B256,
    pub buyer: Address,
    pub eth_amount: TokenAmount,
    pub token_amount: TokenAmount,
    pub simulated: bool,
}

impl TokenPurchase {
    pub fn from_event(
        transaction_hash: B256,
        event: &ITokenShop::TokensPurchased,
        token_decimals: u8,
    ) -> Result<Self, AmountError> {
        Ok(Self {
            success: true,
            transaction_hash,
            buyer: event.buyer,
            eth_amount: TokenAmount::from_wei(event.ethAmount),
            token_amount: TokenAmount::new(event.tokenAmount, token_decimals)?,
            simulated: false,
        })
    }
}
