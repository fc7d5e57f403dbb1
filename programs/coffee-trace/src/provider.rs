//! The seams between this crate and a node.
//!
//! [`ChainReader`] is the read-only provider handle, [`ChainSigner`] a
//! handle that can also sign and submit transactions. The [`crate::rpc`]
//! module implements both over JSON-RPC; tests use an in-memory chain.

use {
    alloy_primitives::{Address, Bytes, B256, U256},
    async_trait::async_trait,
    std::sync::Arc,
};

use crate::error::ProviderError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxRequest {
    pub from: Address,
    pub to: Address,
    pub data: Bytes,
    pub value: U256,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptLog {
    pub address: Address,
    pub topics: Vec<B256>,
    pub data: Bytes,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxReceipt {
    pub transaction_hash: B256,
    pub block_number: Option<u64>,
    /// false when the transaction reverted
    pub success: bool,
    pub logs: Vec<ReceiptLog>,
}

#[async_trait]
pub trait ChainReader: Send + Sync {
    /// `eth_call` against the latest block.
    async fn call(&self, to: Address, data: Bytes) -> Result<Bytes, ProviderError>;
}

#[async_trait]
pub trait ChainSigner: ChainReader {
    fn address(&self) -> Address;

    async fn estimate_gas(&self, tx: &TxRequest) -> Result<u64, ProviderError>;

    async fn send_transaction(&self, tx: TxRequest) -> Result<B256, ProviderError>;

    /// `None` until the transaction is included in a block.
    async fn transaction_receipt(&self, tx_hash: B256) -> Result<Option<TxReceipt>, ProviderError>;
}

#[async_trait]
impl<T: ChainReader + ?Sized> ChainReader for Arc<T> {
    async fn call(&self, to: Address, data: Bytes) -> Result<Bytes, ProviderError> {
        (**self).call(to, data).await
    }
}

#[async_trait]
impl<T: ChainSigner + ?Sized> ChainSigner for Arc<T> {
    fn address(&self) -> Address {
        (**self).address()
    }

    async fn estimate_gas(&self, tx: &TxRequest) -> Result<u64, ProviderError> {
        (**self).estimate_gas(tx).await
    }

    async fn send_transaction(&self, tx: TxRequest) -> Result<B256, ProviderError> {
        (**self).send_transaction(tx).await
    }

    async fn transaction_receipt(&self, tx_hash: B256) -> Result<Option<TxReceipt>, ProviderError> {
        (**self).transaction_receipt(tx_hash).await
    }
}
