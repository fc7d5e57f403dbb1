//! JSON-RPC implementations of the provider seams, over alloy HTTP
//! providers.

use {
    alloy::{
        network::{EthereumWallet, ReceiptResponse, TransactionBuilder},
        providers::{DynProvider, Provider, ProviderBuilder},
        rpc::types::{TransactionReceipt, TransactionRequest},
        signers::local::PrivateKeySigner,
        transports::{http::reqwest::Url, RpcError, TransportErrorKind},
    },
    alloy_primitives::{Address, Bytes, B256},
    async_trait::async_trait,
};

use crate::{
    error::ProviderError,
    provider::{ChainReader, ChainSigner, ReceiptLog, TxReceipt, TxRequest},
};

/// JSON-RPC code geth and hardhat use for execution reverts.
const REVERT_CODE: i64 = 3;

fn provider_error(error: RpcError<TransportErrorKind>) -> ProviderError {
    match &error {
        RpcError::ErrorResp(payload)
            if payload.code == REVERT_CODE || payload.message.contains("revert") =>
        {
            ProviderError::Reverted {
                reason: revert_reason(&payload.message),
            }
        }
        _ => ProviderError::Transport(error.to_string()),
    }
}

fn revert_reason(message: &str) -> Option<String> {
    let reason = message
        .trim()
        .trim_start_matches("execution reverted")
        .trim_start_matches(':')
        .trim();
    (!reason.is_empty()).then(|| reason.to_string())
}

fn parse_url(rpc_url: &str) -> Result<Url, ProviderError> {
    rpc_url
        .parse()
        .map_err(|e| ProviderError::Setup(format!("invalid RPC url {}: {}", rpc_url, e)))
}

fn request(tx: &TxRequest) -> TransactionRequest {
    TransactionRequest::default()
        .with_from(tx.from)
        .with_to(tx.to)
        .with_input(tx.data.clone())
        .with_value(tx.value)
}

fn receipt(receipt: TransactionReceipt) -> TxReceipt {
    let logs = receipt
        .inner
        .logs()
        .iter()
        .map(|log| ReceiptLog {
            address: log.address(),
            topics: log.topics().to_vec(),
            data: log.data().data.clone(),
        })
        .collect();
    TxReceipt {
        transaction_hash: receipt.transaction_hash,
        block_number: receipt.block_number,
        success: receipt.status(),
        logs,
    }
}

async fn eth_call(provider: &DynProvider, to: Address, data: Bytes) -> Result<Bytes, ProviderError> {
    let tx = TransactionRequest::default().with_to(to).with_input(data);
    provider.call(tx).await.map_err(provider_error)
}

/// Read-only connection.
#[derive(Clone)]
pub struct RpcChain {
    provider: DynProvider,
}

impl RpcChain {
    pub fn connect(rpc_url: &str) -> Result<Self, ProviderError> {
        let provider = ProviderBuilder::new().connect_http(parse_url(rpc_url)?).erased();
        log::debug!("Connected to {}", rpc_url);
        Ok(Self { provider })
    }
}

#[async_trait]
impl ChainReader for RpcChain {
    async fn call(&self, to: Address, data: Bytes) -> Result<Bytes, ProviderError> {
        eth_call(&self.provider, to, data).await
    }
}

/// Connection that signs with a local private key.
#[derive(Clone)]
pub struct RpcSigner {
    provider: DynProvider,
    address: Address,
}

impl RpcSigner {
    pub fn connect(rpc_url: &str, private_key: &str) -> Result<Self, ProviderError> {
        let signer: PrivateKeySigner = private_key
            .trim()
            .parse()
            .map_err(|_| ProviderError::Setup("invalid private key".to_string()))?;
        let address = signer.address();
        let provider = ProviderBuilder::new()
            .wallet(EthereumWallet::from(signer))
            .connect_http(parse_url(rpc_url)?)
            .erased();
        log::debug!("Connected to {} as {}", rpc_url, address);
        Ok(Self { provider, address })
    }
}

#[async_trait]
impl ChainReader for RpcSigner {
    async fn call(&self, to: Address, data: Bytes) -> Result<Bytes, ProviderError> {
        eth_call(&self.provider, to, data).await
    }
}

#[async_trait]
impl ChainSigner for RpcSigner {
    fn address(&self) -> Address {
        self.address
    }

    async fn estimate_gas(&self, tx: &TxRequest) -> Result<u64, ProviderError> {
        self.provider
            .estimate_gas(request(tx))
            .await
            .map_err(provider_error)
    }

    async fn send_transaction(&self, tx: TxRequest) -> Result<B256, ProviderError> {
        let pending = self
            .provider
            .send_transaction(request(&tx))
            .await
            .map_err(provider_error)?;
        Ok(*pending.tx_hash())
    }

    async fn transaction_receipt(&self, tx_hash: B256) -> Result<Option<TxReceipt>, ProviderError> {
        self.provider
            .get_transaction_receipt(tx_hash)
            .await
            .map(|found| found.map(receipt))
            .map_err(provider_error)
    }
}
