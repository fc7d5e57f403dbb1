//! In-memory chain for tests.
//!
//! `MockChain` answers `eth_call` from stubbed outputs keyed by contract
//! address and selector, and mines every sent transaction into a receipt
//! whose logs come from a per-contract handler.

use {
    alloy::sol_types::SolCall,
    alloy_primitives::{address, keccak256, Address, Bytes, B256},
    async_trait::async_trait,
    std::{
        collections::HashMap,
        sync::{
            atomic::{AtomicBool, AtomicUsize, Ordering},
            Arc, Mutex, MutexGuard, PoisonError,
        },
    },
};

use crate::{
    error::ProviderError,
    provider::{ChainReader, ChainSigner, ReceiptLog, TxReceipt, TxRequest},
};

pub type SendHandler = Arc<dyn Fn(&TxRequest) -> Vec<ReceiptLog> + Send + Sync>;

/// Default sender, the first Hardhat account.
pub const DEFAULT_SENDER: Address = address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266");

pub struct MockChain {
    sender: Address,
    calls: Mutex<HashMap<(Address, [u8; 4]), Result<Bytes, ProviderError>>>,
    call_failure: Mutex<Option<ProviderError>>,
    estimate_failure: Mutex<Option<ProviderError>>,
    send_failure: Mutex<Option<ProviderError>>,
    handlers: Mutex<HashMap<Address, SendHandler>>,
    sent: Mutex<Vec<TxRequest>>,
    receipts: Mutex<HashMap<B256, TxReceipt>>,
    revert: AtomicBool,
    pending_polls: AtomicUsize,
    receipt_polls: AtomicUsize,
    call_count: AtomicUsize,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl Default for MockChain {
    fn default() -> Self {
        Self::new(DEFAULT_SENDER)
    }
}

impl MockChain {
    pub fn new(sender: Address) -> Self {
        Self {
            sender,
            calls: Mutex::new(HashMap::new()),
            call_failure: Mutex::new(None),
            estimate_failure: Mutex::new(None),
            send_failure: Mutex::new(None),
            handlers: Mutex::new(HashMap::new()),
            sent: Mutex::new(Vec::new()),
            receipts: Mutex::new(HashMap::new()),
            revert: AtomicBool::new(false),
            pending_polls: AtomicUsize::new(0),
            receipt_polls: AtomicUsize::new(0),
            call_count: AtomicUsize::new(0),
        }
    }

    /// Stubs the raw return data of `C` on the contract at `to`.
    pub fn on_call<C: SolCall>(&self, to: Address, output: Vec<u8>) {
        lock(&self.calls).insert((to, C::SELECTOR), Ok(Bytes::from(output)));
    }

    /// Makes `C` on the contract at `to` fail with `error`.
    pub fn fail_call<C: SolCall>(&self, to: Address, error: ProviderError) {
        lock(&self.calls).insert((to, C::SELECTOR), Err(error));
    }

    /// Makes every `eth_call` fail, as a dead node would.
    pub fn fail_calls(&self, error: ProviderError) {
        *lock(&self.call_failure) = Some(error);
    }

    pub fn fail_estimates(&self, error: ProviderError) {
        *lock(&self.estimate_failure) = Some(error);
    }

    pub fn fail_sends(&self, error: ProviderError) {
        *lock(&self.send_failure) = Some(error);
    }

    /// Logs emitted when a transaction is sent to `to`.
    pub fn on_send<F>(&self, to: Address, handler: F)
    where
        F: Fn(&TxRequest) -> Vec<ReceiptLog> + Send + Sync + 'static,
    {
        lock(&self.handlers).insert(to, Arc::new(handler));
    }

    /// Mines every following transaction as reverted.
    pub fn revert_sends(&self, revert: bool) {
        self.revert.store(revert, Ordering::SeqCst);
    }

    /// Number of receipt queries answered with `None` before a receipt
    /// shows up.
    pub fn set_pending_polls(&self, polls: usize) {
        self.pending_polls.store(polls, Ordering::SeqCst);
    }

    pub fn receipt_polls(&self) -> usize {
        self.receipt_polls.load(Ordering::SeqCst)
    }

    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    pub fn sent(&self) -> Vec<TxRequest> {
        lock(&self.sent).clone()
    }
}

#[async_trait]
impl ChainReader for MockChain {
    async fn call(&self, to: Address, data: Bytes) -> Result<Bytes, ProviderError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        if let Some(error) = lock(&self.call_failure).clone() {
            return Err(error);
        }
        let mut selector = [0u8; 4];
        if data.len() < 4 {
            return Err(ProviderError::Reverted { reason: None });
        }
        selector.copy_from_slice(&data[..4]);
        lock(&self.calls)
            .get(&(to, selector))
            .cloned()
            .unwrap_or_else(|| {
                Err(ProviderError::Reverted {
                    reason: Some(format!("no stub for 0x{} at {}", hex::encode(selector), to)),
                })
            })
    }
}

#[async_trait]
impl ChainSigner for MockChain {
    fn address(&self) -> Address {
        self.sender
    }

    async fn estimate_gas(&self, _tx: &TxRequest) -> Result<u64, ProviderError> {
        match lock(&self.estimate_failure).clone() {
            Some(error) => Err(error),
            None => Ok(21_000),
        }
    }

    async fn send_transaction(&self, tx: TxRequest) -> Result<B256, ProviderError> {
        if let Some(error) = lock(&self.send_failure).clone() {
            return Err(error);
        }
        let handler = lock(&self.handlers).get(&tx.to).cloned();
        let logs = handler.map(|handler| handler(&tx)).unwrap_or_default();

        let mut sent = lock(&self.sent);
        let nonce = sent.len() as u64;
        let tx_hash = keccak256([self.sender.as_slice(), &nonce.to_be_bytes()].concat());
        sent.push(tx);

        let receipt = TxReceipt {
            transaction_hash: tx_hash,
            block_number: Some(nonce + 1),
            success: !self.revert.load(Ordering::SeqCst),
            logs,
        };
        lock(&self.receipts).insert(tx_hash, receipt);
        Ok(tx_hash)
    }

    async fn transaction_receipt(&self, tx_hash: B256) -> Result<Option<TxReceipt>, ProviderError> {
        self.receipt_polls.fetch_add(1, Ordering::SeqCst);
        let pending = self.pending_polls.load(Ordering::SeqCst);
        if pending > 0 {
            self.pending_polls.store(pending - 1, Ordering::SeqCst);
            return Ok(None);
        }
        Ok(lock(&self.receipts).get(&tx_hash).cloned())
    }
}
