use {
    alloy_primitives::B256,
    std::time::Duration,
    tokio::time::Instant,
    tokio_util::sync::CancellationToken,
};

use crate::{
    error::FlowError,
    provider::{ChainSigner, TxReceipt},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfirmOptions {
    pub poll_interval: Duration,
    pub timeout: Duration,
}

/// Polls for the receipt of `tx_hash` until it is mined, the timeout runs
/// out or `cancel` fires. A mined but reverted transaction is an error.
pub async fn wait_for_receipt<S: ChainSigner + ?Sized>(
    signer: &S,
    tx_hash: B256,
    options: ConfirmOptions,
    cancel: &CancellationToken,
) -> Result<TxReceipt, FlowError> {
    let started = Instant::now();
    let deadline = started + options.timeout;

    loop {
        if cancel.is_cancelled() {
            return Err(FlowError::Cancelled { tx_hash: Some(tx_hash) });
        }

        if let Some(receipt) = signer.transaction_receipt(tx_hash).await? {
            if !receipt.success {
                log::warn!("Transaction {} reverted", tx_hash);
                return Err(FlowError::Reverted { tx_hash });
            }
            log::info!(
                "Transaction {} confirmed in block {:?} after {:?}",
                tx_hash,
                receipt.block_number,
                started.elapsed()
            );
            return Ok(receipt);
        }

        if Instant::now() >= deadline {
            return Err(FlowError::ReceiptTimeout {
                tx_hash,
                waited_secs: options.timeout.as_secs(),
            });
        }

        tokio::select! {
            _ = cancel.cancelled() => {
                return Err(FlowError::Cancelled { tx_hash: Some(tx_hash) });
            }
            _ = tokio::time::sleep(options.poll_interval) => {}
        }
    }
}
