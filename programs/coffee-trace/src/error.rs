use {
    crate::{abi::ContractName, status::RedemptionStatus},
    alloy_primitives::B256,
    thiserror::Error,
    token_units::AmountError,
};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Chain not configured: {0}")]
    ChainNotConfigured(String),

    #[error("Contract {contract} not found on chain {chain}")]
    ContractNotFound { chain: String, contract: ContractName },

    #[error("Chain {chain} has no address for {contract}")]
    IncompleteDeployment { chain: String, contract: ContractName },

    #[error("Invalid chain id '{0}', expected a 0x-prefixed hex string")]
    InvalidChainId(String),

    #[error("Invalid fallback rate '{0}'")]
    InvalidFallbackRate(String),

    #[error("Token decimals {0} exceed the supported maximum of {max}", max = token_units::MAX_DECIMALS)]
    UnsupportedTokenDecimals(u8),

    #[error("Failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Failure reported by a provider or signer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("No provider supplied")]
    NoProvider,

    #[error("Provider setup failed: {0}")]
    Setup(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Execution reverted: {}", .reason.as_deref().unwrap_or("no reason given"))]
    Reverted { reason: Option<String> },
}

#[derive(Error, Debug)]
pub enum ContractError {
    #[error("Unknown contract: {0}")]
    UnknownContract(String),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("Failed to decode {contract}.{function} output: {reason}")]
    Decode {
        contract: ContractName,
        function: &'static str,
        reason: String,
    },

    #[error("Field {field} does not fit in {target}")]
    NumericOverflow {
        field: &'static str,
        target: &'static str,
    },
}

impl ContractError {
    /// A revert on a read means the contract rejected the lookup, which the
    /// contracts do for ids they never issued.
    pub fn is_revert(&self) -> bool {
        matches!(self, Self::Provider(ProviderError::Reverted { .. }))
    }
}

#[derive(Error, Debug)]
pub enum FlowError {
    #[error(transparent)]
    Contract(#[from] ContractError),

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error(transparent)]
    Amount(#[from] AmountError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Transaction would fail: {0}")]
    WouldFail(String),

    #[error("Transaction {tx_hash} reverted")]
    Reverted { tx_hash: B256 },

    #[error("Expected event {event} not found in transaction {tx_hash}")]
    EventNotFound { event: &'static str, tx_hash: B256 },

    #[error("Failed to decode event {event}: {reason}")]
    EventDecode { event: &'static str, reason: String },

    #[error("No receipt for transaction {tx_hash} after {waited_secs}s")]
    ReceiptTimeout { tx_hash: B256, waited_secs: u64 },

    #[error("Cancelled{}", .tx_hash.map(|h| format!(" while waiting for {h}")).unwrap_or_default())]
    Cancelled { tx_hash: Option<B256> },

    #[error("Redemption {0} not found")]
    RedemptionNotFound(u64),

    #[error("Redemption cannot move from {from} to {to}")]
    InvalidTransition {
        from: RedemptionStatus,
        to: RedemptionStatus,
    },
}
