use {
    alloy_primitives::B256,
    serde::{Deserialize, Serialize},
};

use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativeCurrency {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

/// One supported chain, in the shape wallets expect for
/// `wallet_addEthereumChain`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainConfig {
    /// Hex string, e.g. `0xaa36a7`
    pub chain_id: String,
    pub chain_name: String,
    pub native_currency: NativeCurrency,
    pub rpc_urls: Vec<String>,
    #[serde(default)]
    pub block_explorer_urls: Vec<String>,
}

impl ChainConfig {
    pub fn chain_id_number(&self) -> Result<u64, ConfigError> {
        let digits = self
            .chain_id
            .strip_prefix("0x")
            .or_else(|| self.chain_id.strip_prefix("0X"))
            .ok_or_else(|| ConfigError::InvalidChainId(self.chain_id.clone()))?;
        u64::from_str_radix(digits, 16).map_err(|_| ConfigError::InvalidChainId(self.chain_id.clone()))
    }

    pub fn rpc_url(&self) -> Option<&str> {
        self.rpc_urls.first().map(String::as_str)
    }

    pub fn explorer_url(&self) -> Option<&str> {
        self.block_explorer_urls.first().map(String::as_str)
    }

    pub fn explorer_tx_url(&self, tx_hash: &B256) -> Option<String> {
        self.explorer_url()
            .map(|base| format!("{}/tx/{}", base.trim_end_matches('/'), tx_hash))
    }
}
