//! Deployment and client configuration.
//!
//! Everything here is immutable once loaded. A [`Settings`] value is built
//! at startup, from a JSON file or the built-in table, and handed to the
//! client behind an `Arc`.

use {
    alloy_primitives::{Address, U256},
    serde::{Deserialize, Serialize},
    std::{collections::BTreeMap, path::Path, time::Duration},
};

pub mod addresses;
pub mod chains;

pub use addresses::AddressBook;
pub use chains::{ChainConfig, NativeCurrency};

use crate::{
    abi::ContractName,
    constants::{
        DEFAULT_CHAIN, DEFAULT_FALLBACK_RATE, DEFAULT_RECEIPT_POLL_INTERVAL_MS,
        DEFAULT_RECEIPT_TIMEOUT_SECS, DEFAULT_VERIFICATION_SOURCE, TOKEN_DECIMALS,
    },
    error::ConfigError,
};

const BUILTIN_NETWORKS: &str = include_str!("networks.json");

/// Where the contracts live.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deployment {
    #[serde(default = "default_chain")]
    pub default_chain: String,
    pub chains: BTreeMap<String, ChainConfig>,
    #[serde(default)]
    pub contracts: AddressBook,
}

fn default_chain() -> String {
    DEFAULT_CHAIN.to_string()
}

impl Deployment {
    pub fn chain(&self, key: &str) -> Result<&ChainConfig, ConfigError> {
        self.chains
            .get(key)
            .ok_or_else(|| ConfigError::ChainNotConfigured(key.to_string()))
    }

    pub fn address(&self, chain: &str, contract: ContractName) -> Result<Address, ConfigError> {
        self.chain(chain)?;
        self.contracts.lookup(chain, contract)
    }

    pub fn chain_keys(&self) -> impl Iterator<Item = &str> {
        self.chains.keys().map(String::as_str)
    }

    /// Every configured chain must carry an address for every contract.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.chain(&self.default_chain)?;
        for (key, chain) in &self.chains {
            chain.chain_id_number()?;
            for contract in ContractName::ALL {
                self.contracts
                    .lookup(key, contract)
                    .map_err(|_| ConfigError::IncompleteDeployment {
                        chain: key.clone(),
                        contract,
                    })?;
            }
        }
        for key in self.contracts.chain_keys() {
            self.chain(key)?;
        }
        self.contracts.validate()
    }
}

/// Whether `buy_waga_tokens` talks to the token shop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PurchaseMode {
    #[default]
    Live,
    /// Demo mode: no transaction is sent and the result is flagged as
    /// simulated.
    Simulated,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClientConfig {
    /// Overrides `Deployment::default_chain`
    pub chain: Option<String>,
    pub receipt_poll_interval_ms: u64,
    pub receipt_timeout_secs: u64,
    pub fallback_rate: String,
    pub verification_source: String,
    pub purchase_mode: PurchaseMode,
    pub token_decimals: u8,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            chain: None,
            receipt_poll_interval_ms: DEFAULT_RECEIPT_POLL_INTERVAL_MS,
            receipt_timeout_secs: DEFAULT_RECEIPT_TIMEOUT_SECS,
            fallback_rate: DEFAULT_FALLBACK_RATE.to_string(),
            verification_source: DEFAULT_VERIFICATION_SOURCE.to_string(),
            purchase_mode: PurchaseMode::Live,
            token_decimals: TOKEN_DECIMALS,
        }
    }
}

impl ClientConfig {
    pub fn receipt_poll_interval(&self) -> Duration {
        Duration::from_millis(self.receipt_poll_interval_ms)
    }

    pub fn receipt_timeout(&self) -> Duration {
        Duration::from_secs(self.receipt_timeout_secs)
    }

    pub fn fallback_rate_value(&self) -> Result<U256, ConfigError> {
        U256::from_str_radix(self.fallback_rate.trim(), 10)
            .map_err(|_| ConfigError::InvalidFallbackRate(self.fallback_rate.clone()))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.fallback_rate_value()?;
        if self.token_decimals > token_units::MAX_DECIMALS {
            return Err(ConfigError::UnsupportedTokenDecimals(self.token_decimals));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub deployment: Deployment,
    #[serde(default)]
    pub client: ClientConfig,
}

impl Settings {
    pub fn builtin() -> Result<Self, ConfigError> {
        Self::from_json(BUILTIN_NETWORKS)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.deployment.validate()?;
        settings.client.validate()?;
        Ok(settings)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        log::debug!("Loaded config from {}", path.display());
        Self::from_json(&json)
    }
}
