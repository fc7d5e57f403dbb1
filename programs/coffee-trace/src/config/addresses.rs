use {
    alloy_primitives::Address,
    serde::{Deserialize, Serialize},
    std::collections::BTreeMap,
};

use crate::{abi::ContractName, error::ConfigError};

/// Deployed addresses, keyed by chain key and then by contract.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AddressBook {
    chains: BTreeMap<String, BTreeMap<ContractName, Address>>,
}

impl AddressBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, chain: &str, contract: ContractName, address: Address) {
        self.chains
            .entry(chain.to_string())
            .or_default()
            .insert(contract, address);
    }

    pub fn with(mut self, chain: &str, contract: ContractName, address: Address) -> Self {
        self.insert(chain, contract, address);
        self
    }

    pub fn lookup(&self, chain: &str, contract: ContractName) -> Result<Address, ConfigError> {
        self.chains
            .get(chain)
            .and_then(|contracts| contracts.get(&contract))
            .copied()
            .ok_or_else(|| ConfigError::ContractNotFound {
                chain: chain.to_string(),
                contract,
            })
    }

    pub fn chain_keys(&self) -> impl Iterator<Item = &str> {
        self.chains.keys().map(String::as_str)
    }

    pub fn contracts(&self, chain: &str) -> Option<&BTreeMap<ContractName, Address>> {
        self.chains.get(chain)
    }

    /// Every chain with an entry must carry a non-zero address for every
    /// contract.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (chain, contracts) in &self.chains {
            for contract in ContractName::ALL {
                match contracts.get(&contract) {
                    Some(address) if !address.is_zero() => {}
                    _ => {
                        return Err(ConfigError::IncompleteDeployment {
                            chain: chain.clone(),
                            contract,
                        })
                    }
                }
            }
        }
        Ok(())
    }
}
