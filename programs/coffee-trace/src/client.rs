use {
    alloy_primitives::Address,
    std::sync::Arc,
    tokio_util::sync::CancellationToken,
};

use crate::{
    abi::ContractName,
    config::{ClientConfig, Deployment, Settings},
    confirm::ConfirmOptions,
    contract::{ContractFactory, ContractHandle},
    error::{ConfigError, ContractError},
};

/// Entry point for every read and write against the deployed contracts.
///
/// Cloning is cheap: configuration is shared and the cancellation token is
/// a handle to the same signal.
#[derive(Debug, Clone)]
pub struct CoffeeClient {
    factory: ContractFactory,
    config: Arc<ClientConfig>,
    chain: String,
    cancel: CancellationToken,
}

impl CoffeeClient {
    /// Targets `config.chain` when set, else the deployment's default chain.
    pub fn new(deployment: Arc<Deployment>, config: Arc<ClientConfig>) -> Result<Self, ConfigError> {
        let chain = config
            .chain
            .clone()
            .unwrap_or_else(|| deployment.default_chain.clone());
        deployment.chain(&chain)?;
        config.validate()?;

        Ok(Self {
            factory: ContractFactory::new(deployment),
            config,
            chain,
            cancel: CancellationToken::new(),
        })
    }

    pub fn from_settings(settings: Settings) -> Result<Self, ConfigError> {
        Self::new(Arc::new(settings.deployment), Arc::new(settings.client))
    }

    pub fn on_chain(mut self, chain: &str) -> Result<Self, ConfigError> {
        self.factory.deployment().chain(chain)?;
        self.chain = chain.to_string();
        Ok(self)
    }

    /// Write flows stop waiting for receipts once `cancel` fires.
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancel
    }

    pub fn chain(&self) -> &str {
        &self.chain
    }

    pub fn deployment(&self) -> &Deployment {
        self.factory.deployment()
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn factory(&self) -> &ContractFactory {
        &self.factory
    }

    pub fn address(&self, contract: ContractName) -> Result<Address, ConfigError> {
        self.deployment().address(&self.chain, contract)
    }

    /// Handle on `contract` for the client's chain.
    pub fn contract<'a, C: ?Sized>(
        &self,
        contract: ContractName,
        client: &'a C,
    ) -> Result<ContractHandle<'a, C>, ContractError> {
        self.factory.contract_for(contract, client, Some(&self.chain))
    }

    pub fn confirm_options(&self) -> ConfirmOptions {
        ConfirmOptions {
            poll_interval: self.config.receipt_poll_interval(),
            timeout: self.config.receipt_timeout(),
        }
    }
}
