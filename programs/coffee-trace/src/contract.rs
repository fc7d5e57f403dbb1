use {
    alloy::sol_types::SolCall,
    alloy_primitives::{Address, Bytes, U256},
    std::sync::Arc,
};

use crate::{
    abi::{catalog, function_name, ContractAbi, ContractName},
    config::Deployment,
    error::ContractError,
    provider::{ChainReader, ChainSigner, TxRequest},
};

/// Resolves a contract name on a chain to a callable handle.
#[derive(Debug, Clone)]
pub struct ContractFactory {
    deployment: Arc<Deployment>,
}

impl ContractFactory {
    pub fn new(deployment: Arc<Deployment>) -> Self {
        Self { deployment }
    }

    pub fn deployment(&self) -> &Deployment {
        &self.deployment
    }

    /// `chain` defaults to the deployment's default chain. Names outside
    /// [`ContractName`] fail with [`ContractError::UnknownContract`].
    pub fn contract<'a, C: ?Sized>(
        &self,
        name: &str,
        client: &'a C,
        chain: Option<&str>,
    ) -> Result<ContractHandle<'a, C>, ContractError> {
        let name: ContractName = name.parse()?;
        self.contract_for(name, client, chain)
    }

    pub fn contract_for<'a, C: ?Sized>(
        &self,
        name: ContractName,
        client: &'a C,
        chain: Option<&str>,
    ) -> Result<ContractHandle<'a, C>, ContractError> {
        let chain = chain.unwrap_or(&self.deployment.default_chain);
        let address = self.deployment.address(chain, name)?;
        Ok(ContractHandle {
            name,
            chain: chain.to_string(),
            address,
            abi: catalog(name),
            client,
        })
    }
}

pub struct ContractHandle<'a, C: ?Sized> {
    name: ContractName,
    chain: String,
    address: Address,
    abi: &'static ContractAbi,
    client: &'a C,
}

impl<'a, C: ?Sized> ContractHandle<'a, C> {
    pub fn name(&self) -> ContractName {
        self.name
    }

    pub fn chain(&self) -> &str {
        &self.chain
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn abi(&self) -> &'static ContractAbi {
        self.abi
    }

    pub fn client(&self) -> &'a C {
        self.client
    }
}

impl<C: ChainReader + ?Sized> ContractHandle<'_, C> {
    pub async fn call<Call: SolCall>(&self, call: Call) -> Result<Call::Return, ContractError> {
        log::debug!("{}.{} on {}", self.name, function_name::<Call>(), self.chain);
        let output = self.client.call(self.address, Bytes::from(call.abi_encode())).await?;
        Call::abi_decode_returns(&output).map_err(|e| ContractError::Decode {
            contract: self.name,
            function: function_name::<Call>(),
            reason: e.to_string(),
        })
    }
}

impl<C: ChainSigner + ?Sized> ContractHandle<'_, C> {
    pub fn transaction<Call: SolCall>(&self, call: &Call, value: U256) -> TxRequest {
        TxRequest {
            from: self.client.address(),
            to: self.address,
            data: Bytes::from(call.abi_encode()),
            value,
        }
    }
}
