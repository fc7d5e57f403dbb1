//! Client-side chain layer of the coffee traceability platform.
//!
//! A [`CoffeeClient`] is built once from [`config::Settings`] and then used
//! to read batch, redemption and token-shop state and to drive the write
//! flows (reserve verification, redemptions, token purchases). Chain access
//! goes through the [`provider::ChainReader`] and [`provider::ChainSigner`]
//! seams; [`rpc`] implements them over JSON-RPC.

pub mod abi;
pub mod accessors;
pub mod client;
pub mod config;
pub mod confirm;
pub mod constants;
pub mod contract;
pub mod error;
pub mod events;
pub mod flows;
pub mod provider;
pub mod rpc;
pub mod state;
pub mod status;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

pub use {
    abi::ContractName,
    accessors::Lookup,
    client::CoffeeClient,
    config::{ClientConfig, Deployment, PurchaseMode, Settings},
    error::{ConfigError, ContractError, FlowError, ProviderError},
    events::EventMatch,
    provider::{ChainReader, ChainSigner},
    status::RedemptionStatus,
};
