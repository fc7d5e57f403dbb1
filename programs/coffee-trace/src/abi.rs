//! Contract interfaces.
//!
//! Each deployed contract has a typed binding generated by `sol!` and a
//! [`ContractAbi`] entry listing its human-readable function and event
//! signatures. The set of contracts is closed: [`ContractName`] is the only
//! way to name one.

use {
    alloy::{
        sol,
        sol_types::{SolCall, SolEvent},
    },
    serde::{Deserialize, Serialize},
    std::{fmt, str::FromStr},
};

use crate::error::ContractError;

sol! {
    #[derive(Debug, PartialEq)]
    interface ICoffeeToken {
        function createBatch(uint256 productionDate, uint256 expiryDate, uint256 quantity) external returns (uint256 batchId);
        function getBatchInfo(uint256 batchId) external view returns (uint256 productionDate, uint256 expiryDate, bool isVerified, uint256 currentQuantity);
        function getActiveBatchIds() external view returns (uint256[] memory batchIds);
        function balanceOf(address account, uint256 id) external view returns (uint256 balance);

        event BatchCreated(uint256 indexed batchId, uint256 productionDate, uint256 expiryDate, uint256 quantity);
    }

    #[derive(Debug, PartialEq)]
    interface IProofOfReserve {
        function requestReserveVerification(uint256 batchId, uint256 quantity, address recipient, string source) external returns (bytes32 requestId);

        event VerificationRequested(bytes32 indexed requestId, uint256 indexed batchId, uint256 quantity, address recipient);
    }

    #[derive(Debug, PartialEq)]
    interface IRedemption {
        function requestRedemption(uint256 batchId, uint256 quantity, string deliveryAddress) external returns (uint256 redemptionId);
        function updateRedemptionStatus(uint256 redemptionId, uint8 status) external;
        function getRedemptionDetails(uint256 redemptionId) external view returns (address consumer, uint256 batchId, uint256 quantity, string deliveryAddress, uint256 requestDate, uint8 status, uint256 fulfillmentDate);
        function getConsumerRedemptions(address consumer) external view returns (uint256[] memory redemptionIds);

        event RedemptionRequested(uint256 indexed redemptionId, address indexed consumer, uint256 indexed batchId, uint256 quantity, string deliveryAddress);
        event RedemptionStatusUpdated(uint256 indexed redemptionId, uint8 status);
    }

    #[derive(Debug, PartialEq)]
    interface IInventoryManager {
        function updateInventory(uint256 batchId, uint256 newQuantity) external;

        event InventoryUpdated(uint256 indexed batchId, uint256 oldQuantity, uint256 newQuantity);
    }

    #[derive(Debug, PartialEq)]
    interface ITokenShop {
        function tokensPerEth() external view returns (uint256 rate);
        function buyTokens() external payable;

        event TokensPurchased(address indexed buyer, uint256 ethAmount, uint256 tokenAmount);
    }
}

/// Logical name of a deployed contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ContractName {
    CoffeeToken,
    ProofOfReserve,
    Redemption,
    InventoryManager,
    TokenShop,
}

impl ContractName {
    pub const ALL: [ContractName; 5] = [
        ContractName::CoffeeToken,
        ContractName::ProofOfReserve,
        ContractName::Redemption,
        ContractName::InventoryManager,
        ContractName::TokenShop,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::CoffeeToken => "CoffeeToken",
            Self::ProofOfReserve => "ProofOfReserve",
            Self::Redemption => "Redemption",
            Self::InventoryManager => "InventoryManager",
            Self::TokenShop => "TokenShop",
        }
    }
}

impl fmt::Display for ContractName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContractName {
    type Err = ContractError;

    /// Accepts the canonical name in any ASCII case, so `coffeeToken`
    /// resolves like `CoffeeToken`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|name| name.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ContractError::UnknownContract(s.to_string()))
    }
}

/// Human-readable interface of one contract.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct ContractAbi {
    pub name: ContractName,
    pub functions: &'static [&'static str],
    pub events: &'static [&'static str],
}

impl ContractAbi {
    pub fn function(&self, name: &str) -> Option<&'static str> {
        self.functions.iter().copied().find(|sig| signature_name(sig) == name)
    }

    pub fn event(&self, name: &str) -> Option<&'static str> {
        self.events.iter().copied().find(|sig| signature_name(sig) == name)
    }
}

/// `foo(uint256,address)` -> `foo`
pub fn signature_name(signature: &str) -> &str {
    signature.split('(').next().unwrap_or(signature)
}

/// Name of the function behind a generated call type.
pub fn function_name<C: SolCall>() -> &'static str {
    signature_name(C::SIGNATURE)
}

/// Name of the event behind a generated event type.
pub fn event_name<E: SolEvent>() -> &'static str {
    signature_name(E::SIGNATURE)
}

static COFFEE_TOKEN_ABI: ContractAbi = ContractAbi {
    name: ContractName::CoffeeToken,
    functions: &[
        ICoffeeToken::createBatchCall::SIGNATURE,
        ICoffeeToken::getBatchInfoCall::SIGNATURE,
        ICoffeeToken::getActiveBatchIdsCall::SIGNATURE,
        ICoffeeToken::balanceOfCall::SIGNATURE,
    ],
    events: &[ICoffeeToken::BatchCreated::SIGNATURE],
};

static PROOF_OF_RESERVE_ABI: ContractAbi = ContractAbi {
    name: ContractName::ProofOfReserve,
    functions: &[IProofOfReserve::requestReserveVerificationCall::SIGNATURE],
    events: &[IProofOfReserve::VerificationRequested::SIGNATURE],
};

static REDEMPTION_ABI: ContractAbi = ContractAbi {
    name: ContractName::Redemption,
    functions: &[
        IRedemption::requestRedemptionCall::SIGNATURE,
        IRedemption::updateRedemptionStatusCall::SIGNATURE,
        IRedemption::getRedemptionDetailsCall::SIGNATURE,
        IRedemption::getConsumerRedemptionsCall::SIGNATURE,
    ],
    events: &[
        IRedemption::RedemptionRequested::SIGNATURE,
        IRedemption::RedemptionStatusUpdated::SIGNATURE,
    ],
};

static INVENTORY_MANAGER_ABI: ContractAbi = ContractAbi {
    name: ContractName::InventoryManager,
    functions: &[IInventoryManager::updateInventoryCall::SIGNATURE],
    events: &[IInventoryManager::InventoryUpdated::SIGNATURE],
};

static TOKEN_SHOP_ABI: ContractAbi = ContractAbi {
    name: ContractName::TokenShop,
    functions: &[
        ITokenShop::tokensPerEthCall::SIGNATURE,
        ITokenShop::buyTokensCall::SIGNATURE,
    ],
    events: &[ITokenShop::TokensPurchased::SIGNATURE],
};

pub fn catalog(name: ContractName) -> &'static ContractAbi {
    match name {
        ContractName::CoffeeToken => &COFFEE_TOKEN_ABI,
        ContractName::ProofOfReserve => &PROOF_OF_RESERVE_ABI,
        ContractName::Redemption => &REDEMPTION_ABI,
        ContractName::InventoryManager => &INVENTORY_MANAGER_ABI,
        ContractName::TokenShop => &TOKEN_SHOP_ABI,
    }
}
