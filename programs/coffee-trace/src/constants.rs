/// Token shop rate used whenever the on-chain rate cannot be read.
pub const DEFAULT_FALLBACK_RATE: &str = "30000";

/// Decimals of the WAGA utility token and the coffee batch tokens.
pub const TOKEN_DECIMALS: u8 = 18;

/// Receipt polling
pub const DEFAULT_RECEIPT_POLL_INTERVAL_MS: u64 = 500;
pub const DEFAULT_RECEIPT_TIMEOUT_SECS: u64 = 120;

/// Source handed to the reserve oracle with every verification request.
/// The oracle fetches the warehouse inventory for the batch and answers
/// with the verified quantity.
pub const DEFAULT_VERIFICATION_SOURCE: &str = r#"const batchId = args[0];
const response = await Functions.makeHttpRequest({
  url: `https://inventory.example.com/api/batches/${batchId}/inventory`,
});
if (response.error) {
  throw Error("inventory request failed");
}
return Functions.encodeUint256(response.data.quantity);"#;

/// Chain used when neither the caller nor the config names one.
pub const DEFAULT_CHAIN: &str = "localhost";

#[cfg(any(test, feature = "test-utils"))]
pub mod test_data {
    use alloy_primitives::{address, Address};

    // Batch IDs
    pub const BATCH_ID_1: u64 = 1;
    pub const BATCH_ID_2: u64 = 2;
    pub const BATCH_ID_3: u64 = 3;

    // Quantities
    pub const QUANTITY_1: u64 = 500;
    pub const QUANTITY_2: u64 = 1_200;

    // Timestamps
    pub const PRODUCTION_DATE: u64 = 1_704_067_200; // 2024-01-01
    pub const EXPIRY_DATE: u64 = 1_735_689_600; // 2025-01-01
    pub const REQUEST_DATE: u64 = 1_717_200_000;
    pub const FULFILLMENT_DATE: u64 = 1_717_804_800;

    // Accounts
    pub const CONSUMER: Address = address!("70997970C51812dc3A010C7d01b50e0d17dc79C8");
    pub const RECIPIENT: Address = address!("3C44CdDdB6a900fa2b585dd299e03d12FA4293BC");
    pub const BUYER: Address = address!("90F79bf6EB2c4f870365E785982E1f101E93b906");

    pub const DELIVERY_ADDRESS: &str = "12 Bole Road, Addis Ababa";
}
