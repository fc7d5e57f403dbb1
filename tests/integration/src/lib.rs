use {
    alloy::sol_types::{SolCall, SolValue},
    alloy_primitives::{Address, U256},
    anyhow::Result,
    coffee_trace::{
        abi::{ICoffeeToken, IRedemption, ITokenShop},
        constants::test_data::*,
        events::encode_event,
        testing::MockChain,
        ChainReader, CoffeeClient, ContractName, FlowError, Lookup, ProviderError, RedemptionStatus,
        Settings,
    },
    std::sync::Arc,
};

mod common {
    use super::*;

    pub const SHOP_RATE: u64 = 30_000;

    pub fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    pub fn client() -> CoffeeClient {
        init_logger();
        let mut settings = Settings::builtin().unwrap();
        settings.client.receipt_poll_interval_ms = 1;
        settings.client.receipt_timeout_secs = 5;
        CoffeeClient::from_settings(settings).unwrap()
    }

    pub fn address(client: &CoffeeClient, contract: ContractName) -> Address {
        client.address(contract).unwrap()
    }

    /// A chain whose token shop sells at `SHOP_RATE` and whose redemption
    /// contract numbers requests from 1.
    pub fn deployed_chain(client: &CoffeeClient, sender: Address) -> Arc<MockChain> {
        let chain = Arc::new(MockChain::new(sender));

        let shop = address(client, ContractName::TokenShop);
        chain.on_call::<ITokenShop::tokensPerEthCall>(shop, U256::from(SHOP_RATE).abi_encode());
        chain.on_send(shop, move |tx| {
            vec![encode_event(
                shop,
                &ITokenShop::TokensPurchased {
                    buyer: tx.from,
                    ethAmount: tx.value,
                    tokenAmount: tx.value * U256::from(SHOP_RATE),
                },
            )]
        });

        let redemption = address(client, ContractName::Redemption);
        let next_id = Arc::new(std::sync::atomic::AtomicU64::new(1));
        chain.on_send(redemption, move |tx| {
            if let Ok(call) = IRedemption::requestRedemptionCall::abi_decode(&tx.data) {
                let id = next_id.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
                return vec![encode_event(
                    redemption,
                    &IRedemption::RedemptionRequested {
                        redemptionId: U256::from(id),
                        consumer: tx.from,
                        batchId: call.batchId,
                        quantity: call.quantity,
                        deliveryAddress: call.deliveryAddress,
                    },
                )];
            }
            if let Ok(call) = IRedemption::updateRedemptionStatusCall::abi_decode(&tx.data) {
                return vec![encode_event(
                    redemption,
                    &IRedemption::RedemptionStatusUpdated {
                        redemptionId: call.redemptionId,
                        status: call.status,
                    },
                )];
            }
            Vec::new()
        });

        chain
    }

    /// Stubs `getRedemptionDetails` as the contract would answer it.
    pub fn stub_redemption(
        client: &CoffeeClient,
        chain: &MockChain,
        consumer: Address,
        batch_id: u64,
        quantity: u64,
        status: RedemptionStatus,
    ) {
        let fulfilled = match status {
            RedemptionStatus::Fulfilled => U256::from(FULFILLMENT_DATE),
            _ => U256::ZERO,
        };
        chain.on_call::<IRedemption::getRedemptionDetailsCall>(
            address(client, ContractName::Redemption),
            (
                consumer,
                U256::from(batch_id),
                U256::from(quantity),
                DELIVERY_ADDRESS.to_string(),
                U256::from(REQUEST_DATE),
                U256::from(status.code().unwrap_or(u8::MAX)),
                fulfilled,
            )
                .abi_encode_params(),
        );
    }
}

mod flow_tests;
mod read_tests;

use common::*;

#[tokio::test]
async fn test_redemption_lifecycle() -> Result<()> {
    let client = client();
    let chain = deployed_chain(&client, CONSUMER);

    let request = client
        .request_redemption(BATCH_ID_1, 4, DELIVERY_ADDRESS, &chain)
        .await?;
    assert_eq!(request.redemption_id, 1);
    assert_eq!(request.quantity, 4);

    stub_redemption(&client, &chain, CONSUMER, BATCH_ID_1, 4, RedemptionStatus::Requested);
    let change = client
        .update_redemption_status(request.redemption_id, RedemptionStatus::Processing, &chain)
        .await?;
    assert_eq!(change.previous, RedemptionStatus::Requested);
    assert_eq!(change.status, RedemptionStatus::Processing);

    stub_redemption(&client, &chain, CONSUMER, BATCH_ID_1, 4, RedemptionStatus::Processing);
    client
        .update_redemption_status(request.redemption_id, RedemptionStatus::Fulfilled, &chain)
        .await?;

    stub_redemption(&client, &chain, CONSUMER, BATCH_ID_1, 4, RedemptionStatus::Fulfilled);
    let redemption = client
        .get_redemption_details(request.redemption_id, &chain)
        .await
        .expect("redemption is readable");
    assert_eq!(redemption.status, RedemptionStatus::Fulfilled);
    assert!(redemption.fulfilled_at.is_some());

    // fulfilled is terminal
    let error = client
        .cancel_redemption(request.redemption_id, &chain)
        .await
        .unwrap_err();
    assert!(matches!(error, FlowError::InvalidTransition { .. }));
    assert_eq!(chain.sent().len(), 3);
    Ok(())
}

#[tokio::test]
async fn test_redemption_request_without_event_fails() -> Result<()> {
    let client = client();
    let chain = MockChain::new(CONSUMER);

    let error = client
        .request_redemption(BATCH_ID_1, 1, DELIVERY_ADDRESS, &chain)
        .await
        .unwrap_err();
    assert!(error
        .to_string()
        .starts_with("Expected event RedemptionRequested not found in transaction 0x"));
    // the transaction itself went through
    assert_eq!(chain.sent().len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_buy_hundredth_of_an_eth() -> Result<()> {
    let client = client();
    let chain = deployed_chain(&client, BUYER);

    let purchase = client.buy_waga_tokens("0.01", &chain).await?;
    let rate = client.get_token_shop_rate(Some(&*chain as &dyn ChainReader)).await;
    assert_eq!(rate, SHOP_RATE.to_string());
    assert_eq!(purchase.token_amount.to_string(), "300");
    assert_eq!(purchase.eth_amount.to_string(), "0.01");
    assert!(!purchase.simulated);
    Ok(())
}

#[tokio::test]
async fn test_dead_node_degrades_reads() -> Result<()> {
    let client = client();
    let chain = MockChain::default();
    chain.fail_calls(ProviderError::Transport("connection refused".into()));

    assert!(client.get_active_batch_ids(&chain).await.is_empty());
    assert_eq!(client.get_batch_info(BATCH_ID_1, &chain).await, None);
    assert!(matches!(
        client.try_get_batch_info(BATCH_ID_1, &chain).await,
        Lookup::Unavailable(_)
    ));
    assert_eq!(client.get_token_shop_rate(None).await, "30000");
    assert_eq!(client.get_token_shop_rate(Some(&chain as &dyn ChainReader)).await, "30000");
    Ok(())
}

#[tokio::test]
async fn test_created_batch_is_readable() -> Result<()> {
    let client = client();
    let chain = MockChain::default();
    let token = address(&client, ContractName::CoffeeToken);
    chain.on_send(token, move |tx| {
        let call = ICoffeeToken::createBatchCall::abi_decode(&tx.data).unwrap();
        vec![encode_event(
            token,
            &ICoffeeToken::BatchCreated {
                batchId: U256::from(BATCH_ID_2),
                productionDate: call.productionDate,
                expiryDate: call.expiryDate,
                quantity: call.quantity,
            },
        )]
    });

    let production = chrono::DateTime::from_timestamp(PRODUCTION_DATE as i64, 0).unwrap();
    let expiry = chrono::DateTime::from_timestamp(EXPIRY_DATE as i64, 0).unwrap();
    let batch = client.create_batch(production, expiry, QUANTITY_2, &chain).await?;
    assert_eq!(batch.batch_id, BATCH_ID_2);

    chain.on_call::<ICoffeeToken::getBatchInfoCall>(
        token,
        (
            U256::from(PRODUCTION_DATE),
            U256::from(EXPIRY_DATE),
            false,
            U256::from(QUANTITY_2),
        )
            .abi_encode_params(),
    );
    let info = client
        .get_batch_info(batch.batch_id, &chain)
        .await
        .expect("batch is readable");
    assert_eq!(info.current_quantity, QUANTITY_2);
    assert!(!info.is_verified);
    Ok(())
}
