use {
    rand::{rngs::StdRng, Rng, SeedableRng},
    token_units::{format_ether, parse_ether, TokenAmount},
    tokio_util::sync::CancellationToken,
};

use super::*;

#[tokio::test]
async fn test_purchase_amounts_match_rate() -> Result<()> {
    let client = client();
    let chain = deployed_chain(&client, BUYER);
    let mut rng = StdRng::seed_from_u64(0xc0ffee);

    for _ in 0..20 {
        // up to ~1000 ETH in wei
        let wei = U256::from(rng.gen_range(1u128..1_000_000_000_000_000_000_000u128));
        let eth = format_ether(wei);
        assert_eq!(parse_ether(&eth)?, wei);

        let purchase = client.buy_waga_tokens(&eth, &chain).await?;
        assert_eq!(purchase.eth_amount.raw(), wei);
        assert_eq!(purchase.token_amount.raw(), wei * U256::from(SHOP_RATE));
    }
    assert_eq!(chain.sent().len(), 20);
    Ok(())
}

#[tokio::test]
async fn test_simulated_and_live_purchases_agree() -> Result<()> {
    init_logger();
    let mut settings = Settings::builtin()?;
    settings.client.purchase_mode = coffee_trace::PurchaseMode::Simulated;
    let simulated = CoffeeClient::from_settings(settings)?;
    let live = client();
    let chain = deployed_chain(&live, BUYER);

    let quoted = simulated.buy_waga_tokens("2.5", &chain).await?;
    assert!(quoted.simulated);
    assert!(chain.sent().is_empty());

    let bought = live.buy_waga_tokens("2.5", &chain).await?;
    assert!(!bought.simulated);
    assert_eq!(quoted.token_amount, bought.token_amount);
    assert_eq!(quoted.token_amount, TokenAmount::ether("75000")?);
    assert_ne!(quoted.transaction_hash, bought.transaction_hash);
    Ok(())
}

#[tokio::test]
async fn test_purchase_from_wrong_emitter_fails() -> Result<()> {
    let client = client();
    let chain = MockChain::new(BUYER);
    let shop = address(&client, ContractName::TokenShop);
    chain.on_send(shop, |tx| {
        vec![encode_event(
            Address::repeat_byte(0x99),
            &ITokenShop::TokensPurchased {
                buyer: tx.from,
                ethAmount: tx.value,
                tokenAmount: tx.value,
            },
        )]
    });

    let error = client.buy_waga_tokens("1", &chain).await.unwrap_err();
    assert!(matches!(error, FlowError::EventNotFound { event: "TokensPurchased", .. }));
    Ok(())
}

#[tokio::test]
async fn test_cancel_while_waiting_for_receipt() -> Result<()> {
    let cancel = CancellationToken::new();
    let client = client().with_cancellation(cancel.clone());
    let chain = deployed_chain(&client, BUYER);
    chain.set_pending_polls(usize::MAX);

    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        trigger.cancel();
    });

    let error = client.buy_waga_tokens("1", &chain).await.unwrap_err();
    assert!(matches!(error, FlowError::Cancelled { tx_hash: Some(_) }));
    assert_eq!(chain.sent().len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_estimate_failure_sends_nothing() -> Result<()> {
    let client = client();
    let chain = deployed_chain(&client, CONSUMER);
    chain.fail_estimates(ProviderError::Reverted {
        reason: Some("Insufficient balance".into()),
    });

    let error = client
        .request_redemption(BATCH_ID_1, 10, DELIVERY_ADDRESS, &chain)
        .await
        .unwrap_err();
    assert_eq!(
        error.to_string(),
        "Transaction would fail: Execution reverted: Insufficient balance"
    );
    assert!(chain.sent().is_empty());
    Ok(())
}
