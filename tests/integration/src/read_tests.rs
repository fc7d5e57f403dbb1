use coffee_trace::{abi::catalog, contract::ContractFactory, ContractError};

use super::*;

#[test]
fn test_every_contract_resolves_on_every_chain() {
    let settings = Settings::builtin().unwrap();
    let factory = ContractFactory::new(Arc::new(settings.deployment));
    let chain = MockChain::default();
    let deployed: Vec<String> = factory
        .deployment()
        .chain_keys()
        .map(str::to_string)
        .collect();

    for key in &deployed {
        for name in ContractName::ALL {
            let handle = factory.contract(name.as_str(), &chain, Some(key.as_str())).unwrap();
            assert!(!handle.address().is_zero());
            assert!(!catalog(name).functions.is_empty());
        }
    }
}

#[test]
fn test_unknown_contract_is_descriptive() {
    let factory = ContractFactory::new(Arc::new(Settings::builtin().unwrap().deployment));
    let chain = MockChain::default();
    let error = factory.contract("CoffeeShop", &chain, None).err().unwrap();
    assert!(matches!(error, ContractError::UnknownContract(_)));
    assert_eq!(error.to_string(), "Unknown contract: CoffeeShop");
}

#[test]
fn test_status_codes() {
    let names: Vec<&str> = (0u64..=5)
        .map(|code| RedemptionStatus::from_code(code).as_str())
        .collect();
    assert_eq!(
        names,
        vec!["Requested", "Processing", "Fulfilled", "Cancelled", "Unknown", "Unknown"]
    );
    assert_eq!(RedemptionStatus::from_code(u64::MAX), RedemptionStatus::Unknown);
}

#[tokio::test]
async fn test_consumer_redemption_listing() -> Result<()> {
    let client = client();
    let chain = deployed_chain(&client, CONSUMER);
    let redemption = address(&client, ContractName::Redemption);
    chain.on_call::<IRedemption::getConsumerRedemptionsCall>(
        redemption,
        vec![U256::from(1u64), U256::from(2u64)].abi_encode(),
    );
    stub_redemption(&client, &chain, CONSUMER, BATCH_ID_3, 6, RedemptionStatus::Processing);

    let ids = client.try_get_consumer_redemptions(CONSUMER, &chain).await?;
    assert_eq!(ids, vec![1, 2]);
    for id in ids {
        let details = client.try_get_redemption_details(id, &chain).await;
        let details = details.found().expect("stubbed redemption");
        assert_eq!(details.batch_id, BATCH_ID_3);
        assert_eq!(details.status, RedemptionStatus::Processing);
        assert_eq!(details.fulfilled_at, None);
    }
    Ok(())
}

#[tokio::test]
async fn test_missing_batch_versus_dead_node() {
    let client = client();
    let token = address(&client, ContractName::CoffeeToken);

    let healthy = MockChain::default();
    healthy.fail_call::<ICoffeeToken::getBatchInfoCall>(
        token,
        ProviderError::Reverted {
            reason: Some("Batch does not exist".into()),
        },
    );
    let dead = MockChain::default();
    dead.fail_calls(ProviderError::Transport("connection refused".into()));

    assert_eq!(client.try_get_batch_info(404, &healthy).await, Lookup::NotFound);
    assert!(client.try_get_batch_info(404, &dead).await.is_unavailable());
    // both collapse to None on the swallowing path
    assert_eq!(client.get_batch_info(404, &healthy).await, None);
    assert_eq!(client.get_batch_info(404, &dead).await, None);
}

#[tokio::test]
async fn test_token_balance_read() -> Result<()> {
    let client = client();
    let chain = MockChain::default();
    let token = address(&client, ContractName::CoffeeToken);
    chain.on_call::<ICoffeeToken::balanceOfCall>(token, U256::from(QUANTITY_1).abi_encode());

    let balance = client.try_get_token_balance(RECIPIENT, BATCH_ID_1, &chain).await?;
    assert_eq!(balance, U256::from(QUANTITY_1));
    Ok(())
}
