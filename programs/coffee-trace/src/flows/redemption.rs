use alloy_primitives::U256;

use crate::{
    abi::{ContractName, IRedemption},
    client::CoffeeClient,
    error::FlowError,
    events::{find_event, find_event_where},
    provider::ChainSigner,
    state::{RedemptionRequest, RedemptionStatusChange},
    status::RedemptionStatus,
};

impl CoffeeClient {
    /// Burns `quantity` batch tokens of the signer in exchange for physical
    /// delivery of the coffee to `delivery_address`.
    pub async fn request_redemption<S: ChainSigner + ?Sized>(
        &self,
        batch_id: u64,
        quantity: u64,
        delivery_address: &str,
        signer: &S,
    ) -> Result<RedemptionRequest, FlowError> {
        if quantity == 0 {
            return Err(FlowError::InvalidInput("quantity must be greater than zero".into()));
        }
        if delivery_address.trim().is_empty() {
            return Err(FlowError::InvalidInput("delivery address is empty".into()));
        }

        let redemption = self.contract(ContractName::Redemption, signer)?;
        let call = IRedemption::requestRedemptionCall {
            batchId: U256::from(batch_id),
            quantity: U256::from(quantity),
            deliveryAddress: delivery_address.to_string(),
        };
        let tx = redemption.transaction(&call, U256::ZERO);

        let receipt = self
            .submit(signer, redemption.name(), redemption.address(), tx, "requestRedemption")
            .await?;
        let event = find_event::<IRedemption::RedemptionRequested>(&receipt, redemption.address())?
            .require(receipt.transaction_hash)?;
        Ok(RedemptionRequest::from_event(receipt.transaction_hash, &event)?)
    }

    /// Moves a redemption to `next`. The transition is checked against the
    /// current on-chain status before anything is sent.
    pub async fn update_redemption_status<S: ChainSigner + ?Sized>(
        &self,
        redemption_id: u64,
        next: RedemptionStatus,
        signer: &S,
    ) -> Result<RedemptionStatusChange, FlowError> {
        let code = next
            .code()
            .ok_or_else(|| FlowError::InvalidInput(format!("cannot set status {}", next)))?;

        let current = match self.read_redemption(redemption_id, signer).await {
            Ok(Some(redemption)) => redemption,
            Ok(None) => return Err(FlowError::RedemptionNotFound(redemption_id)),
            Err(e) if e.is_revert() => return Err(FlowError::RedemptionNotFound(redemption_id)),
            Err(e) => return Err(e.into()),
        };
        if !current.status.can_transition_to(next) {
            return Err(FlowError::InvalidTransition {
                from: current.status,
                to: next,
            });
        }

        let redemption = self.contract(ContractName::Redemption, signer)?;
        let call = IRedemption::updateRedemptionStatusCall {
            redemptionId: U256::from(redemption_id),
            status: code,
        };
        let tx = redemption.transaction(&call, U256::ZERO);

        let receipt = self
            .submit(signer, redemption.name(), redemption.address(), tx, "updateRedemptionStatus")
            .await?;
        let event = find_event_where(&receipt, redemption.address(), |e: &IRedemption::RedemptionStatusUpdated| {
            e.redemptionId == call.redemptionId
        })?
        .require(receipt.transaction_hash)?;

        Ok(RedemptionStatusChange {
            transaction_hash: receipt.transaction_hash,
            redemption_id,
            previous: current.status,
            status: RedemptionStatus::from_code(u64::from(event.status)),
        })
    }

    pub async fn cancel_redemption<S: ChainSigner + ?Sized>(
        &self,
        redemption_id: u64,
        signer: &S,
    ) -> Result<RedemptionStatusChange, FlowError> {
        self.update_redemption_status(redemption_id, RedemptionStatus::Cancelled, signer)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        constants::test_data::*, error::ProviderError, events::encode_event,
        flows::test_utils::fast_client, testing::MockChain,
    };
    use alloy::sol_types::{SolCall, SolValue};
    use alloy_primitives::Address;

    fn stub_status(client: &CoffeeClient, chain: &MockChain, status: u8) {
        let address = client.address(ContractName::Redemption).unwrap();
        chain.on_call::<IRedemption::getRedemptionDetailsCall>(
            address,
            (
                CONSUMER,
                U256::from(BATCH_ID_1),
                U256::from(2u64),
                DELIVERY_ADDRESS.to_string(),
                U256::from(REQUEST_DATE),
                U256::from(status),
                U256::ZERO,
            )
                .abi_encode_params(),
        );
    }

    fn emit_status_updates(client: &CoffeeClient, chain: &MockChain) {
        let address = client.address(ContractName::Redemption).unwrap();
        chain.on_send(address, move |tx| {
            let call = IRedemption::updateRedemptionStatusCall::abi_decode(&tx.data).unwrap();
            vec![encode_event(
                address,
                &IRedemption::RedemptionStatusUpdated {
                    redemptionId: call.redemptionId,
                    status: call.status,
                },
            )]
        });
    }

    #[tokio::test]
    async fn test_request_redemption() {
        let client = fast_client();
        let chain = MockChain::new(CONSUMER);
        let address = client.address(ContractName::Redemption).unwrap();
        chain.on_send(address, move |tx| {
            let call = IRedemption::requestRedemptionCall::abi_decode(&tx.data).unwrap();
            vec![encode_event(
                address,
                &IRedemption::RedemptionRequested {
                    redemptionId: U256::from(12u64),
                    consumer: tx.from,
                    batchId: call.batchId,
                    quantity: call.quantity,
                    deliveryAddress: call.deliveryAddress,
                },
            )]
        });

        let request = client
            .request_redemption(BATCH_ID_2, 3, DELIVERY_ADDRESS, &chain)
            .await
            .unwrap();
        assert_eq!(request.redemption_id, 12);
        assert_eq!(request.batch_id, BATCH_ID_2);
        assert_eq!(request.quantity, 3);
        assert_eq!(chain.sent()[0].from, CONSUMER);
    }

    #[tokio::test]
    async fn test_request_without_event_fails() {
        let client = fast_client();
        let chain = MockChain::default();

        let error = client
            .request_redemption(BATCH_ID_1, 1, DELIVERY_ADDRESS, &chain)
            .await
            .unwrap_err();
        assert!(matches!(
            error,
            FlowError::EventNotFound { event: "RedemptionRequested", .. }
        ));
    }

    #[tokio::test]
    async fn test_request_event_from_other_contract_is_ignored() {
        let client = fast_client();
        let chain = MockChain::default();
        let address = client.address(ContractName::Redemption).unwrap();
        chain.on_send(address, |tx| {
            vec![encode_event(
                Address::repeat_byte(0xee),
                &IRedemption::RedemptionRequested {
                    redemptionId: U256::from(1u64),
                    consumer: tx.from,
                    batchId: U256::from(BATCH_ID_1),
                    quantity: U256::from(1u64),
                    deliveryAddress: DELIVERY_ADDRESS.to_string(),
                },
            )]
        });

        let error = client
            .request_redemption(BATCH_ID_1, 1, DELIVERY_ADDRESS, &chain)
            .await
            .unwrap_err();
        assert!(matches!(error, FlowError::EventNotFound { .. }));
    }

    #[tokio::test]
    async fn test_request_rejects_bad_input() {
        let client = fast_client();
        let chain = MockChain::default();
        assert!(matches!(
            client.request_redemption(BATCH_ID_1, 0, DELIVERY_ADDRESS, &chain).await,
            Err(FlowError::InvalidInput(_))
        ));
        assert!(matches!(
            client.request_redemption(BATCH_ID_1, 1, "  ", &chain).await,
            Err(FlowError::InvalidInput(_))
        ));
    }

    #[tokio::test]
    async fn test_update_status() {
        let client = fast_client();
        let chain = MockChain::default();
        stub_status(&client, &chain, 0);
        emit_status_updates(&client, &chain);

        let change = client
            .update_redemption_status(5, RedemptionStatus::Processing, &chain)
            .await
            .unwrap();
        assert_eq!(change.redemption_id, 5);
        assert_eq!(change.previous, RedemptionStatus::Requested);
        assert_eq!(change.status, RedemptionStatus::Processing);
    }

    #[tokio::test]
    async fn test_status_update_for_another_redemption_is_ignored() {
        let client = fast_client();
        let chain = MockChain::default();
        stub_status(&client, &chain, 0);
        let address = client.address(ContractName::Redemption).unwrap();
        chain.on_send(address, move |tx| {
            let call = IRedemption::updateRedemptionStatusCall::abi_decode(&tx.data).unwrap();
            vec![encode_event(
                address,
                &IRedemption::RedemptionStatusUpdated {
                    redemptionId: call.redemptionId + U256::from(1u64),
                    status: call.status,
                },
            )]
        });

        let error = client
            .update_redemption_status(5, RedemptionStatus::Processing, &chain)
            .await
            .unwrap_err();
        assert!(matches!(
            error,
            FlowError::EventNotFound { event: "RedemptionStatusUpdated", .. }
        ));
        assert_eq!(chain.sent().len(), 1);
    }

    #[tokio::test]
    async fn test_status_update_matches_on_redemption_id() {
        let client = fast_client();
        let chain = MockChain::default();
        stub_status(&client, &chain, 0);
        let address = client.address(ContractName::Redemption).unwrap();
        chain.on_send(address, move |tx| {
            let call = IRedemption::updateRedemptionStatusCall::abi_decode(&tx.data).unwrap();
            let other = IRedemption::RedemptionStatusUpdated {
                redemptionId: U256::from(99u64),
                status: 3,
            };
            let own = IRedemption::RedemptionStatusUpdated {
                redemptionId: call.redemptionId,
                status: call.status,
            };
            vec![encode_event(address, &other), encode_event(address, &own)]
        });

        let change = client
            .update_redemption_status(5, RedemptionStatus::Processing, &chain)
            .await
            .unwrap();
        assert_eq!(change.redemption_id, 5);
        assert_eq!(change.status, RedemptionStatus::Processing);
    }

    #[tokio::test]
    async fn test_cancel_redemption() {
        let client = fast_client();
        let chain = MockChain::default();
        stub_status(&client, &chain, 1);
        emit_status_updates(&client, &chain);

        let change = client.cancel_redemption(5, &chain).await.unwrap();
        assert_eq!(change.previous, RedemptionStatus::Processing);
        assert_eq!(change.status, RedemptionStatus::Cancelled);
    }

    #[tokio::test]
    async fn test_invalid_transition_is_not_sent() {
        let client = fast_client();
        let chain = MockChain::default();
        stub_status(&client, &chain, 2);

        let error = client.cancel_redemption(5, &chain).await.unwrap_err();
        assert!(matches!(
            error,
            FlowError::InvalidTransition {
                from: RedemptionStatus::Fulfilled,
                to: RedemptionStatus::Cancelled
            }
        ));
        assert!(chain.sent().is_empty());

        let error = client
            .update_redemption_status(5, RedemptionStatus::Unknown, &chain)
            .await
            .unwrap_err();
        assert!(matches!(error, FlowError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_update_unknown_redemption() {
        let client = fast_client();
        let chain = MockChain::default();
        let address = client.address(ContractName::Redemption).unwrap();
        chain.fail_call::<IRedemption::getRedemptionDetailsCall>(
            address,
            ProviderError::Reverted { reason: None },
        );

        let error = client.cancel_redemption(77, &chain).await.unwrap_err();
        assert!(matches!(error, FlowError::RedemptionNotFound(77)));
    }
}
