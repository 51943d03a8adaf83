use alloy::network::{ReceiptResponse, TransactionBuilder};
use alloy::primitives::Address;
use alloy::providers::Provider;
use alloy::rpc::types::TransactionRequest;
use log::{debug, info};
use tokio::sync::mpsc::{self, UnboundedSender};

use super::{ChainClient, DeploymentNotice, Notification, NotificationStream};
use crate::actions::contract_creation::ContractCreation;
use crate::errors::ChainError;

impl From<&ContractCreation> for TransactionRequest {
    fn from(creation: &ContractCreation) -> Self {
        let request = TransactionRequest::default()
            .with_from(creation.from())
            .with_deploy_code(creation.deploy_code())
            .with_value(creation.value());
        match creation.gas_limit() {
            Some(gas_limit) => request.with_gas_limit(gas_limit),
            None => request,
        }
    }
}

/// Chain client backed by an alloy provider whose wallet holds `sender`.
///
/// Each submission reports twice: once when the node accepts the
/// transaction, once when its receipt is available.
pub struct AlloyChainClient<P> {
    provider: P,
    sender: Address,
}

impl<P> AlloyChainClient<P> {
    pub fn new(provider: P, sender: Address) -> Self {
        Self { provider, sender }
    }
}

impl<P> ChainClient for AlloyChainClient<P>
where
    P: Provider + Clone + 'static,
{
    fn sender(&self) -> Address {
        self.sender
    }

    fn submit_contract_creation(&self, creation: ContractCreation) -> NotificationStream {
        let (tx, rx) = mpsc::unbounded_channel();
        let request = <TransactionRequest as From<&ContractCreation>>::from(&creation);
        let provider = self.provider.clone();
        tokio::spawn(async move {
            report_deployment(provider, request, tx).await;
        });
        rx
    }
}

async fn report_deployment<P: Provider>(
    provider: P,
    request: TransactionRequest,
    notifications: UnboundedSender<Notification>,
) {
    let pending = match provider.send_transaction(request).await {
        Ok(pending) => pending,
        Err(e) => {
            let _ = notifications.send(Err(Box::new(e)));
            return;
        }
    };

    let tx_hash = *pending.tx_hash();
    info!("Creation transaction {} sent", tx_hash);
    if notifications
        .send(Ok(DeploymentNotice::broadcast(tx_hash)))
        .is_err()
    {
        debug!("Nobody tracks {} anymore, not waiting for receipt", tx_hash);
        return;
    }

    let outcome: Notification = match pending.get_receipt().await {
        Ok(receipt) if !ReceiptResponse::status(&receipt) => {
            Err(format!("creation transaction {} reverted", tx_hash).into())
        }
        Ok(receipt) => match ReceiptResponse::contract_address(&receipt) {
            Some(address) => Ok(DeploymentNotice::mined(tx_hash, address)),
            None => Err(format!("receipt for {} has no contract address", tx_hash).into()),
        },
        Err(e) => Err(Box::new(e) as ChainError),
    };
    let _ = notifications.send(outcome);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::deployment::ContractKind;
    use alloy::primitives::{Bytes, TxKind, U256, address};

    #[test]
    fn test_creation_request_has_no_recipient() {
        let from = address!("0x5F2F11ad8656439d5C14d9B351f8b09cDaC2A02d");
        let creation = ContractCreation::new(
            ContractKind::Airdrop,
            from,
            Bytes::from(vec![0x60, 0x80]),
            Bytes::from(vec![0x01]),
            U256::from(5u64),
        )
        .with_gas_limit(1_700_000);

        let request = <TransactionRequest as From<&ContractCreation>>::from(&creation);
        assert_eq!(request.from, Some(from));
        assert_eq!(request.to, Some(TxKind::Create));
        assert_eq!(request.value, Some(U256::from(5u64)));
        assert_eq!(request.gas, Some(1_700_000));
        assert_eq!(
            request.input.input(),
            Some(&Bytes::from(vec![0x60, 0x80, 0x01]))
        );
    }

    #[test]
    fn test_request_without_gas_limit_leaves_gas_unset() {
        let creation = ContractCreation::new(
            ContractKind::NftLinkdrop,
            Address::ZERO,
            Bytes::from(vec![0x60]),
            Bytes::new(),
            U256::ZERO,
        );
        assert_eq!(<TransactionRequest as From<&ContractCreation>>::from(&creation).gas, None);
    }
}
