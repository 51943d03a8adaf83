//! Boundary to the chain. A client takes one contract creation and reports
//! on it through a notification stream, which may carry one or several
//! messages in any order; the deployer classifies them by content.

pub mod alloy_client;
pub mod gas;
#[cfg(test)]
pub(crate) mod testing;

use alloy::primitives::{Address, TxHash};
use tokio::sync::mpsc;

use crate::actions::contract_creation::ContractCreation;
use crate::errors::ChainError;

/// Payload of a successful notification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeploymentNotice {
    pub transaction_hash: Option<TxHash>,
    pub deployed_address: Option<Address>,
}

impl DeploymentNotice {
    pub fn broadcast(transaction_hash: TxHash) -> Self {
        Self {
            transaction_hash: Some(transaction_hash),
            deployed_address: None,
        }
    }

    pub fn mined(transaction_hash: TxHash, deployed_address: Address) -> Self {
        Self {
            transaction_hash: Some(transaction_hash),
            deployed_address: Some(deployed_address),
        }
    }

    /// The deployed address, if the notice carries a usable one.
    pub fn contract_address(&self) -> Option<Address> {
        self.deployed_address.filter(|address| !address.is_zero())
    }
}

pub type Notification = Result<DeploymentNotice, ChainError>;
pub type NotificationStream = mpsc::UnboundedReceiver<Notification>;

pub trait ChainClient: Send + Sync {
    /// Account the creation transaction is sent from.
    fn sender(&self) -> Address;

    /// Submits a single contract creation. Must not block; progress is
    /// reported on the returned stream.
    fn submit_contract_creation(&self, creation: ContractCreation) -> NotificationStream;
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::{address, b256};

    #[test]
    fn test_zero_address_is_not_a_deployment() {
        let hash = b256!("0x00000000000000000000000000000000000000000000000000000000000000aa");
        assert_eq!(
            DeploymentNotice::mined(hash, Address::ZERO).contract_address(),
            None
        );
        assert_eq!(DeploymentNotice::broadcast(hash).contract_address(), None);

        let deployed = address!("0x00000000000000000000000000000000000000bb");
        assert_eq!(
            DeploymentNotice::mined(hash, deployed).contract_address(),
            Some(deployed)
        );
    }
}
