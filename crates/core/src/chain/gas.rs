use alloy::providers::Provider;
use alloy::rpc::types::TransactionRequest;
use async_trait::async_trait;
use std::collections::HashMap;

use crate::actions::contract_creation::ContractCreation;
use crate::errors::DeployError;
use crate::types::deployment::ContractKind;

/// Gas used for a deployment when nothing better is known.
pub const DEFAULT_GAS_ESTIMATE: u64 = 1_600_000;
/// Headroom added on top of every estimate.
pub const GAS_BUFFER: u64 = 100_000;

#[async_trait]
pub trait GasEstimator: Send + Sync {
    /// Gas limit to attach to `creation`.
    async fn estimate(&self, creation: &ContractCreation) -> Result<u64, DeployError>;
}

#[async_trait]
impl<G: GasEstimator + ?Sized> GasEstimator for Box<G> {
    async fn estimate(&self, creation: &ContractCreation) -> Result<u64, DeployError> {
        (**self).estimate(creation).await
    }
}

/// Fixed gas limits, optionally different per contract kind.
#[derive(Debug, Clone, Default)]
pub struct ConstantGasEstimator {
    overrides: HashMap<ContractKind, u64>,
}

impl ConstantGasEstimator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_gas_limit(mut self, kind: ContractKind, gas_limit: u64) -> Self {
        self.overrides.insert(kind, gas_limit);
        self
    }

    pub fn gas_limit(&self, kind: ContractKind) -> u64 {
        self.overrides
            .get(&kind)
            .copied()
            .unwrap_or(DEFAULT_GAS_ESTIMATE + GAS_BUFFER)
    }
}

#[async_trait]
impl GasEstimator for ConstantGasEstimator {
    async fn estimate(&self, creation: &ContractCreation) -> Result<u64, DeployError> {
        Ok(self.gas_limit(creation.kind()))
    }
}

/// Asks the node with `eth_estimateGas` and adds a buffer.
pub struct ProviderGasEstimator<P> {
    provider: P,
    buffer: u64,
}

impl<P> ProviderGasEstimator<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            buffer: GAS_BUFFER,
        }
    }

    pub fn with_buffer(mut self, buffer: u64) -> Self {
        self.buffer = buffer;
        self
    }
}

#[async_trait]
impl<P> GasEstimator for ProviderGasEstimator<P>
where
    P: Provider + Send + Sync,
{
    async fn estimate(&self, creation: &ContractCreation) -> Result<u64, DeployError> {
        let request = <TransactionRequest as From<&ContractCreation>>::from(creation);
        let estimate = self
            .provider
            .estimate_gas(&request)
            .await
            .map_err(|e| DeployError::GasEstimation(Box::new(e)))?;
        Ok(estimate.saturating_add(self.buffer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::{Address, Bytes, U256};

    fn creation(kind: ContractKind) -> ContractCreation {
        ContractCreation::new(kind, Address::ZERO, Bytes::new(), Bytes::new(), U256::ZERO)
    }

    #[tokio::test]
    async fn test_constant_estimate_defaults_to_fixed_limit() {
        let estimator = ConstantGasEstimator::new();
        assert_eq!(
            estimator.estimate(&creation(ContractKind::Airdrop)).await.unwrap(),
            1_700_000
        );
        assert_eq!(
            estimator
                .estimate(&creation(ContractKind::NftLinkdrop))
                .await
                .unwrap(),
            1_700_000
        );
    }

    #[tokio::test]
    async fn test_constant_estimate_per_kind_override() {
        let estimator: Box<dyn GasEstimator> = Box::new(
            ConstantGasEstimator::new().with_gas_limit(ContractKind::NftLinkdrop, 3_000_000),
        );
        assert_eq!(
            estimator
                .estimate(&creation(ContractKind::NftLinkdrop))
                .await
                .unwrap(),
            3_000_000
        );
        assert_eq!(
            estimator.estimate(&creation(ContractKind::Airdrop)).await.unwrap(),
            1_700_000
        );
    }
}
