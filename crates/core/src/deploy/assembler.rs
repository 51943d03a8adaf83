use alloy::primitives::TxHash;

use crate::errors::DeployError;
use crate::types::deployment::{ContractKind, DeploymentResult};
use crate::types::keypair::DeploymentKeypair;

/// Collects the pieces of a `DeploymentResult` as the pipeline produces them.
pub(crate) struct ResultAssembler {
    kind: ContractKind,
    keypair: Option<DeploymentKeypair>,
    transaction_hash: Option<TxHash>,
}

impl ResultAssembler {
    pub(crate) fn new(kind: ContractKind) -> Self {
        Self {
            kind,
            keypair: None,
            transaction_hash: None,
        }
    }

    pub(crate) fn keypair(mut self, keypair: DeploymentKeypair) -> Self {
        self.keypair = Some(keypair);
        self
    }

    pub(crate) fn transaction_hash(mut self, transaction_hash: TxHash) -> Self {
        self.transaction_hash = Some(transaction_hash);
        self
    }

    pub(crate) fn assemble(self) -> Result<DeploymentResult, DeployError> {
        let transaction_hash = self
            .transaction_hash
            .filter(|hash| !hash.is_zero())
            .ok_or(DeployError::IncompleteResult("transaction hash"))?;
        let keypair = self
            .keypair
            .ok_or(DeployError::IncompleteResult("generated keypair"))?;
        Ok(DeploymentResult::new(self.kind, transaction_hash, keypair))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::keypair::{KeypairGenerator, RandomKeypairGenerator};

    #[test]
    fn test_assembles_complete_result() {
        let keypair = RandomKeypairGenerator.generate();
        let address = keypair.address();
        let result = ResultAssembler::new(ContractKind::Airdrop)
            .keypair(keypair)
            .transaction_hash(TxHash::with_last_byte(0xa))
            .assemble()
            .unwrap();

        assert_eq!(result.kind(), ContractKind::Airdrop);
        assert_eq!(result.transaction_hash(), TxHash::with_last_byte(0xa));
        assert_eq!(result.generated_address(), address);
        assert_eq!(result.describe()["transit_address"], address.to_string());
    }

    #[test]
    fn test_missing_fields_are_reported() {
        let err = ResultAssembler::new(ContractKind::NftLinkdrop)
            .keypair(RandomKeypairGenerator.generate())
            .assemble()
            .unwrap_err();
        assert!(matches!(err, DeployError::IncompleteResult("transaction hash")));

        let err = ResultAssembler::new(ContractKind::NftLinkdrop)
            .transaction_hash(TxHash::with_last_byte(0xa))
            .assemble()
            .unwrap_err();
        assert!(matches!(err, DeployError::IncompleteResult("generated keypair")));

        let err = ResultAssembler::new(ContractKind::NftLinkdrop)
            .keypair(RandomKeypairGenerator.generate())
            .transaction_hash(TxHash::ZERO)
            .assemble()
            .unwrap_err();
        assert!(matches!(err, DeployError::IncompleteResult("transaction hash")));
    }
}
