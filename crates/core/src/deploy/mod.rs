//! Deployment pipeline: generate a keypair, normalize the request into
//! constructor arguments, submit the creation transaction and return as soon
//! as it is broadcast. The mined address arrives later through a
//! `MinedCallback`.

pub(crate) mod assembler;
pub mod normalizer;
pub(crate) mod tracker;

pub use tracker::MinedCallback;

use alloy::primitives::Bytes;
use log::{debug, info};
use std::collections::HashMap;
use uuid::Uuid;

use crate::actions::contract_creation::ContractCreation;
use crate::chain::ChainClient;
use crate::chain::gas::{ConstantGasEstimator, GasEstimator};
use crate::errors::DeployError;
use crate::types::deployment::{
    AirdropRequest, ContractKind, DeploymentRequest, DeploymentResult, NftLinkdropRequest,
};
use crate::types::keypair::{KeypairGenerator, RandomKeypairGenerator};
use assembler::ResultAssembler;
use normalizer::normalize;
use tracker::LifecycleTracker;

/// Compiled creation bytecode per contract kind.
#[derive(Debug, Clone, Default)]
pub struct CreationCodes {
    codes: HashMap<ContractKind, Bytes>,
}

impl CreationCodes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_creation_code(mut self, kind: ContractKind, code: Bytes) -> Self {
        self.codes.insert(kind, code);
        self
    }

    pub fn get(&self, kind: ContractKind) -> Result<&Bytes, DeployError> {
        self.codes
            .get(&kind)
            .ok_or(DeployError::MissingCreationCode(kind))
    }
}

pub struct LinkdropDeployer<C, G = ConstantGasEstimator, K = RandomKeypairGenerator> {
    client: C,
    gas: G,
    keypairs: K,
    creation_codes: CreationCodes,
}

impl<C: ChainClient> LinkdropDeployer<C> {
    pub fn new(client: C, creation_codes: CreationCodes) -> Self {
        Self {
            client,
            gas: ConstantGasEstimator::new(),
            keypairs: RandomKeypairGenerator,
            creation_codes,
        }
    }
}

impl<C, G, K> LinkdropDeployer<C, G, K> {
    pub fn with_gas_estimator<E: GasEstimator>(self, gas: E) -> LinkdropDeployer<C, E, K> {
        LinkdropDeployer {
            client: self.client,
            gas,
            keypairs: self.keypairs,
            creation_codes: self.creation_codes,
        }
    }

    pub fn with_keypair_generator<R: KeypairGenerator>(
        self,
        keypairs: R,
    ) -> LinkdropDeployer<C, G, R> {
        LinkdropDeployer {
            client: self.client,
            gas: self.gas,
            keypairs,
            creation_codes: self.creation_codes,
        }
    }

    pub fn client(&self) -> &C {
        &self.client
    }
}

impl<C, G, K> LinkdropDeployer<C, G, K>
where
    C: ChainClient,
    G: GasEstimator,
    K: KeypairGenerator,
{
    /// Deploys a token airdrop funded with `claim_amount_eth` per link.
    ///
    /// Resolves once the creation transaction is broadcast; `on_mined` is
    /// called with the contract address when it is mined.
    pub async fn deploy_contract(
        &self,
        request: AirdropRequest,
        on_mined: impl MinedCallback,
    ) -> Result<DeploymentResult, DeployError> {
        self.deploy(DeploymentRequest::Airdrop(request), Box::new(on_mined))
            .await
    }

    /// Deploys an NFT linkdrop. Sends no value.
    pub async fn deploy_nft_linkdrop_contract(
        &self,
        request: NftLinkdropRequest,
        on_mined: impl MinedCallback,
    ) -> Result<DeploymentResult, DeployError> {
        self.deploy(DeploymentRequest::NftLinkdrop(request), Box::new(on_mined))
            .await
    }

    pub async fn deploy(
        &self,
        request: DeploymentRequest,
        on_mined: Box<dyn MinedCallback>,
    ) -> Result<DeploymentResult, DeployError> {
        let deployment_id = Uuid::new_v4();
        let kind = request.kind();
        info!(
            "[{}] Preparing {} deployment for token {}",
            deployment_id,
            kind,
            request.token_address()
        );
        if let DeploymentRequest::Airdrop(AirdropRequest {
            badge_address: Some(badge),
            ..
        }) = &request
        {
            debug!("[{}] Badge contract {}", deployment_id, badge);
        }

        let keypair = self.keypairs.generate();
        let params = normalize(&request, keypair.address())?;
        let creation_code = self.creation_codes.get(kind)?.clone();

        let creation = ContractCreation::new(
            kind,
            self.client.sender(),
            creation_code,
            params.args.abi_encode(),
            params.value,
        );
        let gas_limit = self.gas.estimate(&creation).await?;
        let creation = creation.with_gas_limit(gas_limit);
        debug!("[{}] {}", deployment_id, creation.describe());

        let (tracker, broadcast) = LifecycleTracker::new(deployment_id, on_mined);
        tracker.spawn(self.client.submit_contract_creation(creation));

        let tx_hash = broadcast.await.map_err(|_| {
            DeployError::DeploymentSubmissionFailed("deployment tracker stopped".into())
        })??;

        let result = ResultAssembler::new(kind)
            .keypair(keypair)
            .transaction_hash(tx_hash)
            .assemble()?;
        info!("[{}] {}", deployment_id, result.describe());
        Ok(result)
    }
}
