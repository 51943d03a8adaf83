use alloy::primitives::{Address, TxHash};
use serde_json::{Value, json};
use std::fmt;

use super::keypair::DeploymentKeypair;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContractKind {
    Airdrop,
    NftLinkdrop,
}

impl ContractKind {
    /// Key used for this kind in config tables and output files.
    pub fn as_str(&self) -> &'static str {
        match self {
            ContractKind::Airdrop => "airdrop",
            ContractKind::NftLinkdrop => "nft_linkdrop",
        }
    }
}

impl fmt::Display for ContractKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Token airdrop deployment. Amounts are human-scale decimal strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AirdropRequest {
    pub token_address: Address,
    pub claim_amount: String,
    pub referral_amount: String,
    pub claim_amount_eth: String,
    pub decimals: u8,
    pub links_number: u64,
    // Not a constructor argument, only reported.
    pub badge_address: Option<Address>,
}

impl AirdropRequest {
    pub fn new(
        token_address: Address,
        claim_amount: impl Into<String>,
        decimals: u8,
        claim_amount_eth: impl Into<String>,
        links_number: u64,
    ) -> Self {
        Self {
            token_address,
            claim_amount: claim_amount.into(),
            referral_amount: "0".to_string(),
            claim_amount_eth: claim_amount_eth.into(),
            decimals,
            links_number,
            badge_address: None,
        }
    }

    pub fn with_referral_amount(mut self, referral_amount: impl Into<String>) -> Self {
        self.referral_amount = referral_amount.into();
        self
    }

    pub fn with_badge_address(mut self, badge_address: Address) -> Self {
        self.badge_address = Some(badge_address);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NftLinkdropRequest {
    pub token_address: Address,
}

impl NftLinkdropRequest {
    pub fn new(token_address: Address) -> Self {
        Self { token_address }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeploymentRequest {
    Airdrop(AirdropRequest),
    NftLinkdrop(NftLinkdropRequest),
}

impl DeploymentRequest {
    pub fn kind(&self) -> ContractKind {
        match self {
            DeploymentRequest::Airdrop(_) => ContractKind::Airdrop,
            DeploymentRequest::NftLinkdrop(_) => ContractKind::NftLinkdrop,
        }
    }

    pub fn token_address(&self) -> Address {
        match self {
            DeploymentRequest::Airdrop(r) => r.token_address,
            DeploymentRequest::NftLinkdrop(r) => r.token_address,
        }
    }
}

impl From<AirdropRequest> for DeploymentRequest {
    fn from(request: AirdropRequest) -> Self {
        DeploymentRequest::Airdrop(request)
    }
}

impl From<NftLinkdropRequest> for DeploymentRequest {
    fn from(request: NftLinkdropRequest) -> Self {
        DeploymentRequest::NftLinkdrop(request)
    }
}

/// Where a submitted deployment is in its life.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionLifecycle {
    Pending,
    Broadcast {
        tx_hash: TxHash,
    },
    Mined {
        tx_hash: TxHash,
        contract_address: Address,
    },
    Failed,
}

impl TransactionLifecycle {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            TransactionLifecycle::Mined { .. } | TransactionLifecycle::Failed
        )
    }
}

/// What a caller gets back once the deployment transaction is broadcast.
///
/// The generated address is the airdrop transit address or the NFT
/// linkdrop verification address, depending on `kind`.
#[derive(Debug, Clone)]
pub struct DeploymentResult {
    kind: ContractKind,
    transaction_hash: TxHash,
    keypair: DeploymentKeypair,
}

impl DeploymentResult {
    pub(crate) fn new(
        kind: ContractKind,
        transaction_hash: TxHash,
        keypair: DeploymentKeypair,
    ) -> Self {
        Self {
            kind,
            transaction_hash,
            keypair,
        }
    }

    pub fn kind(&self) -> ContractKind {
        self.kind
    }

    pub fn transaction_hash(&self) -> TxHash {
        self.transaction_hash
    }

    pub fn generated_address(&self) -> Address {
        self.keypair.address()
    }

    pub fn generated_private_key(&self) -> String {
        self.keypair.private_key_hex()
    }

    /// Summary without secret material.
    pub fn describe(&self) -> Value {
        let address_label = match self.kind {
            ContractKind::Airdrop => "transit_address",
            ContractKind::NftLinkdrop => "verification_address",
        };
        json!({
            "kind": self.kind.as_str(),
            "tx_hash": self.transaction_hash.to_string(),
            address_label: self.generated_address().to_string(),
        })
    }
}
