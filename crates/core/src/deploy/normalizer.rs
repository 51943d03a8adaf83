use alloy::primitives::{Address, Bytes, U256};
use alloy::sol_types::SolConstructor;

use crate::bindings::{airdrop::Airdrop, nft_linkdrop::LinkdropNFT};
use crate::errors::DeployError;
use crate::types::deployment::{
    AirdropRequest, ContractKind, DeploymentRequest, NftLinkdropRequest,
};
use crate::utils::units::{NATIVE_DECIMALS, to_atomic_integer};

/// Constructor arguments in atomic units, one variant per contract.
/// Field order is the constructor's positional order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstructorArgs {
    Airdrop {
        token_address: Address,
        claim_amount_atomic: U256,
        referral_amount_atomic: U256,
        claim_amount_native_atomic: U256,
        transit_address: Address,
    },
    NftLinkdrop {
        token_address: Address,
        verification_address: Address,
    },
}

impl ConstructorArgs {
    pub fn kind(&self) -> ContractKind {
        match self {
            ConstructorArgs::Airdrop { .. } => ContractKind::Airdrop,
            ConstructorArgs::NftLinkdrop { .. } => ContractKind::NftLinkdrop,
        }
    }

    pub fn abi_encode(&self) -> Bytes {
        let encoded = match self {
            ConstructorArgs::Airdrop {
                token_address,
                claim_amount_atomic,
                referral_amount_atomic,
                claim_amount_native_atomic,
                transit_address,
            } => Airdrop::constructorCall {
                tokenAddress: *token_address,
                claimAmount: *claim_amount_atomic,
                referralAmount: *referral_amount_atomic,
                claimAmountEth: *claim_amount_native_atomic,
                airdropTransit: *transit_address,
            }
            .abi_encode(),
            ConstructorArgs::NftLinkdrop {
                token_address,
                verification_address,
            } => LinkdropNFT::constructorCall {
                tokenAddress: *token_address,
                verificationAddress: *verification_address,
            }
            .abi_encode(),
        };
        Bytes::from(encoded)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedParams {
    pub args: ConstructorArgs,
    /// Wei sent along with the creation transaction.
    pub value: U256,
}

pub fn normalize(
    request: &DeploymentRequest,
    signer_address: Address,
) -> Result<NormalizedParams, DeployError> {
    match request {
        DeploymentRequest::Airdrop(r) => normalize_airdrop(r, signer_address),
        DeploymentRequest::NftLinkdrop(r) => Ok(normalize_nft_linkdrop(r, signer_address)),
    }
}

/// Shifts the airdrop amounts into atomic units and funds every link with
/// the native claim amount.
pub fn normalize_airdrop(
    request: &AirdropRequest,
    transit_address: Address,
) -> Result<NormalizedParams, DeployError> {
    if request.links_number == 0 {
        return Err(DeployError::InvalidLinksNumber(request.links_number));
    }

    let claim_amount_atomic = to_atomic_integer(&request.claim_amount, request.decimals)?;
    let referral_amount_atomic = to_atomic_integer(&request.referral_amount, request.decimals)?;
    let claim_amount_native_atomic =
        to_atomic_integer(&request.claim_amount_eth, NATIVE_DECIMALS)?;

    let value = claim_amount_native_atomic
        .checked_mul(U256::from(request.links_number))
        .ok_or_else(|| {
            DeployError::invalid_amount(
                &request.claim_amount_eth,
                format!("funding {} links overflows", request.links_number),
            )
        })?;

    Ok(NormalizedParams {
        args: ConstructorArgs::Airdrop {
            token_address: request.token_address,
            claim_amount_atomic,
            referral_amount_atomic,
            claim_amount_native_atomic,
            transit_address,
        },
        value,
    })
}

pub fn normalize_nft_linkdrop(
    request: &NftLinkdropRequest,
    verification_address: Address,
) -> NormalizedParams {
    NormalizedParams {
        args: ConstructorArgs::NftLinkdrop {
            token_address: request.token_address,
            verification_address,
        },
        value: U256::ZERO,
    }
}
