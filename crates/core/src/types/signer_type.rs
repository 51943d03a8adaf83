use alloy::network::EthereumWallet;
use alloy::primitives::Address;
use alloy::signers::Signer;
use alloy::signers::ledger::{HDPath, LedgerSigner};
use alloy::signers::local::PrivateKeySigner;
use alloy::signers::trezor::{TrezorHDPath, TrezorSigner};
use dotenv::dotenv;
use eyre::{Result, eyre};
use log::info;
use std::env;

/// Env var holding the deployer key when no hardware wallet is used.
pub const PRIVATE_KEY_ENV: &str = "DEPLOYER_PRIVATE_KEY";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HardwareWalletType {
    TREZOR,
    LEDGER,
}

/// Builds the wallet that signs and pays for deployments, returning it with
/// its sender address.
pub async fn build_wallet(
    hardware: Option<HardwareWalletType>,
    chain_id: u64,
) -> Result<(EthereumWallet, Address)> {
    match hardware {
        Some(HardwareWalletType::LEDGER) => {
            let signer = LedgerSigner::new(HDPath::LedgerLive(0), Some(chain_id)).await?;
            let address = Signer::address(&signer);
            info!("Using Ledger account {}", address);
            Ok((EthereumWallet::from(signer), address))
        }
        Some(HardwareWalletType::TREZOR) => {
            let signer = TrezorSigner::new(TrezorHDPath::TrezorLive(0), Some(chain_id)).await?;
            let address = Signer::address(&signer);
            info!("Using Trezor account {}", address);
            Ok((EthereumWallet::from(signer), address))
        }
        None => {
            dotenv().ok(); // Load environment variables from .env file
            let raw = env::var(PRIVATE_KEY_ENV).map_err(|_| {
                eyre!(
                    "Environment variable {} not set (or use --ledger / --trezor)",
                    PRIVATE_KEY_ENV
                )
            })?;
            let signer = local_signer(&raw, chain_id)?;
            let address = signer.address();
            info!("Using local account {}", address);
            Ok((EthereumWallet::from(signer), address))
        }
    }
}

fn local_signer(raw: &str, chain_id: u64) -> Result<PrivateKeySigner> {
    let signer: PrivateKeySigner = raw
        .trim()
        .parse()
        .map_err(|_| eyre!("{} is not a valid private key", PRIVATE_KEY_ENV))?;
    Ok(signer.with_chain_id(Some(chain_id)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::address;

    #[test]
    fn test_local_signer_from_hex() {
        let signer = local_signer(
            " 0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80\n",
            11155111,
        )
        .unwrap();
        assert_eq!(
            signer.address(),
            address!("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266")
        );
        assert_eq!(signer.chain_id(), Some(11155111));
    }

    #[test]
    fn test_local_signer_rejects_garbage() {
        let err = local_signer("not-a-key", 1).unwrap_err();
        // The raw value must not leak into the message.
        assert!(!err.to_string().contains("not-a-key"));
    }
}
