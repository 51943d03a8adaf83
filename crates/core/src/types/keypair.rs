use alloy::primitives::{Address, B256};
use alloy::signers::local::PrivateKeySigner;
use std::fmt;

/// Deployment-scoped signing identity. Its address is embedded in the
/// deployed contract; the private key later signs claim links.
///
/// Lives in memory only. Persisting it is up to whoever receives it.
#[derive(Clone)]
pub struct DeploymentKeypair {
    signer: PrivateKeySigner,
}

impl DeploymentKeypair {
    pub fn from_signer(signer: PrivateKeySigner) -> Self {
        Self { signer }
    }

    pub fn address(&self) -> Address {
        self.signer.address()
    }

    pub fn private_key(&self) -> B256 {
        self.signer.to_bytes()
    }

    pub fn private_key_hex(&self) -> String {
        format!("0x{}", hex::encode(self.signer.to_bytes()))
    }
}

// Keeps the key out of `{:?}` output and therefore out of logs.
impl fmt::Debug for DeploymentKeypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeploymentKeypair")
            .field("address", &self.address())
            .field("private_key", &"<redacted>")
            .finish()
    }
}

pub trait KeypairGenerator: Send + Sync {
    fn generate(&self) -> DeploymentKeypair;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct RandomKeypairGenerator;

impl KeypairGenerator for RandomKeypairGenerator {
    fn generate(&self) -> DeploymentKeypair {
        DeploymentKeypair::from_signer(PrivateKeySigner::random())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::address;

    const KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    #[test]
    fn test_keypair_exposes_key_and_address() {
        let keypair = DeploymentKeypair::from_signer(KEY.parse().unwrap());
        assert_eq!(
            keypair.address(),
            address!("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266")
        );
        assert_eq!(keypair.private_key_hex(), KEY);
    }

    #[test]
    fn test_debug_redacts_private_key() {
        let keypair = DeploymentKeypair::from_signer(KEY.parse().unwrap());
        let debug = format!("{:?}", keypair);
        assert!(debug.contains("<redacted>"));
        assert!(!debug.contains(&KEY[2..]));
    }

    #[test]
    fn test_random_generator_gives_fresh_keys() {
        let a = RandomKeypairGenerator.generate();
        let b = RandomKeypairGenerator.generate();
        assert_ne!(a.address(), b.address());
        assert_ne!(a.private_key(), b.private_key());
    }
}
