pub mod actions;
pub mod bindings;
pub mod chain;
pub mod deploy;
pub mod errors;
pub mod types;
pub mod utils;

pub use chain::alloy_client::AlloyChainClient;
pub use chain::gas::{ConstantGasEstimator, GasEstimator, ProviderGasEstimator};
pub use chain::{ChainClient, DeploymentNotice};
pub use deploy::{CreationCodes, LinkdropDeployer, MinedCallback};
pub use errors::DeployError;
pub use types::deployment::{
    AirdropRequest, ContractKind, DeploymentRequest, DeploymentResult, NftLinkdropRequest,
    TransactionLifecycle,
};
pub use types::keypair::{DeploymentKeypair, KeypairGenerator, RandomKeypairGenerator};
pub use types::signer_type::{HardwareWalletType, build_wallet};
