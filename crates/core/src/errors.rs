use thiserror::Error;

use crate::types::deployment::ContractKind;

/// Error reported by a chain client on its notification channel.
pub type ChainError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum DeployError {
    #[error("invalid amount {amount:?}: {reason}")]
    InvalidAmount { amount: String, reason: String },

    #[error("invalid decimals {0:?}: expected an integer between 0 and 77")]
    InvalidDecimals(String),

    #[error("invalid links number {0}: at least one link is required")]
    InvalidLinksNumber(u64),

    #[error("no creation code configured for {0} contract")]
    MissingCreationCode(ContractKind),

    #[error("gas estimation failed: {0}")]
    GasEstimation(#[source] ChainError),

    #[error("deployment submission failed: {0}")]
    DeploymentSubmissionFailed(#[source] ChainError),

    /// The client reported an error after the broadcast result was already
    /// handed to the caller. Only ever delivered through a `MinedCallback`.
    #[error("deployment failed after broadcast: {0}")]
    LateDeploymentFailure(#[source] ChainError),

    #[error("incomplete deployment result: missing {0}")]
    IncompleteResult(&'static str),
}

impl DeployError {
    pub(crate) fn invalid_amount(amount: &str, reason: impl Into<String>) -> Self {
        DeployError::InvalidAmount {
            amount: amount.to_string(),
            reason: reason.into(),
        }
    }

    /// True when the request itself is malformed.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            DeployError::InvalidAmount { .. }
                | DeployError::InvalidDecimals(_)
                | DeployError::InvalidLinksNumber(_)
        )
    }
}
