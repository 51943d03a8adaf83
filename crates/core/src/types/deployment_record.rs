use eyre::Result;
use serde::{Deserialize, Serialize};
use std::fs;

use super::deployment::DeploymentResult;

/// On-disk form of a deployment, written by the CLI so the generated key
/// survives the process. Contains the private key in clear text.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct DeploymentRecord {
    pub network_id: u64,
    pub kind: String,
    pub token_address: String,
    pub tx_hash: String,
    pub generated_address: String,
    pub generated_private_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contract_address: Option<String>,
}

impl DeploymentRecord {
    pub fn new(network_id: u64, token_address: String, result: &DeploymentResult) -> Self {
        Self {
            network_id,
            kind: result.kind().as_str().to_string(),
            token_address,
            tx_hash: result.transaction_hash().to_string(),
            generated_address: result.generated_address().to_string(),
            generated_private_key: result.generated_private_key(),
            contract_address: None,
        }
    }

    pub fn from_file(file_path: &str) -> Result<Self> {
        let file_content = fs::read_to_string(file_path)?;
        let record: DeploymentRecord = serde_json::from_str(&file_content)?;
        Ok(record)
    }

    pub fn to_file(&self, file_path: &str) -> Result<()> {
        fs::write(file_path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}
