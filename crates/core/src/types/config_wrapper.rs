use alloy::primitives::Bytes;
use eyre::{Result, eyre};
use std::path::{Path, PathBuf};
use std::{env, fs};
use toml::Value;

use super::deployment::ContractKind;

pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

pub struct ConfigWrapper {
    raw_config: Value,
    /// Directory relative artifact paths are resolved against.
    base_dir: PathBuf,
}

impl ConfigWrapper {
    pub fn new(raw_config: Value) -> Self {
        Self {
            raw_config,
            base_dir: PathBuf::new(),
        }
    }

    /// Loads `path`, or `config.toml` in the working directory. Artifact
    /// paths in the file are relative to the file itself.
    pub fn from_file(path: Option<&str>) -> Result<Self> {
        let path = Path::new(path.unwrap_or(DEFAULT_CONFIG_PATH));
        let content = fs::read_to_string(path)
            .map_err(|e| eyre!("Failed to read config {}: {}", path.display(), e))?;
        let raw_config = content
            .parse::<Value>()
            .map_err(|e| eyre!("Invalid config {}: {}", path.display(), e))?;

        Ok(Self {
            raw_config,
            base_dir: path.parent().map(Path::to_path_buf).unwrap_or_default(),
        })
    }

    pub fn get_rpc_url(&self, network_id: u64) -> Result<String> {
        let url_str = self
            .raw_config
            .get("rpc_endpoints")
            .and_then(|r| r.get(&network_id.to_string()))
            .and_then(|u| u.as_str())
            .ok_or_else(|| eyre!("URL not found for network_id: {}", network_id))?;

        if let Some(env_var) = url_str.strip_prefix("env:") {
            env::var(env_var).map_err(|_| eyre!("Environment variable {} not set", env_var))
        } else {
            Ok(url_str.to_string())
        }
    }

    pub fn get_block_explorer_url(&self, network_id: u64) -> Result<String> {
        let url_str = self
            .raw_config
            .get("block_explorers")
            .and_then(|b| b.get(&network_id.to_string()))
            .and_then(|u| u.as_str())
            .ok_or_else(|| {
                eyre!(
                    "Block explorer URL not found for network_id: {}",
                    network_id
                )
            })?;

        Ok(url_str.trim_end_matches('/').to_string())
    }

    pub fn get_artifact_path(&self, kind: ContractKind) -> Result<PathBuf> {
        let path = self
            .raw_config
            .get("artifacts")
            .and_then(|a| a.get(kind.as_str()))
            .and_then(|p| p.as_str())
            .ok_or_else(|| eyre!("Artifact path not found for contract: {}", kind))?;

        // Absolute paths replace the base on join.
        Ok(self.base_dir.join(path))
    }

    /// Reads the creation bytecode for `kind` from the configured hex file.
    pub fn load_creation_code(&self, kind: ContractKind) -> Result<Bytes> {
        let path = self.get_artifact_path(kind)?;
        let content = fs::read_to_string(&path)
            .map_err(|e| eyre!("Failed to read artifact {}: {}", path.display(), e))?;
        parse_creation_code(&content).map_err(|e| eyre!("{}: {}", path.display(), e))
    }

    /// Constant gas limit for `kind` on `network_id`, if one is configured.
    pub fn get_gas_limit(&self, network_id: u64, kind: ContractKind) -> Result<Option<u64>> {
        // Try network specific value first
        let value = self
            .raw_config
            .get("gas")
            .and_then(|g| g.get(&network_id.to_string()))
            .and_then(|g| g.get(kind.as_str()))
            .or_else(|| {
                // Fallback to default if network specific not found
                self.raw_config
                    .get("gas")
                    .and_then(|g| g.get("default"))
                    .and_then(|g| g.get(kind.as_str()))
            });

        match value {
            None => Ok(None),
            Some(v) => {
                let gas = v
                    .as_integer()
                    .filter(|gas| *gas > 0)
                    .ok_or_else(|| eyre!("Gas limit for {} must be a positive integer", kind))?;
                Ok(Some(gas as u64))
            }
        }
    }
}

fn parse_creation_code(content: &str) -> Result<Bytes> {
    let trimmed = content.trim();
    let hex_str = trimmed.strip_prefix("0x").unwrap_or(trimmed);
    if hex_str.is_empty() {
        return Err(eyre!("creation code is empty"));
    }
    Ok(Bytes::from(hex::decode(hex_str)?))
}
