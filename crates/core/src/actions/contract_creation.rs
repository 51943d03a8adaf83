use alloy::primitives::{Address, Bytes, U256};
use serde_json::{Value, json};

use crate::types::deployment::ContractKind;
use crate::utils::units::{NATIVE_DECIMALS, format_atomic};

/// A contract-creation transaction: creation code followed by the ABI-encoded
/// constructor arguments, sent without a `to` address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractCreation {
    kind: ContractKind,
    from: Address,
    creation_code: Bytes,
    constructor_args: Bytes,
    value: U256,
    gas_limit: Option<u64>,
}

impl ContractCreation {
    pub fn new(
        kind: ContractKind,
        from: Address,
        creation_code: Bytes,
        constructor_args: Bytes,
        value: U256,
    ) -> Self {
        Self {
            kind,
            from,
            creation_code,
            constructor_args,
            value,
            gas_limit: None,
        }
    }

    pub fn with_gas_limit(mut self, gas_limit: u64) -> Self {
        self.gas_limit = Some(gas_limit);
        self
    }

    pub fn kind(&self) -> ContractKind {
        self.kind
    }

    pub fn from(&self) -> Address {
        self.from
    }

    pub fn value(&self) -> U256 {
        self.value
    }

    pub fn gas_limit(&self) -> Option<u64> {
        self.gas_limit
    }

    pub fn constructor_args(&self) -> &Bytes {
        &self.constructor_args
    }

    pub fn deploy_code(&self) -> Bytes {
        let mut code = Vec::with_capacity(self.creation_code.len() + self.constructor_args.len());
        code.extend_from_slice(&self.creation_code);
        code.extend_from_slice(&self.constructor_args);
        Bytes::from(code)
    }

    pub fn describe(&self) -> Value {
        json!({
            "action": "ContractCreation",
            "contract": self.kind.as_str(),
            "from": self.from.to_string(),
            "value": self.value.to_string(),
            "value_eth": format_atomic(self.value, NATIVE_DECIMALS),
            "gas": self.gas_limit,
            "constructor_args": self.constructor_args.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::address;

    #[test]
    fn test_deploy_code_appends_constructor_args() {
        let creation = ContractCreation::new(
            ContractKind::NftLinkdrop,
            Address::ZERO,
            Bytes::from(vec![0x60, 0x80]),
            Bytes::from(vec![0x00, 0x01]),
            U256::ZERO,
        );
        assert_eq!(
            creation.deploy_code(),
            Bytes::from(vec![0x60, 0x80, 0x00, 0x01])
        );
        assert_eq!(creation.gas_limit(), None);
    }

    #[test]
    fn test_describe() {
        let creation = ContractCreation::new(
            ContractKind::Airdrop,
            address!("0x5F2F11ad8656439d5C14d9B351f8b09cDaC2A02d"),
            Bytes::from(vec![0x60]),
            Bytes::from(vec![0xab]),
            U256::from(50_000_000_000_000_000u64),
        )
        .with_gas_limit(1_700_000);

        let described = creation.describe();
        assert_eq!(described["action"], "ContractCreation");
        assert_eq!(described["contract"], "airdrop");
        assert_eq!(described["value"], "50000000000000000");
        assert_eq!(described["value_eth"], "0.050000000000000000");
        assert_eq!(described["gas"], 1_700_000);
        assert_eq!(described["constructor_args"], "0xab");
    }
}
