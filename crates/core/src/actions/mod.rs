pub mod contract_creation;
