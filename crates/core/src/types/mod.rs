pub mod config_wrapper;
pub mod deployment;
pub mod deployment_record;
pub mod keypair;
pub mod signer_type;
