pub mod airdrop;
pub mod nft_linkdrop;
