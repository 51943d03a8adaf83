use alloy::sol;

sol! {
    contract LinkdropNFT {
        constructor(address tokenAddress, address verificationAddress);
    }
}
