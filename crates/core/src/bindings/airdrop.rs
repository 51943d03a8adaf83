use alloy::sol;

sol! {
    contract Airdrop {
        constructor(
            address tokenAddress,
            uint256 claimAmount,
            uint256 referralAmount,
            uint256 claimAmountEth,
            address airdropTransit
        );
    }
}
