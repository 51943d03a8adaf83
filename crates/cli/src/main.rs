use alloy::primitives::Address;
use alloy::providers::ProviderBuilder;
use clap::{Args, Parser, Subcommand};
use env_logger::Env;
use eyre::{Result, eyre};
use linkdrop_core::{
    AirdropRequest, AlloyChainClient, ConstantGasEstimator, CreationCodes, DeployError,
    DeploymentRequest, DeploymentResult, GasEstimator, HardwareWalletType, LinkdropDeployer,
    MinedCallback, NftLinkdropRequest, ProviderGasEstimator, build_wallet,
    types::{config_wrapper::ConfigWrapper, deployment_record::DeploymentRecord},
    utils::units::parse_decimals,
};
use log::info;
use std::fs;
use std::path::Path;
use tokio::sync::oneshot;

const OUTPUT_DIR: &str = "output";

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct DeployArgs {
    /// Network ID
    #[arg(long = "network", short = 'n')]
    network_id: u64,

    /// Path to the config file (defaults to config.toml)
    #[arg(long = "config", short = 'c')]
    config: Option<String>,

    /// Ask the node for a gas estimate instead of using the configured limit
    #[arg(long = "estimate-gas")]
    estimate_gas: bool,

    /// Wait for the deployment to be mined
    #[arg(long = "wait", short = 'w')]
    wait: bool,

    /// Use Trezor hardware wallet
    #[arg(long = "trezor", short = 't', conflicts_with = "ledger")]
    trezor: bool,

    /// Use Ledger hardware wallet
    #[arg(long = "ledger", short = 'l', conflicts_with = "trezor")]
    ledger: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Deploy a token airdrop contract
    DeployAirdrop {
        #[command(flatten)]
        deploy: DeployArgs,

        /// Token to distribute
        #[arg(long = "token")]
        token: Address,

        /// Tokens per claim, in whole units
        #[arg(long = "claim-amount")]
        claim_amount: String,

        /// Tokens per referral, in whole units
        #[arg(long = "referral-amount", default_value = "0")]
        referral_amount: String,

        /// Token decimals
        #[arg(long = "decimals", value_parser = parse_decimals)]
        decimals: u8,

        /// Native currency per claim, in ether
        #[arg(long = "claim-amount-eth", default_value = "0")]
        claim_amount_eth: String,

        /// Number of claim links to fund
        #[arg(long = "links")]
        links_number: u64,

        /// Badge contract associated with the campaign
        #[arg(long = "badge")]
        badge: Option<Address>,
    },
    /// Deploy an NFT linkdrop contract
    DeployNftLinkdrop {
        #[command(flatten)]
        deploy: DeployArgs,

        /// NFT collection to distribute
        #[arg(long = "token")]
        token: Address,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::DeployAirdrop {
            deploy,
            token,
            claim_amount,
            referral_amount,
            decimals,
            claim_amount_eth,
            links_number,
            badge,
        } => {
            let mut request =
                AirdropRequest::new(token, claim_amount, decimals, claim_amount_eth, links_number)
                    .with_referral_amount(referral_amount);
            if let Some(badge) = badge {
                request = request.with_badge_address(badge);
            }
            run_deployment(deploy, request.into()).await?;
        }
        Commands::DeployNftLinkdrop { deploy, token } => {
            run_deployment(deploy, NftLinkdropRequest::new(token).into()).await?;
        }
    }

    Ok(())
}

async fn run_deployment(args: DeployArgs, request: DeploymentRequest) -> Result<()> {
    let cw = ConfigWrapper::from_file(args.config.as_deref())?;
    let network_id = args.network_id;
    let kind = request.kind();
    let token = request.token_address();

    let hardware = match (args.trezor, args.ledger) {
        (true, _) => Some(HardwareWalletType::TREZOR),
        (_, true) => Some(HardwareWalletType::LEDGER),
        _ => None,
    };
    let (wallet, sender) = build_wallet(hardware, network_id).await?;
    let provider = ProviderBuilder::new()
        .wallet(wallet)
        .on_builtin(&cw.get_rpc_url(network_id)?)
        .await?;

    let gas: Box<dyn GasEstimator> = if args.estimate_gas {
        Box::new(ProviderGasEstimator::new(provider.clone()))
    } else {
        let estimator = match cw.get_gas_limit(network_id, kind)? {
            Some(gas_limit) => ConstantGasEstimator::new().with_gas_limit(kind, gas_limit),
            None => ConstantGasEstimator::new(),
        };
        Box::new(estimator)
    };

    let creation_codes =
        CreationCodes::new().with_creation_code(kind, cw.load_creation_code(kind)?);
    let deployer = LinkdropDeployer::new(AlloyChainClient::new(provider, sender), creation_codes)
        .with_gas_estimator(gas);

    // Fail before anything is sent if the generated key could not be saved.
    ensure_writable_dir(Path::new(OUTPUT_DIR))?;

    let (on_mined, mined_rx) = ContractWaiter::new();
    let result = deployer.deploy(request, Box::new(on_mined)).await?;

    // The record holds the generated private key; it only goes to disk.
    let record_path = format!("{}/{}_{}.json", OUTPUT_DIR, kind, result.transaction_hash());
    let mut record = DeploymentRecord::new(network_id, token.to_string(), &result);
    save_record(&record, &record_path)?;

    let explorer = cw.get_block_explorer_url(network_id).ok();
    print_deployment_summary(network_id, &result, &record_path, explorer.as_deref())?;

    if args.wait {
        info!("Waiting for {} to be mined", result.transaction_hash());
        let contract_address = mined_rx
            .await
            .map_err(|_| {
                eyre!(
                    "Stopped tracking deployment {} before it was mined",
                    result.transaction_hash()
                )
            })??;
        record.contract_address = Some(contract_address.to_string());
        save_record(&record, &record_path)?;

        println!("\n## Contract");
        match &explorer {
            Some(url) => println!("- [{}]({}/address/{})", contract_address, url, contract_address),
            None => println!("`{}`", contract_address),
        }
    }

    Ok(())
}

/// Forwards the mined address, or the failure reported after broadcast, to
/// whoever waits on the paired receiver.
struct ContractWaiter(Option<oneshot::Sender<Result<Address, DeployError>>>);

impl ContractWaiter {
    fn new() -> (Self, oneshot::Receiver<Result<Address, DeployError>>) {
        let (tx, rx) = oneshot::channel();
        (Self(Some(tx)), rx)
    }

    fn send(&mut self, outcome: Result<Address, DeployError>) {
        if let Some(tx) = self.0.take() {
            let _ = tx.send(outcome);
        }
    }
}

impl MinedCallback for ContractWaiter {
    fn on_mined(&mut self, contract_address: Address) {
        self.send(Ok(contract_address));
    }

    fn on_late_failure(&mut self, error: DeployError) {
        self.send(Err(error));
    }
}

fn ensure_writable_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)
        .map_err(|e| eyre!("Cannot create output directory {}: {}", dir.display(), e))?;
    let check = dir.join(".write-check");
    fs::write(&check, b"")
        .and_then(|_| fs::remove_file(&check))
        .map_err(|e| eyre!("Output directory {} is not writable: {}", dir.display(), e))
}

/// Writes the record. The transaction is already out at this point, so on
/// failure the key goes to stderr and into the error rather than being lost.
fn save_record(record: &DeploymentRecord, path: &str) -> Result<()> {
    record.to_file(path).map_err(|e| {
        eprintln!(
            "Could not write {}. Generated address {} private key {}",
            path, record.generated_address, record.generated_private_key
        );
        eyre!(
            "Failed to save deployment record {}: {} (generated address {}, private key {})",
            path,
            e,
            record.generated_address,
            record.generated_private_key
        )
    })
}

fn print_deployment_summary(
    network_id: u64,
    result: &DeploymentResult,
    record_path: &str,
    explorer: Option<&str>,
) -> Result<()> {
    println!("\n# {} Deployment (Network: {})", result.kind(), network_id);
    println!("\n## Result");
    println!("```json");
    println!("{}", serde_json::to_string_pretty(&result.describe())?);
    println!("```");

    println!("\n## Keys");
    println!("Generated private key saved to `{}`", record_path);

    println!("\n## Links");
    match explorer {
        Some(url) => println!(
            "- [Deployment Transaction]({}/tx/{})",
            url,
            result.transaction_hash()
        ),
        None => println!("- Deployment Transaction `{}`", result.transaction_hash()),
    }

    Ok(())
}
