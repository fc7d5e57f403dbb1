//! `coffee-trace`: command line access to the coffee traceability contracts.
//!
//! Reads need only an RPC endpoint. Writes also need a private key, taken
//! from `--private-key` or `PRIVATE_KEY`. Results are printed as JSON.

use {
    alloy_primitives::Address,
    anyhow::{bail, Context, Result},
    chrono::{NaiveDate, NaiveTime},
    clap::{Parser, Subcommand, ValueEnum},
    coffee_trace::{
        abi::catalog,
        rpc::{RpcChain, RpcSigner},
        ChainReader, CoffeeClient, ContractName, Lookup, PurchaseMode, RedemptionStatus, Settings,
    },
    serde::Serialize,
    std::path::PathBuf,
};

#[derive(Parser, Debug)]
#[command(name = "coffee-trace", version, about = "Coffee traceability chain client")]
struct Cli {
    /// JSON settings file; the built-in network table is used when absent.
    #[arg(long, env = "COFFEE_TRACE_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Chain key, e.g. localhost.
    #[arg(long, global = true)]
    chain: Option<String>,

    /// Overrides the chain's first RPC url.
    #[arg(long, env = "COFFEE_TRACE_RPC_URL", global = true)]
    rpc_url: Option<String>,

    #[arg(long, env = "PRIVATE_KEY", hide_env_values = true, global = true)]
    private_key: Option<String>,

    /// Price token purchases without sending a transaction.
    #[arg(long, global = true)]
    simulate: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List configured chains.
    Chains,

    /// Show the interface of a contract.
    Abi { contract: String },

    /// Show one batch.
    Batch { batch_id: u64 },

    /// List active batch ids.
    Batches,

    /// Batch token balance of an account.
    Balance { account: Address, batch_id: u64 },

    /// Show one redemption.
    Redemption { redemption_id: u64 },

    /// List the redemption ids of a consumer.
    Redemptions { consumer: Address },

    /// Tokens per ETH at the token shop.
    Rate,

    /// Register a new batch. Dates are YYYY-MM-DD.
    CreateBatch {
        production_date: NaiveDate,
        expiry_date: NaiveDate,
        quantity: u64,
    },

    /// Request proof-of-reserve verification and minting of a batch.
    Verify {
        batch_id: u64,
        quantity: u64,
        recipient: Address,
    },

    /// Redeem batch tokens for delivery.
    Redeem {
        batch_id: u64,
        quantity: u64,
        delivery_address: String,
    },

    /// Move a redemption to a new status.
    Status {
        redemption_id: u64,
        #[arg(value_enum)]
        status: StatusArg,
    },

    /// Cancel a redemption.
    Cancel { redemption_id: u64 },

    /// Push a physical inventory count.
    Sync { batch_id: u64, quantity: u64 },

    /// Buy WAGA tokens for an amount of ETH, e.g. 0.01.
    Buy { eth_amount: String },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum StatusArg {
    Processing,
    Fulfilled,
    Cancelled,
}

impl From<StatusArg> for RedemptionStatus {
    fn from(status: StatusArg) -> Self {
        match status {
            StatusArg::Processing => RedemptionStatus::Processing,
            StatusArg::Fulfilled => RedemptionStatus::Fulfilled,
            StatusArg::Cancelled => RedemptionStatus::Cancelled,
        }
    }
}

fn print_json(value: &impl Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn found<T>(lookup: Lookup<T>, what: String) -> Result<T> {
    match lookup {
        Lookup::Found(value) => Ok(value),
        Lookup::NotFound => bail!("{} not found", what),
        Lookup::Unavailable(reason) => bail!("could not read {}: {}", what, reason),
    }
}

fn load_settings(cli: &Cli) -> Result<Settings> {
    let mut settings = match &cli.config {
        Some(path) => Settings::load(path)?,
        None => Settings::builtin()?,
    };
    if let Some(chain) = &cli.chain {
        settings.client.chain = Some(chain.clone());
    }
    if cli.simulate {
        settings.client.purchase_mode = PurchaseMode::Simulated;
    }
    Ok(settings)
}

struct Session {
    client: CoffeeClient,
    rpc_url: String,
    private_key: Option<String>,
}

impl Session {
    fn reader(&self) -> Result<RpcChain> {
        Ok(RpcChain::connect(&self.rpc_url)?)
    }

    fn signer(&self) -> Result<RpcSigner> {
        let key = self
            .private_key
            .as_deref()
            .context("write commands need --private-key or PRIVATE_KEY")?;
        Ok(RpcSigner::connect(&self.rpc_url, key)?)
    }
}

async fn run(command: Command, session: Session) -> Result<()> {
    let client = &session.client;
    match command {
        Command::Chains => print_json(&client.deployment().chains),
        Command::Abi { contract } => {
            let name: ContractName = contract.parse()?;
            print_json(catalog(name))
        }
        Command::Batch { batch_id } => {
            let reader = session.reader()?;
            let batch = client.try_get_batch_info(batch_id, &reader).await;
            print_json(&found(batch, format!("batch {}", batch_id))?)
        }
        Command::Batches => {
            let reader = session.reader()?;
            print_json(&client.try_get_active_batch_ids(&reader).await?)
        }
        Command::Balance { account, batch_id } => {
            let reader = session.reader()?;
            let balance = client.try_get_token_balance(account, batch_id, &reader).await?;
            print_json(&balance.to_string())
        }
        Command::Redemption { redemption_id } => {
            let reader = session.reader()?;
            let redemption = client.try_get_redemption_details(redemption_id, &reader).await;
            print_json(&found(redemption, format!("redemption {}", redemption_id))?)
        }
        Command::Redemptions { consumer } => {
            let reader = session.reader()?;
            print_json(&client.try_get_consumer_redemptions(consumer, &reader).await?)
        }
        Command::Rate => {
            let reader = session.reader().ok();
            let rate = client
                .get_token_shop_rate(reader.as_ref().map(|r| r as &dyn ChainReader))
                .await;
            print_json(&rate)
        }
        Command::CreateBatch {
            production_date,
            expiry_date,
            quantity,
        } => {
            let signer = session.signer()?;
            let creation = client
                .create_batch(
                    production_date.and_time(NaiveTime::MIN).and_utc(),
                    expiry_date.and_time(NaiveTime::MIN).and_utc(),
                    quantity,
                    &signer,
                )
                .await?;
            print_json(&creation)
        }
        Command::Verify {
            batch_id,
            quantity,
            recipient,
        } => {
            let signer = session.signer()?;
            let verification = client
                .verify_and_mint_batch(batch_id, quantity, recipient, &signer)
                .await?;
            print_json(&verification)
        }
        Command::Redeem {
            batch_id,
            quantity,
            delivery_address,
        } => {
            let signer = session.signer()?;
            let request = client
                .request_redemption(batch_id, quantity, &delivery_address, &signer)
                .await?;
            print_json(&request)
        }
        Command::Status {
            redemption_id,
            status,
        } => {
            let signer = session.signer()?;
            let change = client
                .update_redemption_status(redemption_id, status.into(), &signer)
                .await?;
            print_json(&change)
        }
        Command::Cancel { redemption_id } => {
            let signer = session.signer()?;
            print_json(&client.cancel_redemption(redemption_id, &signer).await?)
        }
        Command::Sync { batch_id, quantity } => {
            let signer = session.signer()?;
            print_json(&client.sync_inventory(batch_id, quantity, &signer).await?)
        }
        Command::Buy { eth_amount } => {
            let signer = session.signer()?;
            let purchase = client.buy_waga_tokens(&eth_amount, &signer).await?;
            if let Some(url) = client
                .deployment()
                .chain(client.chain())?
                .explorer_tx_url(&purchase.transaction_hash)
                .filter(|_| !purchase.simulated)
            {
                log::info!("View on explorer: {}", url);
            }
            print_json(&purchase)
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let settings = load_settings(&cli)?;
    let client = CoffeeClient::from_settings(settings)?;
    let rpc_url = match cli.rpc_url {
        Some(url) => url,
        None => client
            .deployment()
            .chain(client.chain())?
            .rpc_url()
            .with_context(|| format!("chain {} has no RPC url", client.chain()))?
            .to_string(),
    };

    let cancel = client.cancellation_token().clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            log::warn!("Interrupted, cancelling");
            cancel.cancel();
        }
    });

    let session = Session {
        client,
        rpc_url,
        private_key: cli.private_key,
    };
    run(cli.command, session).await
}
