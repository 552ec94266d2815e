//! Fetch and print the liqz contract account
//!
//! Reads the singleton pool address by default, or the contract account of
//! `--authority`, or any `--address`.

use anyhow::{Context, Result};
use clap::Parser;
use liqz_client::{
    client::LiqzClient,
    config::{parse_cluster, Cluster},
    logging::init_tracing,
    pda,
};
use solana_sdk::pubkey::Pubkey;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "liqz-pool-data", version, about = "Show the liqz contract account")]
struct Cli {
    /// Cluster moniker or `rpc_url[,ws_url]`
    #[arg(long, short = 'u', env = "SOLANA_CLUSTER", default_value = "devnet", value_parser = parse_cluster)]
    cluster: Cluster,

    /// liqz program ID
    #[arg(long, short = 'p', env = "LIQZ_PROGRAM_ADDRESS")]
    program_id: Option<Pubkey>,

    /// Read the contract account derived from this authority
    #[arg(long, conflicts_with = "address")]
    authority: Option<Pubkey>,

    /// Read this account directly
    #[arg(long)]
    address: Option<Pubkey>,

    /// Log filter directive
    #[arg(long, env = "RUST_LOG", default_value = "warn")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    let program_id = cli.program_id.unwrap_or_else(liqz_client::program_id);
    let address = match (cli.address, cli.authority) {
        (Some(address), _) => address,
        (None, Some(authority)) => pda::get_contract_account_pda(&authority, Some(&program_id))?.0,
        (None, None) => pda::get_pool_pda(Some(&program_id))?.0,
    };

    let client = LiqzClient::for_cluster(&cli.cluster, program_id);
    info!(%address, cluster = %cli.cluster, "fetching contract account");
    let account = client
        .get_contract_account(&address)
        .await
        .with_context(|| format!("reading contract account {address}"))?;

    println!("Contract account:  {}", address);
    println!("  Owner:           {}", account.owner);
    println!("  Bump:            {}", account.bump_seed);
    println!("  LIZ mint:        {}", account.liz_mint);
    println!("  TAI mint:        {}", account.tai_mint);
    println!("  DAI mint:        {}", account.dai_mint);
    println!("  Incentive:       {}", account.incentive);
    println!("  Max loan (secs): {}", account.max_loan_duration);
    println!("  Service fee:     {} bp", account.service_fee_rate);
    println!("  Interest rate:   {} bp", account.interest_rate);
    println!("  Mortgage rate:   {} bp", account.mortgage_rate);

    Ok(())
}
