//! Submit the liqz `initialize` transaction
//!
//! Reads `LIZ_MINT_ADDRESS`, `TAI_MINT_ADDRESS` and `DAI_MINT_ADDRESS`, derives the contract
//! account and its token accounts for the wallet, and sends a single `initialize` call.
//!
//! ```text
//! LIZ_MINT_ADDRESS=... TAI_MINT_ADDRESS=... DAI_MINT_ADDRESS=... \
//!     cargo run --bin liqz-initialize -- --cluster devnet
//! ```

use std::{path::PathBuf, time::Duration};

use anyhow::{Context, Result};
use clap::Parser;
use liqz_client::{
    client::{listen_events, wait_for_initialized, LiqzClient},
    config::{self, parse_cluster, Cluster},
    logging::init_tracing,
    MintSet, SignerSet,
};
use solana_sdk::{pubkey::Pubkey, signature::Keypair, signer::Signer};
use tokio::sync::{mpsc, oneshot};
use tracing::{info, warn};

/// How long to wait for the log subscription before sending anyway
const SUBSCRIBE_TIMEOUT: Duration = Duration::from_secs(10);
/// How long to wait for our own `CalledInitialize` after confirmation
const EVENT_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Parser, Debug)]
#[command(name = "liqz-initialize", version, about = "Initialize the liqz contract account")]
struct Cli {
    /// Cluster moniker or `rpc_url[,ws_url]`
    #[arg(long, short = 'u', env = "SOLANA_CLUSTER", default_value = "devnet", value_parser = parse_cluster)]
    cluster: Cluster,

    /// Wallet keypair paying for the transaction (defaults to ~/.config/solana/id.json)
    #[arg(long, short = 'k', env = "SOLANA_KEYPAIR")]
    keypair: Option<PathBuf>,

    /// liqz program ID
    #[arg(long, short = 'p', env = "LIQZ_PROGRAM_ADDRESS")]
    program_id: Option<Pubkey>,

    /// Log filter directive
    #[arg(long, env = "RUST_LOG", default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    // Configuration errors end the run before any request goes out
    let mints = MintSet::from_env().context("reading mint addresses")?;
    let keypair_path = cli.keypair.unwrap_or_else(config::default_keypair_path);
    let authority = config::load_keypair(&keypair_path)?;
    let program_id = cli.program_id.unwrap_or_else(liqz_client::program_id);

    let client = LiqzClient::for_cluster(&cli.cluster, program_id);
    let (contract_account, bump) = client.get_contract_account_pda(&authority.pubkey())?;

    info!(authority = %authority.pubkey(), "authority");
    info!(%contract_account, bump, "contract account");

    let ws_url = cli.cluster.ws_url().to_string();
    let (ready_tx, ready_rx) = oneshot::channel();
    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let listener = tokio::spawn(async move {
        listen_events(&ws_url, &program_id, Some(ready_tx), move |event, slot| {
            info!(slot, account = %event.account, "Event: {:?}", event);
            let _ = event_tx.send(event);
        })
        .await
    });

    // A failed subscription drops `ready_tx`; the run continues without events
    let subscribed = matches!(
        tokio::time::timeout(SUBSCRIBE_TIMEOUT, ready_rx).await,
        Ok(Ok(()))
    );

    let seed = Keypair::new().pubkey();
    let signers = SignerSet::new(&authority);
    let result = client
        .initialize(&signers, &mints, &seed)
        .await
        .context("initialize transaction failed");

    let signature = match result {
        Ok(signature) => signature,
        Err(err) => {
            listener.abort();
            return Err(err);
        }
    };

    if subscribed {
        wait_for_initialized(&mut event_rx, &contract_account, EVENT_TIMEOUT).await;
    }
    info!(%signature, "Your transaction signature");

    if listener.is_finished() {
        if let Ok(Err(err)) = listener.await {
            warn!(error = %err, "event listener stopped");
        }
    } else {
        listener.abort();
    }
    Ok(())
}
