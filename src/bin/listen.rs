//! Log every `CalledInitialize` event emitted by the liqz program
//!
//! The subscription is re-established after the websocket drops.

use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use liqz_client::{
    client::listen_events,
    config::{parse_cluster, Cluster},
    logging::init_tracing,
};
use solana_sdk::pubkey::Pubkey;
use tracing::{error, info};

const RECONNECT_DELAY: Duration = Duration::from_secs(2);

#[derive(Parser, Debug)]
#[command(name = "liqz-listen", version, about = "Listen for liqz program events")]
struct Cli {
    /// Cluster moniker or `rpc_url[,ws_url]`
    #[arg(long, short = 'u', env = "SOLANA_CLUSTER", default_value = "devnet", value_parser = parse_cluster)]
    cluster: Cluster,

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

    let program_id = cli.program_id.unwrap_or_else(liqz_client::program_id);

    loop {
        let run = listen_events(cli.cluster.ws_url(), &program_id, None, |event, slot| {
            info!(slot, account = %event.account, "CalledInitialize");
        });

        tokio::select! {
            result = run => {
                if let Err(err) = result {
                    error!(error = %err, "subscription failed");
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("interrupted");
                return Ok(());
            }
        }

        tokio::time::sleep(RECONNECT_DELAY).await;
    }
}
