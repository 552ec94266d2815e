//! Print the addresses `initialize` would use, without touching the network
//!
//! Token accounts are printed for every mint variable that is set. Malformed or
//! shared mints are errors.

use anyhow::Result;
use clap::Parser;
use liqz_client::{config, pda};
use solana_sdk::pubkey::Pubkey;

#[derive(Parser, Debug)]
#[command(name = "liqz-contract-address", version, about = "Derive liqz contract addresses")]
struct Cli {
    /// Authority wallet address
    authority: Pubkey,

    /// liqz program ID
    #[arg(long, short = 'p', env = "LIQZ_PROGRAM_ADDRESS")]
    program_id: Option<Pubkey>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let program_id = cli.program_id.unwrap_or_else(liqz_client::program_id);

    let (contract_account, bump) =
        pda::get_contract_account_pda(&cli.authority, Some(&program_id))?;
    let (pool, pool_bump) = pda::get_pool_pda(Some(&program_id))?;

    println!("Program ID:       {}", program_id);
    println!("Authority:        {}", cli.authority);
    println!("Contract account: {} (bump: {})", contract_account, bump);
    println!("Pool address:     {} (bump: {})", pool, pool_bump);

    let mints = config::available_mints(|key| std::env::var(key).ok())?;
    for (kind, mint) in mints {
        let (ata, _) = pda::get_associated_token_address(&contract_account, &mint)?;
        println!("{} token:        {}", kind, ata);
    }

    Ok(())
}
