//! # liqz Client
//!
//! A Rust client library for the liqz NFT lending program on Solana.
//! It derives the program's contract account and the associated token accounts
//! the contract holds, builds the `initialize` instruction, and submits it.
//!
//! ## Features
//!
//! - **PDA Utilities**: Deterministic derivation of the contract account and
//!   associated token addresses, with the bump seed that proves them off-curve
//! - **Instruction Builders**: Anchor-compatible `initialize` instruction with a fixed account layout
//! - **Event Decoding**: Parses `CalledInitialize` events out of program logs
//! - **Async Support**: Optional async client for sending transactions and subscribing to logs
//!
//! ## Usage
//!
//! ```rust
//! use liqz_client::pda;
//! use solana_sdk::pubkey::Pubkey;
//!
//! let authority = Pubkey::new_unique();
//! let (contract_account, bump) = pda::get_contract_account_pda(&authority, None).unwrap();
//! ```

pub mod accounts;
pub mod config;
pub mod error;
pub mod events;
pub mod instructions;
pub mod logging;
pub mod pda;
pub mod types;

#[cfg(feature = "async")]
pub mod client;

// Re-export commonly used types
pub use error::{LiqzError, LiqzResult};
pub use types::{MintSet, SignerSet, TokenKind};

use solana_sdk::pubkey::Pubkey;

/// The deployed liqz program ID
pub const LIQZ_PROGRAM_ID: Pubkey =
    Pubkey::from_str_const("91aE2UGTmGfy9FVCPB9PFoNbEokDoPBKh8nitW4QPwxp");

/// SPL Token program, owner of every token account the contract holds
pub const TOKEN_PROGRAM_ID: Pubkey =
    Pubkey::from_str_const("TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA");

/// SPL Associated Token Account program
pub const ASSOCIATED_TOKEN_PROGRAM_ID: Pubkey =
    Pubkey::from_str_const("ATokenGPvbdGVxr1b2hvZbsiqW5xWH25efTNsLJA8knL");

/// Seed constants for PDA derivation
pub mod seeds {
    pub const SEED_POOL: &[u8] = b"liqzNFTPool";
}

/// Returns the canonical liqz program ID
pub fn program_id() -> Pubkey {
    LIQZ_PROGRAM_ID
}
