//! Instruction builders for the liqz program
//!
//! This module builds the `initialize` instruction that creates the liqz contract account
//! and its three token accounts. The account list has a fixed shape; each role is a named
//! field of [`InitializeAccounts`] so no role can be duplicated or omitted.

use borsh::BorshSerialize;
use solana_sdk::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
};
use solana_sdk_ids::{system_program, sysvar};

use crate::{error::LiqzResult, pda, types::MintSet, TOKEN_PROGRAM_ID};

/// Helper function to compute Anchor instruction discriminator
/// Discriminator is the first 8 bytes of SHA256("global:instruction_name")
pub(crate) fn instruction_discriminator(name: &str) -> [u8; 8] {
    anchor_discriminator("global", name)
}

pub(crate) fn anchor_discriminator(namespace: &str, name: &str) -> [u8; 8] {
    use solana_sdk::hash::hash;
    let preimage = format!("{}:{}", namespace, name);
    let hash_result = hash(preimage.as_bytes());
    let mut discriminator = [0u8; 8];
    discriminator.copy_from_slice(&hash_result.to_bytes()[..8]);
    discriminator
}

/// Arguments for initializing the contract account
#[derive(Debug, Clone, BorshSerialize)]
pub struct InitializeArgs {
    /// Random seed bytes namespacing the new contract account
    pub seed: Vec<u8>,
}

impl InitializeArgs {
    /// Use the raw bytes of `seed` as the argument
    pub fn from_seed(seed: &Pubkey) -> Self {
        Self {
            seed: seed.to_bytes().to_vec(),
        }
    }
}

/// Accounts required by `initialize`, one field per role
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InitializeAccounts {
    /// Contract account PDA to create
    pub contract_account: Pubkey,
    /// Authority creating the contract account; pays fees and rent
    pub authority: Pubkey,
    pub liz_mint: Pubkey,
    /// Contract account's LIZ associated token account
    pub liz_token: Pubkey,
    pub tai_mint: Pubkey,
    /// Contract account's TAI associated token account
    pub tai_token: Pubkey,
    pub dai_mint: Pubkey,
    /// Contract account's DAI associated token account
    pub dai_token: Pubkey,
    pub spl_program: Pubkey,
    pub rent: Pubkey,
    pub system_program: Pubkey,
}

impl InitializeAccounts {
    /// Derive every address `initialize` needs for `authority`
    ///
    /// # Arguments
    /// * `authority` - Wallet that owns the new contract account
    /// * `mints` - The three token mints
    /// * `program_id` - Optional custom program ID
    pub fn derive(
        authority: &Pubkey,
        mints: &MintSet,
        program_id: Option<&Pubkey>,
    ) -> LiqzResult<Self> {
        let (contract_account, _) = pda::get_contract_account_pda(authority, program_id)?;
        let token = |mint: &Pubkey| -> LiqzResult<Pubkey> {
            Ok(pda::get_associated_token_address(&contract_account, mint)?.0)
        };

        Ok(Self {
            contract_account,
            authority: *authority,
            liz_mint: mints.liz,
            liz_token: token(&mints.liz)?,
            tai_mint: mints.tai,
            tai_token: token(&mints.tai)?,
            dai_mint: mints.dai,
            dai_token: token(&mints.dai)?,
            spl_program: TOKEN_PROGRAM_ID,
            rent: sysvar::rent::ID,
            system_program: system_program::ID,
        })
    }

    /// Account metas in the order the program declares them
    pub fn to_account_metas(&self) -> Vec<AccountMeta> {
        vec![
            AccountMeta::new(self.contract_account, false),
            AccountMeta::new(self.authority, true),
            AccountMeta::new_readonly(self.liz_mint, false),
            AccountMeta::new(self.liz_token, false),
            AccountMeta::new_readonly(self.tai_mint, false),
            AccountMeta::new(self.tai_token, false),
            AccountMeta::new_readonly(self.dai_mint, false),
            AccountMeta::new(self.dai_token, false),
            AccountMeta::new_readonly(self.spl_program, false),
            AccountMeta::new_readonly(self.rent, false),
            AccountMeta::new_readonly(self.system_program, false),
        ]
    }
}

/// Initialize the liqz contract account and its token accounts
///
/// # Arguments
/// * `accounts` - Role map of every account the instruction touches
/// * `args` - Initialization arguments
/// * `program_id` - Optional custom program ID
pub fn initialize(
    accounts: &InitializeAccounts,
    args: InitializeArgs,
    program_id: Option<Pubkey>,
) -> LiqzResult<Instruction> {
    let program_id = program_id.unwrap_or_else(crate::program_id);

    let mut data = instruction_discriminator("initialize").to_vec();
    args.serialize(&mut data)?;

    Ok(Instruction {
        program_id,
        accounts: accounts.to_account_metas(),
        data,
    })
}
