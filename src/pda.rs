//! Program Derived Address (PDA) utilities for the liqz program
//!
//! This module provides helper functions for deriving the addresses the `initialize`
//! instruction touches. PDAs are deterministic addresses derived from seeds and a program ID;
//! the canonical search walks the bump seed down from 255 and returns the first candidate
//! that is not a valid ed25519 point, so no private key can ever sign for it.

use solana_sdk::pubkey::Pubkey;

use crate::{
    error::{LiqzError, LiqzResult},
    seeds::SEED_POOL,
    ASSOCIATED_TOKEN_PROGRAM_ID, TOKEN_PROGRAM_ID,
};

fn find_program_address(seeds: &[&[u8]], program_id: &Pubkey) -> LiqzResult<(Pubkey, u8)> {
    Pubkey::try_find_program_address(seeds, program_id)
        .ok_or_else(|| LiqzError::NoViableBump(program_id.to_string()))
}

/// Get the contract account PDA owned by an authority
///
/// # Arguments
/// * `authority` - The wallet that creates and pays for the contract account
/// * `program_id` - Optional custom program ID (uses canonical ID if None)
///
/// # Returns
/// Tuple of (PDA pubkey, bump seed)
pub fn get_contract_account_pda(
    authority: &Pubkey,
    program_id: Option<&Pubkey>,
) -> LiqzResult<(Pubkey, u8)> {
    find_program_address(
        &[authority.as_ref()],
        program_id.unwrap_or(&crate::program_id()),
    )
}

/// Get the singleton pool PDA
///
/// # Arguments
/// * `program_id` - Optional custom program ID (uses canonical ID if None)
///
/// # Returns
/// Tuple of (PDA pubkey, bump seed)
pub fn get_pool_pda(program_id: Option<&Pubkey>) -> LiqzResult<(Pubkey, u8)> {
    find_program_address(&[SEED_POOL], program_id.unwrap_or(&crate::program_id()))
}

/// Get the associated token account of `wallet` for `mint` under the SPL Token program
///
/// # Returns
/// Tuple of (associated token address, bump seed)
pub fn get_associated_token_address(wallet: &Pubkey, mint: &Pubkey) -> LiqzResult<(Pubkey, u8)> {
    get_associated_token_address_with_program_id(wallet, mint, &TOKEN_PROGRAM_ID)
}

/// Get the associated token account of `wallet` for `mint` under an explicit token program
///
/// Seeds are `[wallet, token_program, mint]` in that order, derived under the
/// associated token account program.
pub fn get_associated_token_address_with_program_id(
    wallet: &Pubkey,
    mint: &Pubkey,
    token_program: &Pubkey,
) -> LiqzResult<(Pubkey, u8)> {
    find_program_address(
        &[wallet.as_ref(), token_program.as_ref(), mint.as_ref()],
        &ASSOCIATED_TOKEN_PROGRAM_ID,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const WALLET: Pubkey = Pubkey::from_str_const("9WzDXwBbmkg8ZTbNMqUxvQRAyrZzDsGYdLVL9zYtAWWM");
    const USDC_MINT: Pubkey =
        Pubkey::from_str_const("EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v");

    #[test]
    fn test_associated_token_address_known_vector() {
        let (ata, bump) = get_associated_token_address(&WALLET, &USDC_MINT).unwrap();
        assert_eq!(
            ata,
            Pubkey::from_str_const("FGETo8T8wMcN2wCjav8VK6eh3dLk63evNDPxzLSJra8B")
        );
        assert_eq!(bump, 254);
    }

    #[test]
    fn test_contract_account_known_vector() {
        let (pda, bump) = get_contract_account_pda(&WALLET, None).unwrap();
        assert_eq!(
            pda,
            Pubkey::from_str_const("AosSNNZCTQD62gedkgULdqdJaq252Sw3uc9q53a43aAV")
        );
        assert_eq!(bump, 252);
    }

    #[test]
    fn test_pool_pda_known_vector() {
        let (pda, bump) = get_pool_pda(None).unwrap();
        assert_eq!(
            pda,
            Pubkey::from_str_const("CWFx2GCnnLZisWEMCXAQQpcmtmw1p9wyD9K6WtnXk5Lu")
        );
        assert_eq!(bump, 255);
    }

    #[test]
    fn test_derivation_is_deterministic() {
        let wallet = Pubkey::new_unique();
        let mint = Pubkey::new_unique();
        let first = get_associated_token_address(&wallet, &mint).unwrap();
        for _ in 0..8 {
            assert_eq!(get_associated_token_address(&wallet, &mint).unwrap(), first);
        }
    }

    #[test]
    fn test_derived_addresses_are_off_curve() {
        for _ in 0..16 {
            let wallet = Pubkey::new_unique();
            let mint = Pubkey::new_unique();
            let (ata, _) = get_associated_token_address(&wallet, &mint).unwrap();
            let (contract, _) = get_contract_account_pda(&wallet, None).unwrap();
            assert!(!ata.is_on_curve());
            assert!(!contract.is_on_curve());
        }
    }

    #[test]
    fn test_bump_recreates_address() {
        let wallet = Pubkey::new_unique();
        let mint = Pubkey::new_unique();
        let (ata, bump) = get_associated_token_address(&wallet, &mint).unwrap();
        let recreated = Pubkey::create_program_address(
            &[
                wallet.as_ref(),
                TOKEN_PROGRAM_ID.as_ref(),
                mint.as_ref(),
                &[bump],
            ],
            &ASSOCIATED_TOKEN_PROGRAM_ID,
        )
        .unwrap();
        assert_eq!(recreated, ata);
    }

    #[test]
    fn test_single_byte_change_alters_address() {
        let wallet = Pubkey::new_unique();
        let mint = Pubkey::new_unique();
        let (ata, _) = get_associated_token_address(&wallet, &mint).unwrap();

        let mut wallet_bytes = wallet.to_bytes();
        wallet_bytes[0] ^= 0x01;
        let (flipped_wallet, _) =
            get_associated_token_address(&Pubkey::new_from_array(wallet_bytes), &mint).unwrap();
        assert_ne!(flipped_wallet, ata);

        let mut mint_bytes = mint.to_bytes();
        mint_bytes[31] ^= 0x80;
        let (flipped_mint, _) =
            get_associated_token_address(&wallet, &Pubkey::new_from_array(mint_bytes)).unwrap();
        assert_ne!(flipped_mint, ata);
    }

    #[test]
    fn test_seed_order_matters() {
        let wallet = Pubkey::new_unique();
        let mint = Pubkey::new_unique();
        let (ata, _) = get_associated_token_address(&wallet, &mint).unwrap();
        let (swapped, _) = get_associated_token_address(&mint, &wallet).unwrap();
        assert_ne!(ata, swapped);
    }

    #[test]
    fn test_custom_program_id() {
        let authority = Pubkey::new_unique();
        let custom = Pubkey::new_unique();
        let (default_pda, _) = get_contract_account_pda(&authority, None).unwrap();
        let (custom_pda, _) = get_contract_account_pda(&authority, Some(&custom)).unwrap();
        assert_ne!(default_pda, custom_pda);
    }
}
