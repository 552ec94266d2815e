//! On-chain account structures for the liqz program
//!
//! The contract account written by `initialize` holds the pool configuration: the owner,
//! the three token mints, and the lending parameters. Rates are in basis points.

use borsh::{BorshDeserialize, BorshSerialize};
use solana_sdk::pubkey::Pubkey;

use crate::{
    error::{LiqzError, LiqzResult},
    instructions::anchor_discriminator,
    types::MintSet,
};

/// Pool configuration stored in the contract account
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct ContractAccount {
    /// PDA bump seed
    pub bump_seed: u8,
    /// Authority that created the account
    pub owner: Pubkey,
    pub liz_mint: Pubkey,
    pub tai_mint: Pubkey,
    pub dai_mint: Pubkey,
    /// LIZ paid out when a user deposits an NFT as collateral
    pub incentive: u64,
    /// Seconds a loan may run before it can be liquidated
    pub max_loan_duration: i64,
    pub service_fee_rate: u64,
    pub interest_rate: u64,
    /// Share of the appraised value that can be borrowed
    pub mortgage_rate: u64,
}

impl ContractAccount {
    /// Anchor account discriminator, first 8 bytes of SHA256("account:NFTPool")
    pub fn discriminator() -> [u8; 8] {
        anchor_discriminator("account", "NFTPool")
    }

    /// Deserialize a contract account from raw account data
    pub fn try_from_slice(data: &[u8]) -> LiqzResult<Self> {
        if data.len() < 8 {
            return Err(LiqzError::InvalidAccountData(
                "Account data too short".to_string(),
            ));
        }
        if data[..8] != Self::discriminator() {
            return Err(LiqzError::InvalidAccountData(
                "Discriminator does not match contract account".to_string(),
            ));
        }

        // Trailing bytes are allocation padding
        let mut body = &data[8..];
        <Self as BorshDeserialize>::deserialize(&mut body)
            .map_err(|_| LiqzError::DeserializationError)
    }

    /// Mints configured on the contract
    pub fn mints(&self) -> MintSet {
        MintSet {
            liz: self.liz_mint,
            tai: self.tai_mint,
            dai: self.dai_mint,
        }
    }
}
