//! Core types for the liqz client
//!
//! The three token kinds the contract account holds, the set of their mints,
//! and the ordered set of keypairs that sign a transaction.

use std::fmt;

use serde::{Deserialize, Serialize};
use solana_sdk::{pubkey::Pubkey, signature::Keypair, signer::Signer};

use crate::error::{LiqzError, LiqzResult};

/// Token types held by the liqz contract account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Protocol incentive token
    Liz,
    /// Secondary protocol token
    Tai,
    /// Stablecoin loans are denominated in
    Dai,
}

impl TokenKind {
    /// All kinds, in the order their accounts appear in `initialize`
    pub const ALL: [TokenKind; 3] = [TokenKind::Liz, TokenKind::Tai, TokenKind::Dai];

    /// Environment variable carrying this kind's mint address
    pub fn env_var(&self) -> &'static str {
        match self {
            TokenKind::Liz => "LIZ_MINT_ADDRESS",
            TokenKind::Tai => "TAI_MINT_ADDRESS",
            TokenKind::Dai => "DAI_MINT_ADDRESS",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::Liz => "LIZ",
            TokenKind::Tai => "TAI",
            TokenKind::Dai => "DAI",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Mint addresses of the three token kinds
///
/// Deserialization goes through [`MintSet::new`], so a shared mint is rejected there too.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawMintSet")]
pub struct MintSet {
    pub liz: Pubkey,
    pub tai: Pubkey,
    pub dai: Pubkey,
}

#[derive(Deserialize)]
struct RawMintSet {
    liz: Pubkey,
    tai: Pubkey,
    dai: Pubkey,
}

impl TryFrom<RawMintSet> for MintSet {
    type Error = LiqzError;

    fn try_from(raw: RawMintSet) -> Result<Self, Self::Error> {
        MintSet::new(raw.liz, raw.tai, raw.dai)
    }
}

impl MintSet {
    /// Build a mint set, rejecting any mint shared between two kinds
    pub fn new(liz: Pubkey, tai: Pubkey, dai: Pubkey) -> LiqzResult<Self> {
        let mints = Self { liz, tai, dai };
        mints.ensure_distinct()?;
        Ok(mints)
    }

    /// Mint for a given token kind
    pub fn get(&self, kind: TokenKind) -> &Pubkey {
        match kind {
            TokenKind::Liz => &self.liz,
            TokenKind::Tai => &self.tai,
            TokenKind::Dai => &self.dai,
        }
    }

    /// Iterate over (kind, mint) pairs in account order
    pub fn iter(&self) -> impl Iterator<Item = (TokenKind, &Pubkey)> {
        TokenKind::ALL.into_iter().map(move |kind| (kind, self.get(kind)))
    }

    fn ensure_distinct(&self) -> LiqzResult<()> {
        for (i, (first, a)) in self.iter().enumerate() {
            if let Some((second, _)) = self.iter().skip(i + 1).find(|(_, b)| *b == a) {
                return Err(LiqzError::DuplicateMint {
                    mint: a.to_string(),
                    first: first.name(),
                    second: second.name(),
                });
            }
        }
        Ok(())
    }
}

/// Keypairs that approve a transaction
///
/// The first signer pays the fee. Extra signers follow in insertion order.
#[derive(Debug)]
pub struct SignerSet<'a> {
    signers: Vec<&'a Keypair>,
}

impl<'a> SignerSet<'a> {
    /// Create a signer set with `fee_payer` as its only member
    pub fn new(fee_payer: &'a Keypair) -> Self {
        Self {
            signers: vec![fee_payer],
        }
    }

    /// Build from an ordered slice; the first element becomes the fee payer
    ///
    /// Later keypairs with a key already in the set are skipped, as in [`SignerSet::with`].
    pub fn from_slice(signers: &[&'a Keypair]) -> LiqzResult<Self> {
        let (fee_payer, rest) = signers.split_first().ok_or(LiqzError::EmptySignerSet)?;
        Ok(rest
            .iter()
            .fold(Self::new(*fee_payer), |set, signer| set.with(*signer)))
    }

    /// Add another required signer; duplicates of an existing key are skipped
    pub fn with(mut self, signer: &'a Keypair) -> Self {
        if !self.contains(&signer.pubkey()) {
            self.signers.push(signer);
        }
        self
    }

    pub fn fee_payer(&self) -> &'a Keypair {
        self.signers[0]
    }

    pub fn contains(&self, key: &Pubkey) -> bool {
        self.signers.iter().any(|s| s.pubkey() == *key)
    }

    pub fn as_slice(&self) -> &[&'a Keypair] {
        &self.signers
    }

    pub fn len(&self) -> usize {
        self.signers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signers.is_empty()
    }
}
