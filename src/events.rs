//! Program events emitted by liqz
//!
//! Anchor programs emit events as a log line `Program data: <base64>`, where the payload is an
//! 8 byte discriminator (`SHA256("event:<Name>")[..8]`) followed by the Borsh-encoded fields.
//! Older Anchor releases used the `Program log: ` prefix, which is accepted as well.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use borsh::{BorshDeserialize, BorshSerialize};
use solana_sdk::pubkey::Pubkey;

use crate::instructions::anchor_discriminator;

const PROGRAM_DATA: &str = "Program data: ";
const PROGRAM_LOG: &str = "Program log: ";

/// Emitted once the contract account has been created
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct CalledInitialize {
    /// The contract account that was initialized
    pub account: Pubkey,
}

impl CalledInitialize {
    pub const NAME: &'static str = "CalledInitialize";

    pub fn discriminator() -> [u8; 8] {
        anchor_discriminator("event", Self::NAME)
    }
}

/// Raw base64-decoded payload of a program data log line
pub fn program_data(log: &str) -> Option<Vec<u8>> {
    let encoded = log
        .strip_prefix(PROGRAM_DATA)
        .or_else(|| log.strip_prefix(PROGRAM_LOG))?;
    STANDARD.decode(encoded.trim()).ok()
}

/// Decode a `CalledInitialize` event from a single log line
///
/// Returns `None` for unrelated logs, foreign events, and malformed payloads.
pub fn decode_called_initialize(log: &str) -> Option<CalledInitialize> {
    let data = program_data(log)?;
    if data.len() < 8 || data[..8] != CalledInitialize::discriminator() {
        return None;
    }
    let mut body = &data[8..];
    CalledInitialize::deserialize(&mut body).ok()
}

/// All `CalledInitialize` events in a transaction's logs, in emission order
pub fn parse_logs<S: AsRef<str>>(logs: &[S]) -> Vec<CalledInitialize> {
    logs.iter()
        .filter_map(|log| decode_called_initialize(log.as_ref()))
        .collect()
}
