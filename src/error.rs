//! Error types for the liqz client library

use thiserror::Error;

/// Result type for liqz operations
pub type LiqzResult<T> = Result<T, LiqzError>;

/// Errors that can occur when using the liqz client
#[derive(Debug, Error)]
pub enum LiqzError {
    /// Error from the Solana RPC client
    #[error("Solana client error: {0}")]
    ClientError(#[from] solana_client::client_error::ClientError),

    /// Error from the websocket subscription client
    #[error("Solana pubsub error: {0}")]
    PubsubError(#[from] solana_client::nonblocking::pubsub_client::PubsubClientError),

    /// A required environment variable is not set
    #[error("Missing environment variable {0}")]
    MissingEnv(&'static str),

    /// A value could not be parsed as a public key
    #[error("Invalid public key in {name}: {value}")]
    InvalidPubkey { name: String, value: String },

    /// Two token kinds were configured with the same mint
    #[error("Mint {mint} is configured for both {first} and {second}")]
    DuplicateMint {
        mint: String,
        first: &'static str,
        second: &'static str,
    },

    /// Unknown cluster moniker or malformed endpoint pair
    #[error("Invalid cluster: {0}")]
    InvalidCluster(String),

    /// The wallet keypair could not be read
    #[error("Failed to read keypair {path}: {reason}")]
    Keypair { path: String, reason: String },

    /// No bump seed in 0..=255 produced an off-curve address
    #[error("No viable bump seed found for program {0}")]
    NoViableBump(String),

    /// A transaction was assembled without any signer
    #[error("Signer set must contain at least the fee payer")]
    EmptySignerSet,

    /// Failed to serialize data
    #[error("Failed to serialize data: {0}")]
    SerializationError(std::io::Error),

    /// Failed to deserialize account or event data
    #[error("Failed to deserialize data")]
    DeserializationError,

    /// Invalid account data
    #[error("Invalid account data: {0}")]
    InvalidAccountData(String),
}

impl From<std::io::Error> for LiqzError {
    fn from(err: std::io::Error) -> Self {
        LiqzError::SerializationError(err)
    }
}
