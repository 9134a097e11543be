//! Error types for the Skycoin Lite core library.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while deriving addresses or preparing transactions.
#[derive(Error, Debug)]
pub enum Error {
    /// Seed input was empty.
    #[error("seed input is empty")]
    EmptySeed,

    /// Malformed hex input.
    #[error("Invalid hex: {0}")]
    InvalidHex(String),

    /// Secret key is not a valid secp256k1 scalar.
    #[error("Invalid secret key: {0}")]
    InvalidSecretKey(String),

    /// Address failed to decode or verify.
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// Transaction could not be assembled or signed.
    #[error("Invalid transaction: {0}")]
    InvalidTransaction(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Generic error with context.
    #[error("{0}")]
    Other(String),
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Error::Other(format!("{:#}", err))
    }
}
