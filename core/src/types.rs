//! Shared types for the Skycoin Lite core library.

use serde::{Deserialize, Deserializer, Serialize};

/// Serde module accepting a `u64` written either as a JSON number or a decimal string.
mod u64_or_string {
    use super::*;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Number(u64),
        Text(String),
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<u64, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Repr::deserialize(deserializer)? {
            Repr::Number(n) => Ok(n),
            Repr::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
        }
    }
}

/// A freshly derived address together with its keys and the chain's next seed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressEntry {
    /// Seed for the next address in the chain (hex-encoded).
    pub next_seed: String,
    /// Secret key (hex-encoded).
    pub secret: String,
    /// Compressed public key (hex-encoded).
    pub public: String,
    /// Base58 address.
    pub address: String,
}

/// An unspent output to spend, with the key that owns it.
#[derive(Debug, Clone, Deserialize)]
pub struct TransactionInput {
    /// Unspent output hash (hex-encoded).
    pub hash: String,
    /// Secret key owning the output (hex-encoded).
    pub secret: String,
}

/// A requested transaction output.
#[derive(Debug, Clone, Deserialize)]
pub struct TransactionOutput {
    /// Destination base58 address.
    pub address: String,
    /// Amount in droplets.
    #[serde(deserialize_with = "u64_or_string::deserialize")]
    pub coins: u64,
    /// Coin hours to transfer.
    #[serde(deserialize_with = "u64_or_string::deserialize")]
    pub hours: u64,
}
