//! JavaScript-facing result types.
//!
//! These serialize into plain JS values (objects and strings) rather than
//! wasm_bindgen classes so callers can treat results as ordinary data.

use crate::error::ErrorResult;
use serde::Serialize;
use skycoin_lite_core::AddressEntry;

/// Result of `generateAddress`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressResult {
    /// Seed for the next address in the chain (hex-encoded).
    pub next_seed: String,
    /// Secret key (hex-encoded).
    pub secret: String,
    /// Public key (hex-encoded).
    pub public: String,
    /// Base58 address.
    pub address: String,
}

impl From<AddressEntry> for AddressResult {
    fn from(entry: AddressEntry) -> Self {
        Self {
            next_seed: entry.next_seed,
            secret: entry.secret,
            public: entry.public,
            address: entry.address,
        }
    }
}

/// Outcome of a single bridge call: exactly one success shape or an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Response {
    Address(AddressResult),
    /// Hex-encoded signed transaction.
    Transaction(String),
    Error(ErrorResult),
}

impl From<ErrorResult> for Response {
    fn from(err: ErrorResult) -> Self {
        Response::Error(err)
    }
}
