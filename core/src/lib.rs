//! Skycoin Lite - Core Library
//!
//! Platform-agnostic address derivation and transaction preparation.
//!
//! This crate provides the cryptographic logic used by the WebAssembly bridge,
//! but has no dependency on JavaScript and can be used from native Rust as well.
//!
//! # Example
//!
//! ```rust,ignore
//! use skycoin_lite_core::liteclient;
//!
//! let entry = liteclient::generate_address("my seed")?;
//! println!("{} (next seed {})", entry.address, entry.next_seed);
//!
//! let txn_hex = liteclient::prepare_transaction(inputs_json, outputs_json)?;
//! ```

pub mod address;
pub mod cipher;
pub mod error;
pub mod liteclient;
pub mod transaction;
pub mod types;

pub use address::Address;
pub use error::{Error, Result};
pub use transaction::Transaction;
pub use types::{AddressEntry, TransactionInput, TransactionOutput};
