//! High-level wallet operations with string-in, string-out signatures.
//!
//! These are the two operations exposed to JavaScript by the WASM bridge.

use crate::address::Address;
use crate::cipher::{
    generate_deterministic_key_pairs_seed, secret_key_from_hex, sha256_from_hex,
};
use crate::error::{Error, Result};
use crate::transaction::Transaction;
use crate::types::{AddressEntry, TransactionInput, TransactionOutput};
use anyhow::Context;
use bitcoin::secp256k1::Secp256k1;

/// Derive the next address in the chain that starts at `seed`.
///
/// Fails with [`Error::EmptySeed`] when `seed` is empty.
pub fn generate_address(seed: &str) -> Result<AddressEntry> {
    let secp = Secp256k1::new();
    let (next_seed, keys) = generate_deterministic_key_pairs_seed(seed.as_bytes(), 1)?;
    let secret = keys
        .into_iter()
        .next()
        .ok_or_else(|| Error::Other("no key derived".to_string()))?;
    let public = secret.public_key(&secp);

    log::debug!("Derived address for seed of {} bytes", seed.len());

    Ok(AddressEntry {
        next_seed: hex::encode(next_seed),
        secret: hex::encode(secret.secret_bytes()),
        public: hex::encode(public.serialize()),
        address: Address::from_public_key(&public).to_string(),
    })
}

/// Build and sign a transaction, returning its serialized hex form.
///
/// `inputs_json` is an array of `{ "hash", "secret" }` objects and
/// `outputs_json` an array of `{ "address", "coins", "hours" }` objects.
pub fn prepare_transaction(inputs_json: &str, outputs_json: &str) -> Result<String> {
    let inputs: Vec<TransactionInput> =
        serde_json::from_str(inputs_json).context("failed to parse inputs")?;
    let outputs: Vec<TransactionOutput> =
        serde_json::from_str(outputs_json).context("failed to parse outputs")?;

    if inputs.is_empty() {
        return Err(Error::InvalidTransaction("no inputs".to_string()));
    }
    if outputs.is_empty() {
        return Err(Error::InvalidTransaction("no outputs".to_string()));
    }

    let mut txn = Transaction::new();
    let mut keys = Vec::with_capacity(inputs.len());
    for input in &inputs {
        txn.push_input(sha256_from_hex(&input.hash)?);
        keys.push(secret_key_from_hex(&input.secret)?);
    }
    for output in &outputs {
        let address: Address = output.address.parse()?;
        txn.push_output(address, output.coins, output.hours);
    }

    txn.sign_inputs(&keys)?;
    txn.update_header()?;

    log::debug!(
        "Prepared transaction with {} inputs and {} outputs ({} bytes)",
        inputs.len(),
        outputs.len(),
        txn.length
    );

    Ok(hex::encode(txn.serialize()))
}
