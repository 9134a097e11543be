//! Transaction assembly, signing and binary serialization.
//!
//! Layout (little-endian, sequences prefixed by a `u32` element count):
//!
//! ```text
//! length u32 | type u8 | inner_hash [32] | sigs [65]* | inputs [32]* | outputs (version u8, key [20], coins u64, hours u64)*
//! ```

use crate::address::Address;
use crate::cipher::{SIG_LEN, Sha256Hash, Sig, sha256, sha256_concat, sign_hash};
use crate::error::{Error, Result};
use bitcoin::secp256k1::SecretKey;

/// Size of the fixed header: length, type, inner hash.
const HEADER_LEN: usize = 4 + 1 + 32;
/// Encoded size of one output.
const OUTPUT_LEN: usize = 1 + 20 + 8 + 8;

/// A transaction output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TxOutput {
    pub address: Address,
    pub coins: u64,
    pub hours: u64,
}

/// An unspent-output spending transaction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transaction {
    pub length: u32,
    pub kind: u8,
    pub inner_hash: Sha256Hash,
    pub sigs: Vec<Sig>,
    pub inputs: Vec<Sha256Hash>,
    pub outputs: Vec<TxOutput>,
}

impl Transaction {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spend the unspent output identified by `hash`.
    pub fn push_input(&mut self, hash: Sha256Hash) {
        self.inputs.push(hash);
    }

    pub fn push_output(&mut self, address: Address, coins: u64, hours: u64) {
        self.outputs.push(TxOutput {
            address,
            coins,
            hours,
        });
    }

    /// Hash of the encoded inputs and outputs. Signatures commit to this.
    pub fn hash_inner(&self) -> Sha256Hash {
        let mut buf =
            Vec::with_capacity(8 + self.inputs.len() * 32 + self.outputs.len() * OUTPUT_LEN);
        self.encode_inputs(&mut buf);
        self.encode_outputs(&mut buf);
        sha256(&buf)
    }

    /// Sign every input with the key at the same position.
    pub fn sign_inputs(&mut self, keys: &[SecretKey]) -> Result<()> {
        if !self.sigs.is_empty() {
            return Err(Error::InvalidTransaction(
                "transaction has already been signed".to_string(),
            ));
        }
        if keys.len() != self.inputs.len() {
            return Err(Error::InvalidTransaction(format!(
                "expected {} keys, got {}",
                self.inputs.len(),
                keys.len()
            )));
        }

        self.inner_hash = self.hash_inner();
        self.sigs = self
            .inputs
            .iter()
            .zip(keys)
            .map(|(input, key)| sign_hash(&sha256_concat(&self.inner_hash, input), key))
            .collect();

        Ok(())
    }

    pub fn size(&self) -> usize {
        HEADER_LEN
            + 4
            + self.sigs.len() * SIG_LEN
            + 4
            + self.inputs.len() * 32
            + 4
            + self.outputs.len() * OUTPUT_LEN
    }

    /// Recompute the inner hash, type and length fields.
    pub fn update_header(&mut self) -> Result<()> {
        self.inner_hash = self.hash_inner();
        self.kind = 0;
        self.length = u32::try_from(self.size())
            .map_err(|_| Error::InvalidTransaction("transaction too large".to_string()))?;
        Ok(())
    }

    pub fn serialize(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(self.size());
        buf.extend_from_slice(&self.length.to_le_bytes());
        buf.push(self.kind);
        buf.extend_from_slice(&self.inner_hash);

        put_len(&mut buf, self.sigs.len());
        for sig in &self.sigs {
            buf.extend_from_slice(sig);
        }

        self.encode_inputs(&mut buf);
        self.encode_outputs(&mut buf);
        buf
    }

    fn encode_inputs(&self, buf: &mut Vec<u8>) {
        put_len(buf, self.inputs.len());
        for input in &self.inputs {
            buf.extend_from_slice(input);
        }
    }

    fn encode_outputs(&self, buf: &mut Vec<u8>) {
        put_len(buf, self.outputs.len());
        for output in &self.outputs {
            buf.push(output.address.version);
            buf.extend_from_slice(&output.address.key);
            buf.extend_from_slice(&output.coins.to_le_bytes());
            buf.extend_from_slice(&output.hours.to_le_bytes());
        }
    }
}

fn put_len(buf: &mut Vec<u8>, len: usize) {
    // Lengths are bounded by update_header's size check.
    buf.extend_from_slice(&(len as u32).to_le_bytes());
}
