//! Deterministic secp256k1 key chains and signing primitives.
//!
//! Keys are derived from an arbitrary byte seed. Each step of the chain
//! produces a key pair and the seed for the next step, so a wallet can be
//! restored from its original seed alone.

use crate::error::{Error, Result};
use bitcoin::secp256k1::{Message, PublicKey, Scalar, Secp256k1, SecretKey};
use sha2::{Digest, Sha256};

/// A SHA-256 digest.
pub type Sha256Hash = [u8; 32];

/// Length of a compact recoverable signature (`r || s || recovery id`).
pub const SIG_LEN: usize = 65;

/// A compact recoverable ECDSA signature.
pub type Sig = [u8; SIG_LEN];

/// SHA-256 of `data`.
pub fn sha256(data: &[u8]) -> Sha256Hash {
    Sha256::digest(data).into()
}

/// SHA-256 of `a || b`.
pub fn sha256_concat(a: &[u8], b: &[u8]) -> Sha256Hash {
    let mut hasher = Sha256::new();
    hasher.update(a);
    hasher.update(b);
    hasher.finalize().into()
}

/// Derive a key pair from `seed`.
///
/// The seed is hashed repeatedly until the digest is a valid secret key.
pub fn generate_deterministic_key_pair(seed: &[u8]) -> (SecretKey, PublicKey) {
    let secp = Secp256k1::new();
    let mut hash = sha256(seed);
    loop {
        if let Ok(secret) = SecretKey::from_slice(&hash) {
            let public = secret.public_key(&secp);
            return (secret, public);
        }
        hash = sha256(&hash);
    }
}

/// One-way hash of a seed through an ECDH step.
///
/// Makes it hard to walk back from a derived secret key to earlier seeds.
pub fn secp256k1_hash(seed: &[u8]) -> Result<Sha256Hash> {
    let secp = Secp256k1::new();
    let hash = sha256(seed);
    let (secret, _) = generate_deterministic_key_pair(&hash);
    let (_, public) = generate_deterministic_key_pair(&sha256(&hash));

    let shared = public
        .mul_tweak(&secp, &Scalar::from(secret))
        .map_err(|e| Error::Other(format!("ECDH failed: {}", e)))?;

    Ok(sha256_concat(&hash, &shared.serialize()))
}

/// Advance the key chain by one step.
///
/// Returns the next seed together with the key pair for this step.
pub fn deterministic_key_pair_iterator(
    seed: &[u8],
) -> Result<(Sha256Hash, SecretKey, PublicKey)> {
    let next_seed = secp256k1_hash(seed)?;
    let (secret, public) = generate_deterministic_key_pair(&sha256_concat(seed, &next_seed));
    Ok((next_seed, secret, public))
}

/// Derive `n` secret keys from `seed`, returning the seed that continues the chain.
pub fn generate_deterministic_key_pairs_seed(
    seed: &[u8],
    n: usize,
) -> Result<(Sha256Hash, Vec<SecretKey>)> {
    if seed.is_empty() {
        return Err(Error::EmptySeed);
    }
    if n == 0 {
        return Err(Error::Other("key count must be at least 1".to_string()));
    }

    let mut keys = Vec::with_capacity(n);
    let (mut next_seed, secret, _) = deterministic_key_pair_iterator(seed)?;
    keys.push(secret);
    for _ in 1..n {
        let (seed, secret, _) = deterministic_key_pair_iterator(&next_seed)?;
        keys.push(secret);
        next_seed = seed;
    }

    Ok((next_seed, keys))
}

/// Sign a 32-byte digest, producing a compact recoverable signature.
pub fn sign_hash(hash: &Sha256Hash, secret: &SecretKey) -> Sig {
    let secp = Secp256k1::new();
    let message = Message::from_digest(*hash);
    let (recovery_id, compact) = secp
        .sign_ecdsa_recoverable(&message, secret)
        .serialize_compact();

    let mut sig = [0u8; SIG_LEN];
    sig[..64].copy_from_slice(&compact);
    sig[64] = recovery_id.to_i32() as u8;
    sig
}

/// Parse a hex-encoded secret key.
pub fn secret_key_from_hex(s: &str) -> Result<SecretKey> {
    let bytes = hex::decode(s).map_err(|e| Error::InvalidHex(format!("secret key: {}", e)))?;
    SecretKey::from_slice(&bytes).map_err(|e| Error::InvalidSecretKey(e.to_string()))
}

/// Parse a hex-encoded SHA-256 digest.
pub fn sha256_from_hex(s: &str) -> Result<Sha256Hash> {
    let bytes = hex::decode(s).map_err(|e| Error::InvalidHex(format!("hash: {}", e)))?;
    bytes
        .try_into()
        .map_err(|_| Error::InvalidHex("hash must be 32 bytes".to_string()))
}
