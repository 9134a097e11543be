//! Base58 addresses derived from compressed public keys.

use crate::cipher::{sha256, sha256_concat};
use crate::error::{Error, Result};
use bitcoin::secp256k1::PublicKey;
use ripemd::{Digest, Ripemd160};

/// Address version byte for mainnet addresses.
pub const ADDRESS_VERSION: u8 = 0;

/// Length of a decoded address: key, version, checksum.
const ADDRESS_BYTES: usize = 20 + 1 + 4;

/// A pay-to-pubkey-hash address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Address {
    pub version: u8,
    pub key: [u8; 20],
}

impl Address {
    /// Address for a compressed public key.
    ///
    /// `key = RIPEMD160(SHA256(SHA256(pubkey)))`
    pub fn from_public_key(public: &PublicKey) -> Self {
        let inner = sha256(&sha256(&public.serialize()));
        let key: [u8; 20] = Ripemd160::digest(inner).into();
        Self {
            version: ADDRESS_VERSION,
            key,
        }
    }

    fn checksum(&self) -> [u8; 4] {
        let hash = sha256_concat(&self.key, &[self.version]);
        [hash[0], hash[1], hash[2], hash[3]]
    }

    /// Raw `key || version || checksum` bytes.
    pub fn to_bytes(&self) -> [u8; ADDRESS_BYTES] {
        let mut out = [0u8; ADDRESS_BYTES];
        out[..20].copy_from_slice(&self.key);
        out[20] = self.version;
        out[21..].copy_from_slice(&self.checksum());
        out
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", bs58::encode(self.to_bytes()).into_string())
    }
}

impl std::str::FromStr for Address {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let bytes = bs58::decode(s)
            .into_vec()
            .map_err(|e| Error::InvalidAddress(format!("{}: {}", s, e)))?;

        if bytes.len() != ADDRESS_BYTES {
            return Err(Error::InvalidAddress(format!(
                "{}: expected {} bytes, got {}",
                s,
                ADDRESS_BYTES,
                bytes.len()
            )));
        }

        let mut key = [0u8; 20];
        key.copy_from_slice(&bytes[..20]);
        let address = Address {
            version: bytes[20],
            key,
        };

        if address.version != ADDRESS_VERSION {
            return Err(Error::InvalidAddress(format!(
                "{}: unsupported version {}",
                s, address.version
            )));
        }
        if address.checksum() != bytes[21..] {
            return Err(Error::InvalidAddress(format!("{}: checksum mismatch", s)));
        }

        Ok(address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cipher::generate_deterministic_key_pair;

    #[test]
    fn test_address_string_roundtrip() {
        let (_, public) = generate_deterministic_key_pair(b"address");
        let address = Address::from_public_key(&public);

        let encoded = address.to_string();
        let decoded: Address = encoded.parse().unwrap();
        assert_eq!(decoded, address);
    }

    #[test]
    fn test_corrupted_checksum_rejected() {
        let (_, public) = generate_deterministic_key_pair(b"address");
        let mut bytes = Address::from_public_key(&public).to_bytes();
        bytes[24] ^= 0xff;

        let tampered = bs58::encode(bytes).into_string();
        let err = tampered.parse::<Address>().unwrap_err();
        assert!(err.to_string().contains("checksum mismatch"));
    }

    #[test]
    fn test_wrong_length_rejected() {
        let short = bs58::encode([1u8; 10]).into_string();
        assert!(matches!(
            short.parse::<Address>(),
            Err(Error::InvalidAddress(_))
        ));
        assert!("not-base58-0OIl".parse::<Address>().is_err());
    }
}
