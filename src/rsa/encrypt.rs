// RSA Encryption
// c = v^e mod n for every encoded symbol

use std::num::NonZeroU64;

use log::trace;
use serde::{Deserialize, Serialize};

use super::bigint::mod_pow_u64;
use super::codec::Codec;
use crate::error::{Result, RsaError};

/// RSA Public Key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicKey {
    pub e: u64, // Public exponent
    pub n: NonZeroU64, // Modulus, zero is unrepresentable
}

impl PublicKey {
    pub fn new(e: u64, n: u64) -> Result<Self> {
        let n = NonZeroU64::new(n).ok_or(RsaError::InvalidModulus)?;
        Ok(Self { e, n })
    }

    /// Encrypt already encoded values with this key
    pub fn encrypt(&self, values: &[u64]) -> Vec<u64> {
        encrypt_values(values, self)
    }
}

/// Encrypt each value in order; output has the same length
pub fn encrypt_values(values: &[u64], public_key: &PublicKey) -> Vec<u64> {
    trace!("encrypting {} values with e={}", values.len(), public_key.e);
    values
        .iter()
        .map(|&v| mod_pow_u64(v, public_key.e, public_key.n))
        .collect()
}

/// Encode a message with `codec`, then encrypt it
pub fn encrypt_message(message: &str, public_key: &PublicKey, codec: &Codec) -> Result<Vec<u64>> {
    let encoded = codec.encode(message)?;
    Ok(encrypt_values(&encoded, public_key))
}

/// Public key plus the codec used to encode plaintext
#[derive(Debug, Clone)]
pub struct Encrypter {
    key: PublicKey,
    codec: Codec,
}

impl Encrypter {
    pub fn new(key: PublicKey, codec: Codec) -> Self {
        Self { key, codec }
    }

    pub fn key(&self) -> &PublicKey {
        &self.key
    }

    pub fn codec(&self) -> &Codec {
        &self.codec
    }

    pub fn encrypt(&self, message: &str) -> Result<Vec<u64>> {
        encrypt_message(message, &self.key, &self.codec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encrypt_values() {
        // not a real key pair, small numbers keep the expectation readable
        let key = PublicKey::new(2, 3).unwrap();
        let values: Vec<u64> = (0..10).collect();
        assert_eq!(encrypt_values(&values, &key), vec![0, 1, 1, 0, 1, 1, 0, 1, 1, 0]);
    }

    #[test]
    fn test_encrypt_message() {
        let encrypter = Encrypter::new(PublicKey::new(7, 527).unwrap(), Codec::native());
        let ciphertext = encrypter.encrypt("abc").unwrap();

        assert_eq!(ciphertext.len(), 3);
        assert!(ciphertext.iter().all(|&c| c < 527));
        // 97^7 mod 527
        assert_eq!(ciphertext[0], 109);
    }

    #[test]
    fn test_encrypt_unknown_symbol() {
        let encrypter = Encrypter::new(PublicKey::new(7, 527).unwrap(), Codec::from_symbols("abc"));
        assert_eq!(
            encrypter.encrypt("abd").unwrap_err(),
            RsaError::SymbolNotFound { symbol: 'd' }
        );
    }

    #[test]
    fn test_encrypt_empty() {
        let key = PublicKey::new(7, 527).unwrap();
        assert!(key.encrypt(&[]).is_empty());
    }

    #[test]
    fn test_zero_modulus_rejected() {
        assert_eq!(PublicKey::new(7, 0).unwrap_err(), RsaError::InvalidModulus);
    }

    #[test]
    fn test_deserialized_key_needs_nonzero_modulus() {
        assert!(serde_json::from_str::<PublicKey>(r#"{"e":7,"n":0}"#).is_err());

        let key: PublicKey = serde_json::from_str(r#"{"e":7,"n":527}"#).unwrap();
        assert_eq!(key, PublicKey::new(7, 527).unwrap());
        assert_eq!(encrypt_values(&[5], &key), vec![mod_pow_u64(5, 7, key.n)]);
        assert_eq!(serde_json::to_string(&key).unwrap(), r#"{"e":7,"n":527}"#);
    }
}
