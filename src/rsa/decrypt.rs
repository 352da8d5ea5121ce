// RSA Decryption
// v = c^d mod n, then decode back to text

use std::num::NonZeroU64;

use log::trace;
use serde::{Deserialize, Serialize};

use super::bigint::mod_pow_u64;
use super::codec::Codec;
use crate::error::{Result, RsaError};

/// RSA Private Key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrivateKey {
    pub d: u64, // Private exponent
    pub n: NonZeroU64, // Modulus, zero is unrepresentable
}

impl PrivateKey {
    pub fn new(d: u64, n: u64) -> Result<Self> {
        let n = NonZeroU64::new(n).ok_or(RsaError::InvalidModulus)?;
        Ok(Self { d, n })
    }

    /// Decrypt to encoded values, without decoding
    pub fn decrypt(&self, ciphertext: &[u64]) -> Vec<u64> {
        decrypt_values(ciphertext, self)
    }
}

pub fn decrypt_values(ciphertext: &[u64], private_key: &PrivateKey) -> Vec<u64> {
    trace!("decrypting {} values", ciphertext.len());
    ciphertext
        .iter()
        .map(|&c| mod_pow_u64(c, private_key.d, private_key.n))
        .collect()
}

/// Decrypt, then decode the values with `codec`
pub fn decrypt_message(ciphertext: &[u64], private_key: &PrivateKey, codec: &Codec) -> Result<String> {
    codec.decode(&decrypt_values(ciphertext, private_key))
}

/// Private key plus the codec used to decode plaintext
#[derive(Debug, Clone)]
pub struct Decrypter {
    key: PrivateKey,
    codec: Codec,
}

impl Decrypter {
    pub fn new(key: PrivateKey, codec: Codec) -> Self {
        Self { key, codec }
    }

    pub fn key(&self) -> &PrivateKey {
        &self.key
    }

    pub fn codec(&self) -> &Codec {
        &self.codec
    }

    pub fn decrypt(&self, ciphertext: &[u64]) -> Result<String> {
        decrypt_message(ciphertext, &self.key, &self.codec)
    }
}
