// RSA Key Generation
// Derives every usable (e, d) exponent pair for two small primes

use std::num::NonZeroU64;

use log::debug;
use rand::Rng;
use serde::Serialize;

use super::bigint::{gcd, is_prime, mod_inverse};
use super::decrypt::PrivateKey;
use super::encrypt::PublicKey;
use crate::error::{PrimePosition, Result, RsaError};

/// One public exponent and the private exponent paired with it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ExponentPair {
    pub public: u64,
    pub private: u64,
}

/// Keys handed out by `KeyGenerator::get_keys`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct KeyTriple {
    pub private: u64,
    pub public: u64,
    pub modulus: NonZeroU64,
}

impl KeyTriple {
    pub fn public_key(&self) -> PublicKey {
        PublicKey {
            e: self.public,
            n: self.modulus,
        }
    }

    pub fn private_key(&self) -> PrivateKey {
        PrivateKey {
            d: self.private,
            n: self.modulus,
        }
    }

    /// Same layout as the tuple the reference scenarios are written against
    pub fn as_tuple(&self) -> (u64, u64, u64) {
        (self.private, self.public, self.modulus.get())
    }
}

/// How the private exponent for each candidate is found
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeySearch {
    /// Try every d in [1, φ]. Cost grows with φ².
    #[default]
    Exhaustive,
    /// Extended Euclid, then apply the same d != e rule
    Inverse,
}

/// Valid exponent pairs for one modulus, ordered by ascending public exponent
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyTable {
    modulus: NonZeroU64,
    pairs: Vec<ExponentPair>,
}

impl KeyTable {
    pub fn modulus(&self) -> u64 {
        self.modulus.get()
    }

    pub fn pairs(&self) -> &[ExponentPair] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Public exponents in table order
    pub fn public_exponents(&self) -> impl Iterator<Item = u64> + '_ {
        self.pairs.iter().map(|pair| pair.public)
    }

    /// Private exponent paired with `public`, if it survived the filter
    pub fn private_for(&self, public: u64) -> Option<u64> {
        self.pairs
            .binary_search_by_key(&public, |pair| pair.public)
            .ok()
            .map(|i| self.pairs[i].private)
    }

    /// Copy holding only the first `len` pairs
    pub fn truncated(&self, len: usize) -> KeyTable {
        KeyTable {
            modulus: self.modulus,
            pairs: self.pairs.iter().take(len).copied().collect(),
        }
    }

    /// Pair at a position; negative positions count from the end
    pub fn get(&self, index: isize) -> Result<ExponentPair> {
        if self.pairs.is_empty() {
            return Err(RsaError::EmptyKeySpace);
        }

        let len = self.pairs.len();
        let resolved = if index < 0 {
            len.checked_sub(index.unsigned_abs())
        } else {
            Some(index.unsigned_abs())
        };

        resolved
            .and_then(|i| self.pairs.get(i))
            .copied()
            .ok_or(RsaError::IndexOutOfRange {
                index: index as i128,
                len: len as u64,
            })
    }

    fn triple(&self, pair: ExponentPair) -> KeyTriple {
        KeyTriple {
            private: pair.private,
            public: pair.public,
            modulus: self.modulus,
        }
    }
}

/// Keeps a private exponent only when it is the single solution
pub fn unique_solution(solutions: &[u64]) -> Option<u64> {
    match solutions {
        [d] => Some(*d),
        _ => None,
    }
}

/// Every d in [1, φ] with d != e and e*d ≡ 1 (mod φ)
pub fn private_exponents(e: u64, phi: u64) -> Vec<u64> {
    let modulus = u128::from(phi);
    (1..=phi)
        .filter(|&d| d != e && (u128::from(e) * u128::from(d)) % modulus == 1)
        .collect()
}

/// Public exponent candidates: e in [2, φ) coprime with φ
pub fn candidate_exponents(phi: u64) -> impl Iterator<Item = u64> {
    (2..phi).filter(move |&e| gcd(phi, e) == 1)
}

/// Key generator bound to one prime pair
#[derive(Debug, Clone)]
pub struct KeyGenerator {
    prime1: u64,
    prime2: u64,
    table: KeyTable,
}

impl KeyGenerator {
    /// Validate both primes and build the key table with the exhaustive search
    pub fn new(prime1: u64, prime2: u64) -> Result<Self> {
        Self::with_search(prime1, prime2, KeySearch::Exhaustive)
    }

    /// Equal primes are accepted; the resulting modulus is a prime square
    pub fn with_search(prime1: u64, prime2: u64, search: KeySearch) -> Result<Self> {
        if !is_prime(prime1) {
            return Err(RsaError::InvalidKeyMaterial {
                value: prime1,
                position: PrimePosition::First,
            });
        }
        if !is_prime(prime2) {
            return Err(RsaError::InvalidKeyMaterial {
                value: prime2,
                position: PrimePosition::Second,
            });
        }

        let modulus = prime1
            .checked_mul(prime2)
            .and_then(NonZeroU64::new)
            .ok_or(RsaError::InvalidKeyMaterial {
                value: prime1.max(prime2),
                position: PrimePosition::Product,
            })?;
        let phi = (prime1 - 1) * (prime2 - 1);

        let table = build_table(modulus, phi, search);
        debug!(
            "key table for p={} q={}: n={} phi={} retained={} search={:?}",
            prime1,
            prime2,
            modulus,
            phi,
            table.len(),
            search
        );

        Ok(Self {
            prime1,
            prime2,
            table,
        })
    }

    pub fn primes(&self) -> (u64, u64) {
        (self.prime1, self.prime2)
    }

    pub fn modulus(&self) -> u64 {
        self.table.modulus.get()
    }

    pub fn table(&self) -> &KeyTable {
        &self.table
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn private_for(&self, public: u64) -> Option<u64> {
        self.table.private_for(public)
    }

    /// Keep only the first `len` exponent pairs
    pub fn restrict_to(&mut self, len: usize) {
        self.table = self.table.truncated(len);
    }

    /// Keys at `index` when given, otherwise a uniformly random pair
    pub fn get_keys<R: Rng + ?Sized>(&self, index: Option<isize>, rng: &mut R) -> Result<KeyTriple> {
        match index {
            Some(index) => self.keys_at(index),
            None => self.random_keys(rng),
        }
    }

    /// Keys at a table position; negative positions count from the end
    pub fn keys_at(&self, index: isize) -> Result<KeyTriple> {
        let pair = self.table.get(index)?;
        Ok(self.table.triple(pair))
    }

    pub fn random_keys<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<KeyTriple> {
        if self.table.is_empty() {
            return Err(RsaError::EmptyKeySpace);
        }

        let i = rng.gen_range(0..self.table.len());
        Ok(self.table.triple(self.table.pairs[i]))
    }
}

fn build_table(modulus: NonZeroU64, phi: u64, search: KeySearch) -> KeyTable {
    let mut candidates = 0usize;
    let pairs = candidate_exponents(phi)
        .inspect(|_| candidates += 1)
        .filter_map(|e| {
            let private = match search {
                KeySearch::Exhaustive => unique_solution(&private_exponents(e, phi)),
                // a coprime e has exactly one inverse in [1, φ)
                KeySearch::Inverse => mod_inverse(e, phi).filter(|&d| d != e),
            };
            private.map(|private| ExponentPair { public: e, private })
        })
        .collect::<Vec<_>>();

    debug!("{} candidate public exponents for phi={}", candidates, phi);

    KeyTable { modulus, pairs }
}
