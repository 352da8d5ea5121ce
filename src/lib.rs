//! Small-prime RSA for teaching.
//!
//! `KeyGenerator` derives every exponent pair `(e, d)` with
//! `e * d ≡ 1 (mod φ)`, `e != d`, where `d` is the only solution for its `e`.
//! `Codec` turns text into integers (code points or symbol-table positions)
//! and `Encrypter` / `Decrypter` apply `v^e mod n` / `c^d mod n` per symbol.
//!
//! ```
//! use toy_rsa::rsa::{Codec, Decrypter, Encrypter, KeyGenerator};
//!
//! let generator = KeyGenerator::new(17, 31).unwrap();
//! let keys = generator.keys_at(0).unwrap();
//! assert_eq!(keys.as_tuple(), (343, 7, 527));
//!
//! let ciphertext = Encrypter::new(keys.public_key(), Codec::native())
//!     .encrypt("Testing message...")
//!     .unwrap();
//! let plaintext = Decrypter::new(keys.private_key(), Codec::native())
//!     .decrypt(&ciphertext)
//!     .unwrap();
//! assert_eq!(plaintext, "Testing message...");
//! ```
//!
//! Not secure: trial division and brute-force key search only work for
//! primes small enough to compute by hand.

pub mod error;
pub mod rsa;
pub mod util;

pub use error::{PrimePosition, Result, RsaError};
