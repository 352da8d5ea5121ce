// RSA Module - Main module file
// Exports key derivation, the symbol codec and the transforms

pub mod bigint;
pub mod codec;
pub mod decrypt;
pub mod encrypt;
pub mod keygen;

pub use codec::{Codec, EncodingMode};
pub use decrypt::{decrypt_message, decrypt_values, Decrypter, PrivateKey};
pub use encrypt::{encrypt_message, encrypt_values, Encrypter, PublicKey};
pub use keygen::{ExponentPair, KeyGenerator, KeySearch, KeyTable, KeyTriple};
