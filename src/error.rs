// Error types
// Every failure here is a deterministic input-validation failure

use std::fmt;

use thiserror::Error;

/// Result type for RSA operations
pub type Result<T> = std::result::Result<T, RsaError>;

/// Which of the two generator inputs was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimePosition {
    First,
    Second,
    /// Both inputs were prime but their product does not fit the modulus type
    Product,
}

impl fmt::Display for PrimePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrimePosition::First => write!(f, "first prime"),
            PrimePosition::Second => write!(f, "second prime"),
            PrimePosition::Product => write!(f, "modulus"),
        }
    }
}

/// Errors produced by key generation, encoding and the transforms
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RsaError {
    /// A key generator input failed the primality check
    #[error("{value} is not valid key material ({position})")]
    InvalidKeyMaterial { value: u64, position: PrimePosition },

    /// A key index or decode value lies outside the valid range
    #[error("index {index} is out of range for {len} entries")]
    IndexOutOfRange { index: i128, len: u64 },

    /// A plaintext symbol is missing from the symbol table
    #[error("symbol {symbol:?} is not in the symbol table")]
    SymbolNotFound { symbol: char },

    /// The uniqueness-filtered key table has no entries
    #[error("no exponent pair satisfies the key constraints for these primes")]
    EmptyKeySpace,

    /// A transform was configured with a zero modulus
    #[error("modulus must be greater than zero")]
    InvalidModulus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_invalid_key_material() {
        let err = RsaError::InvalidKeyMaterial {
            value: 12,
            position: PrimePosition::First,
        };
        assert_eq!(err.to_string(), "12 is not valid key material (first prime)");
    }

    #[test]
    fn test_display_index_out_of_range() {
        let err = RsaError::IndexOutOfRange { index: -4, len: 3 };
        assert_eq!(err.to_string(), "index -4 is out of range for 3 entries");
    }

    #[test]
    fn test_display_symbol_not_found() {
        let err = RsaError::SymbolNotFound { symbol: 'z' };
        assert_eq!(err.to_string(), "symbol 'z' is not in the symbol table");
    }
}
