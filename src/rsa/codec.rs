// Symbol Codec
// Maps text to integers by code point or by position in a symbol table

use crate::error::{Result, RsaError};

/// Number of values representable as a Unicode code point
const CODE_POINT_SPACE: u64 = char::MAX as u64 + 1;

/// How symbols become integers
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EncodingMode {
    /// Native code point of each symbol
    #[default]
    Native,
    /// Position of each symbol in the table
    Table(Vec<char>),
}

/// Text <-> integer sequence conversion
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Codec {
    mode: EncodingMode,
}

impl Codec {
    pub fn new(mode: EncodingMode) -> Self {
        Self { mode }
    }

    pub fn native() -> Self {
        Self::new(EncodingMode::Native)
    }

    pub fn with_table(symbols: Vec<char>) -> Self {
        Self::new(EncodingMode::Table(symbols))
    }

    /// Table made of the characters of `symbols`, in order
    pub fn from_symbols(symbols: &str) -> Self {
        Self::with_table(symbols.chars().collect())
    }

    pub fn mode(&self) -> &EncodingMode {
        &self.mode
    }

    pub fn encode(&self, message: &str) -> Result<Vec<u64>> {
        match &self.mode {
            EncodingMode::Native => Ok(message.chars().map(u64::from).collect()),
            EncodingMode::Table(symbols) => message
                .chars()
                .map(|symbol| {
                    // first match wins when the table repeats a symbol
                    symbols
                        .iter()
                        .position(|&s| s == symbol)
                        .map(|i| i as u64)
                        .ok_or(RsaError::SymbolNotFound { symbol })
                })
                .collect(),
        }
    }

    pub fn decode(&self, values: &[u64]) -> Result<String> {
        match &self.mode {
            EncodingMode::Native => values
                .iter()
                .map(|&value| {
                    u32::try_from(value)
                        .ok()
                        .and_then(char::from_u32)
                        .ok_or(RsaError::IndexOutOfRange {
                            index: i128::from(value),
                            len: CODE_POINT_SPACE,
                        })
                })
                .collect(),
            EncodingMode::Table(symbols) => values
                .iter()
                .map(|&value| {
                    usize::try_from(value)
                        .ok()
                        .and_then(|i| symbols.get(i))
                        .copied()
                        .ok_or(RsaError::IndexOutOfRange {
                            index: i128::from(value),
                            len: symbols.len() as u64,
                        })
                })
                .collect(),
        }
    }
}
