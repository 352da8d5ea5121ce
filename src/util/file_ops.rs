// File Operations for encoded data
// Stores integer sequences as JSON arrays and loads symbol tables

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use log::debug;
use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur during file operations
#[derive(Error, Debug)]
pub enum FileError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("symbol table entry {0:?} is not a single character")]
    InvalidSymbol(String),
}

/// Result type for file operations
pub type FileResult<T> = Result<T, FileError>;

/// Where encoded data is persisted
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoreConfig {
    pub path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("./file.txt"),
        }
    }
}

impl StoreConfig {
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = path.into();
        self
    }
}

/// A file holding one integer sequence as a plain JSON array
#[derive(Clone, Debug)]
pub struct EncodedStore {
    config: StoreConfig,
}

impl EncodedStore {
    pub fn new(config: StoreConfig) -> Self {
        Self { config }
    }

    pub fn path(&self) -> &Path {
        &self.config.path
    }

    /// Overwrite the file with `data`
    pub fn write(&self, data: &[u64]) -> FileResult<()> {
        let mut writer = BufWriter::new(File::create(&self.config.path)?);
        serde_json::to_writer(&mut writer, data)?;
        writer.flush()?;
        debug!("wrote {} values to {}", data.len(), self.config.path.display());
        Ok(())
    }

    pub fn load(&self) -> FileResult<Vec<u64>> {
        let reader = BufReader::new(File::open(&self.config.path)?);
        let data: Vec<u64> = serde_json::from_reader(reader)?;
        debug!("loaded {} values from {}", data.len(), self.config.path.display());
        Ok(data)
    }
}

impl Default for EncodedStore {
    fn default() -> Self {
        Self::new(StoreConfig::default())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CharmapFile {
    Symbols(Vec<String>),
    Text(String),
}

/// Load a symbol table: a JSON array of one-character strings, or one string
pub fn load_charmap(path: &Path) -> FileResult<Vec<char>> {
    let reader = BufReader::new(File::open(path)?);
    let file: CharmapFile = serde_json::from_reader(reader)?;
    let symbols = match file {
        CharmapFile::Text(text) => text.chars().collect(),
        CharmapFile::Symbols(entries) => entries
            .into_iter()
            .map(|entry| {
                let mut chars = entry.chars();
                match (chars.next(), chars.next()) {
                    (Some(symbol), None) => Ok(symbol),
                    _ => Err(FileError::InvalidSymbol(entry)),
                }
            })
            .collect::<FileResult<Vec<char>>>()?,
    };
    debug!("loaded {} symbols from {}", symbols.len(), path.display());
    Ok(symbols)
}
