// Utilities - persistence of encoded data outside the core transforms

pub mod file_ops;

pub use file_ops::{load_charmap, EncodedStore, FileError, StoreConfig};
