//! Error types for barcheck.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for barcheck operations.
pub type Result<T> = std::result::Result<T, BarcheckError>;

/// Fatal errors that abort a reconciliation run.
#[derive(Error, Debug)]
pub enum BarcheckError {
    /// The reference series file does not exist.
    #[error("Reference data file {} does not exist", path.display())]
    ReferenceFileNotFound {
        /// The missing path.
        path: PathBuf,
    },

    /// No intraday capture files matched the symbol pattern.
    #[error("No intraday data files in {}", dir.display())]
    NoIntradayFilesFound {
        /// The directory that was searched.
        dir: PathBuf,
    },

    /// I/O error on a specific path.
    #[error("I/O error on '{}': {source}", path.display())]
    Io {
        /// The path being accessed.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Invalid configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors in the run configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The instrument symbol is empty.
    #[error("symbol cannot be empty")]
    EmptySymbol,

    /// The instrument symbol contains a character that cannot appear in a file name.
    #[error("symbol contains invalid character '{ch}' at index {index}")]
    InvalidSymbolChar {
        /// The offending character.
        ch: char,
        /// Its byte index in the symbol.
        index: usize,
    },

    /// No data directory was given and the home directory could not be determined.
    #[error("Failed to determine home directory for the default data directory")]
    NoHomeDir,

    /// The file name pattern built from the symbol failed to compile.
    #[error("invalid file name pattern for symbol '{symbol}': {reason}")]
    InvalidPattern {
        /// The symbol the pattern was built from.
        symbol: String,
        /// Why the pattern was rejected.
        reason: String,
    },
}
