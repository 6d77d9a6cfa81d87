//! Run configuration.

use barcheck_types::ConfigError;
use directories::UserDirs;
use std::path::{Path, PathBuf};

/// Name of the default data directory under the user's home directory.
pub const DEFAULT_DATA_DIR_NAME: &str = "IBData";

/// Configuration for one reconciliation run.
///
/// Data is laid out per instrument:
///
/// ```text
/// <data_dir>/<SYMBOL>/<symbol>.csv          reference daily bars
/// <data_dir>/<SYMBOL>/<SYMBOL>_<yyyyMMdd>.* one intraday file per day
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcileConfig {
    symbol: String,
    data_dir: PathBuf,
    reference_path: Option<PathBuf>,
}

impl ReconcileConfig {
    /// Creates a configuration for `symbol` rooted at `data_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the symbol is empty or contains characters other
    /// than ASCII letters, digits, `.`, `-` and `^`.
    pub fn new(
        symbol: impl Into<String>,
        data_dir: impl Into<PathBuf>,
    ) -> Result<Self, ConfigError> {
        let symbol = symbol.into();
        validate_symbol(&symbol)?;
        Ok(Self {
            symbol,
            data_dir: data_dir.into(),
            reference_path: None,
        })
    }

    /// Creates a configuration rooted at `~/IBData`.
    ///
    /// # Errors
    ///
    /// Returns an error if the symbol is invalid or the home directory
    /// cannot be determined.
    pub fn with_default_data_dir(symbol: impl Into<String>) -> Result<Self, ConfigError> {
        let data_dir = Self::default_data_dir().ok_or(ConfigError::NoHomeDir)?;
        Self::new(symbol, data_dir)
    }

    /// Returns the default data directory, `~/IBData`.
    #[must_use]
    pub fn default_data_dir() -> Option<PathBuf> {
        UserDirs::new().map(|dirs| dirs.home_dir().join(DEFAULT_DATA_DIR_NAME))
    }

    /// Overrides the reference file location.
    #[must_use]
    pub fn with_reference_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.reference_path = Some(path.into());
        self
    }

    /// Returns the instrument symbol.
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Returns the root data directory.
    #[must_use]
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Returns the directory holding this instrument's files.
    #[must_use]
    pub fn instrument_dir(&self) -> PathBuf {
        self.data_dir.join(&self.symbol)
    }

    /// Returns the reference file path.
    #[must_use]
    pub fn reference_path(&self) -> PathBuf {
        self.reference_path.clone().unwrap_or_else(|| {
            self.instrument_dir()
                .join(format!("{}.csv", self.symbol.to_lowercase()))
        })
    }
}

/// Checks that a symbol is safe to embed in file names.
fn validate_symbol(symbol: &str) -> Result<(), ConfigError> {
    if symbol.is_empty() {
        return Err(ConfigError::EmptySymbol);
    }

    for (index, ch) in symbol.char_indices() {
        if !(ch.is_ascii_alphanumeric() || matches!(ch, '.' | '-' | '^')) {
            return Err(ConfigError::InvalidSymbolChar { ch, index });
        }
    }
    Ok(())
}
