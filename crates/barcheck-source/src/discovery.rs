//! Intraday capture file discovery.

use barcheck_types::{BarcheckError, ConfigError, Result, intraday_reader, parse_file_date};
use chrono::NaiveDate;
use csv::ByteRecordsIntoIter;
use regex::Regex;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

/// One day's intraday capture file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntradayFile {
    /// Full path to the file.
    pub path: PathBuf,
    /// File name, used to attribute diagnostics.
    pub file_name: String,
    /// Trading day encoded in the file name.
    pub date: NaiveDate,
}

impl IntradayFile {
    /// Opens the file for record-by-record reading.
    ///
    /// Records are yielded as raw bytes so that a line which is not UTF-8
    /// can be reported on its own. The file is closed when the returned
    /// iterator is dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn records(&self) -> io::Result<ByteRecordsIntoIter<File>> {
        Ok(intraday_reader(File::open(&self.path)?).into_byte_records())
    }
}

/// Matches `<SYMBOL>_<yyyyMMdd>.<ext>` file names.
#[derive(Debug, Clone)]
pub struct IntradayFilePattern {
    regex: Regex,
}

impl IntradayFilePattern {
    /// Builds the pattern for `symbol`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPattern`] if the resulting expression
    /// does not compile.
    pub fn new(symbol: &str) -> std::result::Result<Self, ConfigError> {
        let pattern = format!(r"^{}_(\d{{8}})\.[A-Za-z0-9]+$", regex::escape(symbol));
        let regex = Regex::new(&pattern).map_err(|e| ConfigError::InvalidPattern {
            symbol: symbol.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self { regex })
    }

    /// Returns the trading day encoded in `file_name`, if it matches.
    ///
    /// Eight digits that are not a real calendar day do not match.
    #[must_use]
    pub fn date_of(&self, file_name: &str) -> Option<NaiveDate> {
        let caps = self.regex.captures(file_name)?;
        parse_file_date(caps.get(1)?.as_str())
    }
}

/// Lists the intraday files for `symbol` in `dir`, oldest first.
///
/// Files are ordered by the date in their name, then by name.
///
/// # Errors
///
/// Returns [`BarcheckError::NoIntradayFilesFound`] if `dir` is not a
/// directory or contains no matching files, [`BarcheckError::Config`] if
/// the pattern cannot be built, or [`BarcheckError::Io`] if the directory
/// cannot be listed.
pub fn discover_intraday_files(dir: &Path, symbol: &str) -> Result<Vec<IntradayFile>> {
    if !dir.is_dir() {
        return Err(BarcheckError::NoIntradayFilesFound {
            dir: dir.to_path_buf(),
        });
    }

    let pattern = IntradayFilePattern::new(symbol)?;
    let io_err = |source| BarcheckError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();
        if !path.is_file() {
            continue;
        }
        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };

        match pattern.date_of(file_name) {
            Some(date) => files.push(IntradayFile {
                file_name: file_name.to_string(),
                date,
                path,
            }),
            None => tracing::debug!(file = file_name, "skipping non-matching file"),
        }
    }

    if files.is_empty() {
        return Err(BarcheckError::NoIntradayFilesFound {
            dir: dir.to_path_buf(),
        });
    }

    files.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.file_name.cmp(&b.file_name)));
    Ok(files)
}
