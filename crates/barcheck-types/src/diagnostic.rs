//! Non-fatal, line-level diagnostics.

use chrono::NaiveDate;
use std::fmt;
use thiserror::Error;

/// What was wrong with a single input line.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LineIssue {
    /// The line had fewer comma-separated fields than required.
    #[error("too few fields: found {found}, expected at least {expected}")]
    TooFewFields {
        /// Number of fields present.
        found: usize,
        /// Minimum number of fields required.
        expected: usize,
    },

    /// The line is not valid UTF-8.
    #[error("line is not valid UTF-8")]
    InvalidUtf8,

    /// The date field could not be parsed.
    #[error("invalid date '{0}'")]
    InvalidDate(String),

    /// The time field could not be parsed.
    #[error("invalid time '{0}'")]
    InvalidTime(String),

    /// A price field could not be parsed as a decimal.
    #[error("invalid {field} price '{value}'")]
    InvalidPrice {
        /// Name of the offending field.
        field: &'static str,
        /// The raw field text.
        value: String,
    },

    /// The line's date differs from the date encoded in the file name.
    #[error("line date {found} not same as file date {expected}")]
    DateMismatch {
        /// Date found on the line.
        found: NaiveDate,
        /// Date expected from the file name.
        expected: NaiveDate,
    },
}

/// A line-level problem together with where it was found.
///
/// The offending line is skipped; processing continues with the next one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineDiagnostic {
    /// File name the line came from.
    pub source: String,
    /// 1-based line number (data lines only for the reference file).
    pub line: usize,
    /// What was wrong.
    pub issue: LineIssue,
}

impl LineDiagnostic {
    /// Creates a new diagnostic.
    #[must_use]
    pub fn new(source: impl Into<String>, line: usize, issue: LineIssue) -> Self {
        Self {
            source: source.into(),
            line,
            issue,
        }
    }
}

impl fmt::Display for LineDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {} of {}: {}", self.line, self.source, self.issue)
    }
}
