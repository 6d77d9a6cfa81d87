//! Reference daily series loading.

use barcheck_types::{
    Bar, BarcheckError, LineDiagnostic, LineIssue, Result, decode_record, parse_line_date,
    parse_price, record_line, reference_reader,
};
use chrono::NaiveDate;
use csv::StringRecord;
use std::collections::HashMap;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Minimum number of fields on a reference row: date, open, high, low, close.
const MIN_FIELDS: usize = 5;

/// The reference daily bars, keyed by trading day.
///
/// Built once and only read afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceSeries {
    bars: HashMap<NaiveDate, Bar>,
}

/// A loaded reference series together with the rows that were skipped.
#[derive(Debug, Clone)]
pub struct LoadedReference {
    /// The parsed series.
    pub series: ReferenceSeries,
    /// One entry per skipped row.
    pub diagnostics: Vec<LineDiagnostic>,
}

impl ReferenceSeries {
    /// Loads the reference CSV at `path`.
    ///
    /// The first line is a header and is skipped. Each remaining line is
    /// `date,open,high,low,close[,...]` with dates in `month/day/year` form.
    /// Rows that cannot be parsed are reported in
    /// [`LoadedReference::diagnostics`] with their 1-based data line number.
    /// A later row for the same date replaces an earlier one.
    ///
    /// # Errors
    ///
    /// Returns [`BarcheckError::ReferenceFileNotFound`] if `path` does not
    /// exist, or [`BarcheckError::Io`] if it cannot be read.
    pub fn load(path: &Path) -> Result<LoadedReference> {
        if !path.is_file() {
            return Err(BarcheckError::ReferenceFileNotFound {
                path: path.to_path_buf(),
            });
        }

        let io_err = |source| BarcheckError::Io {
            path: path.to_path_buf(),
            source,
        };
        let file = File::open(path).map_err(io_err)?;
        let source = path
            .file_name()
            .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());

        Self::from_reader(file, &source).map_err(io_err)
    }

    /// Parses a reference series from any reader.
    ///
    /// `source` names the input in diagnostics. Blank lines are skipped
    /// without a diagnostic.
    ///
    /// # Errors
    ///
    /// Returns an error if reading from `reader` fails.
    pub fn from_reader<R: Read>(reader: R, source: &str) -> io::Result<LoadedReference> {
        let mut series = Self::default();
        let mut diagnostics = Vec::new();

        for (index, record) in reference_reader(reader).into_byte_records().enumerate() {
            let record = record?;
            // data lines are numbered after the header
            let line_no = record_line(&record).map_or(index + 1, |line| line.saturating_sub(1));
            match decode_record(record).and_then(|r| parse_row(&r)) {
                Ok(bar) => {
                    if series.bars.insert(bar.date, bar).is_some() {
                        tracing::debug!(date = %bar.date, line = line_no, "duplicate reference date, keeping later row");
                    }
                }
                Err(issue) => diagnostics.push(LineDiagnostic::new(source, line_no, issue)),
            }
        }

        Ok(LoadedReference {
            series,
            diagnostics,
        })
    }

    /// Looks up the bar for a trading day.
    #[must_use]
    pub fn get(&self, date: NaiveDate) -> Option<&Bar> {
        self.bars.get(&date)
    }

    /// Returns the number of trading days in the series.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// Returns true if the series has no bars.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }
}

impl FromIterator<Bar> for ReferenceSeries {
    fn from_iter<I: IntoIterator<Item = Bar>>(iter: I) -> Self {
        Self {
            bars: iter.into_iter().map(|bar| (bar.date, bar)).collect(),
        }
    }
}

/// Parses one data row into a bar.
fn parse_row(record: &StringRecord) -> std::result::Result<Bar, LineIssue> {
    if record.len() < MIN_FIELDS {
        return Err(LineIssue::TooFewFields {
            found: record.len(),
            expected: MIN_FIELDS,
        });
    }

    Ok(Bar::new(
        parse_line_date(&record[0])?,
        parse_price("open", &record[1])?,
        parse_price("high", &record[2])?,
        parse_price("low", &record[3])?,
        parse_price("close", &record[4])?,
    ))
}
