//! Parsing of individual CSV fields.

use chrono::{NaiveDate, NaiveTime};
use csv::{ByteRecord, ReaderBuilder, StringRecord};
use rust_decimal::Decimal;
use std::io::Read;

use crate::LineIssue;

/// Date format used inside both the reference file and intraday lines.
///
/// Accepts `3/15/2021` as well as zero-padded `03/15/2021`.
pub const LINE_DATE_FORMAT: &str = "%m/%d/%Y";

/// Date format embedded in intraday file names and used for report output.
pub const FILE_DATE_FORMAT: &str = "%Y%m%d";

/// Builds a reader for a headed reference file.
///
/// Rows may carry any number of fields; short rows are reported by the
/// caller rather than rejected by the reader.
pub fn reference_reader<R: Read>(reader: R) -> csv::Reader<R> {
    ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader)
}

/// Builds a reader for a headerless intraday file.
pub fn intraday_reader<R: Read>(reader: R) -> csv::Reader<R> {
    ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader)
}

/// Returns the 1-based physical line a record starts on, if it was read from input.
#[must_use]
pub fn record_line(record: &ByteRecord) -> Option<usize> {
    record.position().map(|pos| pos.line() as usize)
}

/// Decodes a raw record as UTF-8.
///
/// # Errors
///
/// Returns [`LineIssue::InvalidUtf8`] if any field is not valid UTF-8.
pub fn decode_record(record: ByteRecord) -> Result<StringRecord, LineIssue> {
    StringRecord::from_byte_record(record).map_err(|_| LineIssue::InvalidUtf8)
}

/// Parses a `month/day/year` date field.
///
/// # Errors
///
/// Returns [`LineIssue::InvalidDate`] if the field is not a valid date.
pub fn parse_line_date(field: &str) -> Result<NaiveDate, LineIssue> {
    let field = field.trim();
    NaiveDate::parse_from_str(field, LINE_DATE_FORMAT)
        .map_err(|_| LineIssue::InvalidDate(field.to_string()))
}

/// Time formats tried in order: with seconds (and optional fraction), then without.
const TIME_FORMATS: [&str; 2] = ["%H:%M:%S%.f", "%H:%M"];

/// Parses a 24-hour `HH:MM[:SS[.fff]]` time field.
///
/// # Errors
///
/// Returns [`LineIssue::InvalidTime`] if the field is not a valid time.
pub fn parse_time(field: &str) -> Result<NaiveTime, LineIssue> {
    let field = field.trim();
    TIME_FORMATS
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(field, format).ok())
        .ok_or_else(|| LineIssue::InvalidTime(field.to_string()))
}

/// Parses a decimal price field.
///
/// # Errors
///
/// Returns [`LineIssue::InvalidPrice`] naming `name` if the field is not a decimal.
pub fn parse_price(name: &'static str, field: &str) -> Result<Decimal, LineIssue> {
    let field = field.trim();
    field.parse::<Decimal>().map_err(|_| LineIssue::InvalidPrice {
        field: name,
        value: field.to_string(),
    })
}

/// Parses exactly eight ASCII digits in `yyyyMMdd` order.
///
/// Returns `None` for anything else, including digit strings that do not
/// name a real calendar day.
#[must_use]
pub fn parse_file_date(digits: &str) -> Option<NaiveDate> {
    if digits.len() != 8 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let year: i32 = digits[0..4].parse().ok()?;
    let month: u32 = digits[4..6].parse().ok()?;
    let day: u32 = digits[6..8].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}
