//! Core types for the barcheck daily OHLC reconciler.
//!
//! This crate provides the fundamental data structures used throughout barcheck:
//!
//! - [`Bar`] - One trading day's open, high, low and close
//! - [`BarDiff`] - Field-wise difference between a reference and a derived bar
//! - [`LineDiagnostic`] - A non-fatal problem found on one input line
//! - [`BarcheckError`] - Fatal errors that abort a run

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/barcheck/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod bar;
mod diagnostic;
mod error;
mod fields;

pub use bar::{Bar, BarDiff};
pub use diagnostic::{LineDiagnostic, LineIssue};
pub use error::{BarcheckError, ConfigError, Result};
pub use fields::{
    FILE_DATE_FORMAT, LINE_DATE_FORMAT, decode_record, intraday_reader, parse_file_date,
    parse_line_date, parse_price, parse_time, record_line, reference_reader,
};
