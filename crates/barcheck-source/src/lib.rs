//! Input sources for barcheck.
//!
//! - [`ReferenceSeries`] - The vendor's daily bars keyed by trading day
//! - [`discover_intraday_files`] - Finds per-day intraday capture files for a symbol

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/barcheck/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod discovery;
mod reference;

pub use discovery::{IntradayFile, IntradayFilePattern, discover_intraday_files};
pub use reference::{LoadedReference, ReferenceSeries};
