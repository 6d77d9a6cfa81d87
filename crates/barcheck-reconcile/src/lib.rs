//! Reconciliation of reference daily bars against bars built from intraday ticks.
//!
//! - [`ReconcileConfig`] - Symbol and data locations for one run
//! - [`Reconciler`] - Drives the run, one intraday file at a time
//! - [`ReconcileEvent`] / [`EventSink`] - Everything a run reports, and where it goes

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/barcheck/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod event;
mod reconciler;

pub use config::{DEFAULT_DATA_DIR_NAME, ReconcileConfig};
pub use event::{EventSink, ReconcileEvent};
pub use reconciler::Reconciler;
