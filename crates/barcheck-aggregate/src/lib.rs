//! Intraday-to-daily bar aggregation for barcheck.
//!
//! This crate reduces one trading day's intraday price ticks to a single bar:
//!
//! - [`IntradayTick`] - A time-of-day and trade price pulled from one line
//! - [`parse_tick_record`] - Parses one `date,time,price` record into a tick
//! - [`DailyAggregator`] - Streaming tick-to-daily-bar aggregator
//! - [`REGULAR_SESSION_OPEN`] - Cutoff before which ticks are ignored

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/barcheck/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod aggregator;
mod tick;

pub use aggregator::{DailyAggregator, LineOutcome, REGULAR_SESSION_OPEN, parse_tick_record};
pub use tick::IntradayTick;
