//! Reconcile a vendor's daily OHLC bars against daily bars built from
//! locally captured intraday ticks.
//!
//! This is a facade crate that re-exports functionality from the barcheck
//! workspace crates for convenient access.
//!
//! # Quick Start
//!
//! ```no_run
//! use barcheck_lib::prelude::*;
//!
//! # fn main() -> barcheck_lib::Result<()> {
//! let config = ReconcileConfig::new("RUT", "/data/IBData")?;
//! let mut events: Vec<ReconcileEvent> = Vec::new();
//! Reconciler::new(config).run(&mut events)?;
//!
//! for event in &events {
//!     if let ReconcileEvent::Compared { diff, .. } = event {
//!         println!("{diff}");
//!     }
//! }
//! # Ok(())
//! # }
//! ```

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/barcheck/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export core types
pub use barcheck_types::*;

// Re-export aggregation
pub use barcheck_aggregate::{
    DailyAggregator, IntradayTick, LineOutcome, REGULAR_SESSION_OPEN, parse_tick_record,
};

// Re-export input sources
pub use barcheck_source::{
    IntradayFile, IntradayFilePattern, LoadedReference, ReferenceSeries, discover_intraday_files,
};

// Re-export the run driver
pub use barcheck_reconcile::{
    DEFAULT_DATA_DIR_NAME, EventSink, ReconcileConfig, ReconcileEvent, Reconciler,
};

/// Prelude module for convenient imports.
///
/// ```
/// use barcheck_lib::prelude::*;
/// ```
pub mod prelude {
    pub use barcheck_types::{
        Bar, BarDiff, BarcheckError, ConfigError, LineDiagnostic, LineIssue, Result,
    };

    pub use barcheck_aggregate::{DailyAggregator, IntradayTick};

    pub use barcheck_source::{IntradayFile, ReferenceSeries, discover_intraday_files};

    pub use barcheck_reconcile::{EventSink, ReconcileConfig, ReconcileEvent, Reconciler};
}
