//! Run output events.

use barcheck_types::{Bar, BarDiff, LineDiagnostic};
use chrono::NaiveDate;
use std::path::PathBuf;

/// Something a reconciliation run reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileEvent {
    /// The reference series was loaded.
    ReferenceLoaded {
        /// Path of the reference file.
        path: PathBuf,
        /// Number of distinct trading days it holds.
        days: usize,
    },

    /// An intraday file is about to be processed.
    Processing {
        /// File name.
        file: String,
        /// Trading day encoded in the file name.
        date: NaiveDate,
    },

    /// A line was skipped.
    Line(LineDiagnostic),

    /// An intraday file could not be opened or read to the end; the day is skipped.
    Unreadable {
        /// File name.
        file: String,
        /// Description of the I/O failure.
        reason: String,
    },

    /// An intraday file produced no ticks at or after the session open.
    MissingDay {
        /// File name.
        file: String,
        /// Trading day without a derived bar.
        date: NaiveDate,
    },

    /// A derived bar has no counterpart in the reference series.
    NoReferenceEntry {
        /// Trading day of the derived bar.
        date: NaiveDate,
    },

    /// A derived bar was compared against the reference.
    Compared {
        /// The reference bar.
        reference: Bar,
        /// The bar built from intraday ticks.
        derived: Bar,
        /// `reference - derived`, field by field.
        diff: BarDiff,
    },

    /// A difference fell outside the decimal range; the day is not compared.
    DiffOverflow {
        /// The reference bar.
        reference: Bar,
        /// The bar built from intraday ticks.
        derived: Bar,
    },
}

/// Receives the events of a run, in order.
pub trait EventSink {
    /// Handles one event.
    fn emit(&mut self, event: ReconcileEvent);
}

impl EventSink for Vec<ReconcileEvent> {
    fn emit(&mut self, event: ReconcileEvent) {
        self.push(event);
    }
}

impl<S: EventSink + ?Sized> EventSink for &mut S {
    fn emit(&mut self, event: ReconcileEvent) {
        (**self).emit(event);
    }
}
