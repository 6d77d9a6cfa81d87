//! Console output for reconciliation events.

use barcheck_lib::{EventSink, FILE_DATE_FORMAT, ReconcileEvent};
use std::io::{self, Stdout, Write};

/// Prints comparison lines to a writer and everything else to the log.
#[derive(Debug)]
pub(crate) struct ConsoleSink<W> {
    out: W,
}

impl ConsoleSink<Stdout> {
    /// Creates a sink that prints comparisons to stdout.
    pub(crate) fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ConsoleSink<W> {
    /// Creates a sink that prints comparisons to `out`.
    pub(crate) const fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> EventSink for ConsoleSink<W> {
    fn emit(&mut self, event: ReconcileEvent) {
        match event {
            ReconcileEvent::ReferenceLoaded { path, days } => {
                tracing::info!(days, "Loaded reference series {}", path.display());
            }
            ReconcileEvent::Processing { file, .. } => tracing::info!("Processing {file}..."),
            ReconcileEvent::Line(diagnostic) => tracing::warn!("{diagnostic}"),
            ReconcileEvent::Unreadable { file, reason } => {
                tracing::warn!("Cannot read {file}, skipping day: {reason}");
            }
            ReconcileEvent::MissingDay { file, date } => tracing::warn!(
                "{file} has no ticks at or after the session open, no bar for {}",
                date.format(FILE_DATE_FORMAT)
            ),
            ReconcileEvent::NoReferenceEntry { date } => tracing::warn!(
                "Reference file does not contain entry for intraday file of date {}",
                date.format(FILE_DATE_FORMAT)
            ),
            ReconcileEvent::DiffOverflow { reference, .. } => tracing::warn!(
                "Price difference out of range, cannot compare {}",
                reference.date.format(FILE_DATE_FORMAT)
            ),
            ReconcileEvent::Compared { diff, .. } => {
                if let Err(err) = writeln!(self.out, "{diff}") {
                    tracing::error!("Failed to write comparison: {err}");
                }
            }
        }
    }
}
