//! Run driver.

use barcheck_aggregate::DailyAggregator;
use barcheck_source::{IntradayFile, ReferenceSeries, discover_intraday_files};
use barcheck_types::{Bar, Result};
use chrono::NaiveDate;
use csv::ByteRecord;

use crate::{EventSink, ReconcileConfig, ReconcileEvent};

/// Compares each day's intraday-derived bar against the reference series.
///
/// A run is strictly sequential: load the reference series, discover the
/// intraday files, then process the files one at a time in date order.
/// Each day is independent of the others.
#[derive(Debug, Clone)]
pub struct Reconciler {
    config: ReconcileConfig,
}

impl Reconciler {
    /// Creates a reconciler for the given configuration.
    #[must_use]
    pub const fn new(config: ReconcileConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &ReconcileConfig {
        &self.config
    }

    /// Runs the reconciliation, reporting everything to `sink`.
    ///
    /// # Errors
    ///
    /// Fails before emitting anything if the reference file is missing, and
    /// before processing any day if no intraday files are found. Line and day
    /// level problems are reported as events and never fail the run.
    pub fn run<S: EventSink>(&self, mut sink: S) -> Result<()> {
        let reference_path = self.config.reference_path();
        let loaded = ReferenceSeries::load(&reference_path)?;
        let series = loaded.series;

        for diagnostic in loaded.diagnostics {
            sink.emit(ReconcileEvent::Line(diagnostic));
        }
        sink.emit(ReconcileEvent::ReferenceLoaded {
            path: reference_path,
            days: series.len(),
        });

        let dir = self.config.instrument_dir();
        let files = discover_intraday_files(&dir, self.config.symbol())?;
        tracing::debug!(count = files.len(), dir = %dir.display(), "discovered intraday files");

        for file in &files {
            reconcile_file(&series, file, &mut sink);
        }

        Ok(())
    }
}

/// Processes one intraday file.
fn reconcile_file<S: EventSink>(series: &ReferenceSeries, file: &IntradayFile, sink: &mut S) {
    sink.emit(ReconcileEvent::Processing {
        file: file.file_name.clone(),
        date: file.date,
    });

    match file.records() {
        Ok(records) => reconcile_day(series, &file.file_name, file.date, records, sink),
        Err(err) => sink.emit(ReconcileEvent::Unreadable {
            file: file.file_name.clone(),
            reason: err.to_string(),
        }),
    }
}

/// Aggregates one day's records and compares the result against `series`.
///
/// Emits line diagnostics as they occur, then exactly one of
/// [`ReconcileEvent::Compared`], [`ReconcileEvent::DiffOverflow`],
/// [`ReconcileEvent::NoReferenceEntry`], [`ReconcileEvent::MissingDay`] or
/// [`ReconcileEvent::Unreadable`].
fn reconcile_day<I, S>(
    series: &ReferenceSeries,
    file_name: &str,
    date: NaiveDate,
    records: I,
    sink: &mut S,
) where
    I: IntoIterator<Item = csv::Result<ByteRecord>>,
    S: EventSink,
{
    let mut aggregator = DailyAggregator::new(file_name, date);

    for record in records {
        let record = match record {
            Ok(record) => record,
            Err(err) => {
                sink.emit(ReconcileEvent::Unreadable {
                    file: file_name.to_string(),
                    reason: err.to_string(),
                });
                return;
            }
        };

        if let Err(diagnostic) = aggregator.push_record(record) {
            sink.emit(ReconcileEvent::Line(diagnostic));
        }
    }

    match aggregator.finish() {
        Some(derived) => compare(series, derived, sink),
        None => sink.emit(ReconcileEvent::MissingDay {
            file: file_name.to_string(),
            date,
        }),
    }
}

/// Compares a derived bar against its reference counterpart, if any.
fn compare<S: EventSink>(series: &ReferenceSeries, derived: Bar, sink: &mut S) {
    let Some(reference) = series.get(derived.date).copied() else {
        sink.emit(ReconcileEvent::NoReferenceEntry { date: derived.date });
        return;
    };

    match reference.diff(&derived) {
        Some(diff) => sink.emit(ReconcileEvent::Compared {
            reference,
            derived,
            diff,
        }),
        None => sink.emit(ReconcileEvent::DiffOverflow { reference, derived }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use barcheck_types::{BarcheckError, LineDiagnostic, LineIssue, intraday_reader};
    use rust_decimal::Decimal;
    use std::fs;
    use std::io;
    use std::path::Path;
    use std::str::FromStr;

    fn d(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn records(text: &str) -> Vec<csv::Result<ByteRecord>> {
        intraday_reader(text.as_bytes()).into_byte_records().collect()
    }

    fn reference() -> ReferenceSeries {
        [Bar::new(
            date(2021, 3, 15),
            d("100.00"),
            d("105.00"),
            d("98.00"),
            d("102.00"),
        )]
        .into_iter()
        .collect()
    }

    /// Lays out `<root>/RUT/rut.csv` plus the given intraday files.
    fn write_data(root: &Path, reference: Option<&str>, files: &[(&str, &str)]) {
        let dir = root.join("RUT");
        fs::create_dir_all(&dir).unwrap();
        if let Some(text) = reference {
            fs::write(dir.join("rut.csv"), text).unwrap();
        }
        for (name, text) in files {
            fs::write(dir.join(name), text).unwrap();
        }
    }

    fn comparisons(events: &[ReconcileEvent]) -> Vec<String> {
        events
            .iter()
            .filter_map(|e| match e {
                ReconcileEvent::Compared { diff, .. } => Some(diff.to_string()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_day_compared() {
        let mut events = Vec::new();
        reconcile_day(
            &reference(),
            "RUT_20210315.txt",
            date(2021, 3, 15),
            records("3/15/2021,09:30:05,100.00\n3/15/2021,10:15:00,107.00\n3/15/2021,15:59:55,101.50"),
            &mut events,
        );

        assert_eq!(events.len(), 1);
        let ReconcileEvent::Compared {
            reference,
            derived,
            diff,
        } = &events[0]
        else {
            panic!("expected comparison, got {:?}", events[0]);
        };
        assert_eq!(reference.high, d("105.00"));
        assert_eq!(derived.open, d("100.00"));
        assert_eq!(derived.high, d("107.00"));
        assert_eq!(derived.low, d("100.00"));
        assert_eq!(derived.close, d("101.50"));
        assert_eq!(
            diff.to_string(),
            "20210315: opendiff=0.00 highdiff=-2.00 lowdiff=-2.00 closediff=0.50"
        );
    }

    #[test]
    fn test_day_with_only_pre_session_ticks() {
        let mut events = Vec::new();
        reconcile_day(
            &reference(),
            "RUT_20210315.txt",
            date(2021, 3, 15),
            records("3/15/2021,08:00:00,100.00\n3/15/2021,09:29:59,101.00"),
            &mut events,
        );

        assert_eq!(
            events,
            vec![ReconcileEvent::MissingDay {
                file: "RUT_20210315.txt".to_string(),
                date: date(2021, 3, 15),
            }]
        );
    }

    #[test]
    fn test_day_without_reference_entry() {
        let mut events = Vec::new();
        reconcile_day(
            &reference(),
            "RUT_20210316.txt",
            date(2021, 3, 16),
            records("3/16/2021,10:00:00,100.00"),
            &mut events,
        );

        assert_eq!(
            events,
            vec![ReconcileEvent::NoReferenceEntry {
                date: date(2021, 3, 16)
            }]
        );
    }

    #[test]
    fn test_line_diagnostics_are_forwarded() {
        let mut events = Vec::new();
        reconcile_day(
            &reference(),
            "RUT_20210315.txt",
            date(2021, 3, 15),
            records("3/15/2021,10:00:00\n3/16/2021,10:00:00,1.00\n3/15/2021,10:00:00,100.00"),
            &mut events,
        );

        assert_eq!(events.len(), 3);
        assert!(matches!(
            &events[0],
            ReconcileEvent::Line(diag) if diag.line == 1 && matches!(diag.issue, LineIssue::TooFewFields { .. })
        ));
        assert!(matches!(
            &events[1],
            ReconcileEvent::Line(diag) if diag.line == 2 && matches!(diag.issue, LineIssue::DateMismatch { .. })
        ));
        assert!(matches!(events[2], ReconcileEvent::Compared { .. }));
    }

    #[test]
    fn test_read_error_skips_day() {
        let mut events = Vec::new();
        let input = vec![
            Ok(ByteRecord::from(vec!["3/15/2021", "10:00:00", "100.00"])),
            Err(csv::Error::from(io::Error::other("device went away"))),
            Ok(ByteRecord::from(vec!["3/15/2021", "11:00:00", "101.00"])),
        ];
        reconcile_day(&reference(), "RUT_20210315.txt", date(2021, 3, 15), input, &mut events);

        assert_eq!(events.len(), 1);
        assert!(matches!(&events[0], ReconcileEvent::Unreadable { file, .. } if file == "RUT_20210315.txt"));
    }

    #[test]
    fn test_non_utf8_tick_line_keeps_the_day() {
        let mut events = Vec::new();
        let text = b"3/15/2021,09:30:05,100.00\n3/15/2021,10:00:00,10\xe9.00\n3/15/2021,10:15:00,107.00\n3/15/2021,15:59:55,101.50\n";
        reconcile_day(
            &reference(),
            "RUT_20210315.txt",
            date(2021, 3, 15),
            intraday_reader(&text[..]).into_byte_records(),
            &mut events,
        );

        assert_eq!(events.len(), 2);
        assert_eq!(
            events[0],
            ReconcileEvent::Line(LineDiagnostic::new(
                "RUT_20210315.txt",
                2,
                LineIssue::InvalidUtf8
            ))
        );
        assert_eq!(
            comparisons(&events),
            vec!["20210315: opendiff=0.00 highdiff=-2.00 lowdiff=-2.00 closediff=0.50"]
        );
    }

    #[test]
    fn test_diff_overflow_is_reported() {
        let day = date(2021, 3, 15);
        let series: ReferenceSeries =
            [Bar::new(day, Decimal::MAX, d("1"), d("1"), d("1"))].into_iter().collect();
        let mut events = Vec::new();
        reconcile_day(
            &series,
            "RUT_20210315.txt",
            day,
            records("3/15/2021,10:00:00,-1"),
            &mut events,
        );

        assert_eq!(events.len(), 1);
        assert!(matches!(
            &events[0],
            ReconcileEvent::DiffOverflow { reference, derived }
                if reference.open == Decimal::MAX && derived.open == d("-1")
        ));
    }

    #[test]
    fn test_non_utf8_reference_row_does_not_abort() {
        let root = tempfile::tempdir().unwrap();
        write_data(
            root.path(),
            None,
            &[("RUT_20210315.txt", "3/15/2021,09:30:05,100.00\n3/15/2021,10:15:00,107.00\n3/15/2021,15:59:55,101.50\n")],
        );
        fs::write(
            root.path().join("RUT").join("rut.csv"),
            b"Date,Open,High,Low,Close\n3/15/2021,100.00,105.00,98.00,102.00\n3/16/2021,\xe9,1,1,1\n",
        )
        .unwrap();

        let config = ReconcileConfig::new("RUT", root.path()).unwrap();
        let mut events = Vec::new();
        Reconciler::new(config).run(&mut events).unwrap();

        assert!(matches!(
            &events[0],
            ReconcileEvent::Line(diag) if diag.line == 2 && diag.issue == LineIssue::InvalidUtf8
        ));
        assert!(matches!(events[1], ReconcileEvent::ReferenceLoaded { days: 1, .. }));
        assert_eq!(
            comparisons(&events),
            vec!["20210315: opendiff=0.00 highdiff=-2.00 lowdiff=-2.00 closediff=0.50"]
        );
    }

    #[test]
    fn test_run_end_to_end() {
        let root = tempfile::tempdir().unwrap();
        write_data(
            root.path(),
            Some(
                "Date,Open,High,Low,Close,Adj Close,Volume\n\
                 3/15/2021,100.00,105.00,98.00,102.00,102.00,0\n\
                 3/17/2021,101.00,103.00,99.00,100.00,100.00,0\n\
                 3/17/2021\n",
            ),
            &[
                (
                    "RUT_20210317.txt",
                    "03/17/2021,09:30:00,101.00\n03/17/2021,12:00:00,103.00\n03/17/2021,16:00:00,100.25\n",
                ),
                (
                    "RUT_20210315.txt",
                    "3/15/2021,09:15:00,90.00\n3/15/2021,09:30:05,100.00\n3/15/2021,10:15:00,107.00\n3/15/2021,15:59:55,101.50\n",
                ),
                ("RUT_20210316.txt", "3/16/2021,09:00:00,100.00\n"),
                ("RUT_20210318.txt", "3/18/2021,10:00:00,100.00\n"),
                ("SPX_20210315.txt", "3/15/2021,10:00:00,4000.00\n"),
            ],
        );

        let config = ReconcileConfig::new("RUT", root.path()).unwrap();
        let mut events = Vec::new();
        Reconciler::new(config).run(&mut events).unwrap();

        assert!(matches!(
            &events[0],
            ReconcileEvent::Line(diag) if diag.line == 3 && diag.source == "rut.csv"
        ));
        assert!(matches!(events[1], ReconcileEvent::ReferenceLoaded { days: 2, .. }));

        let processed: Vec<_> = events
            .iter()
            .filter_map(|e| match e {
                ReconcileEvent::Processing { file, .. } => Some(file.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(
            processed,
            vec![
                "RUT_20210315.txt",
                "RUT_20210316.txt",
                "RUT_20210317.txt",
                "RUT_20210318.txt"
            ]
        );

        assert_eq!(
            comparisons(&events),
            vec![
                "20210315: opendiff=0.00 highdiff=-2.00 lowdiff=-2.00 closediff=0.50",
                "20210317: opendiff=0.00 highdiff=0.00 lowdiff=-2.00 closediff=-0.25",
            ]
        );

        let missing: Vec<_> = events
            .iter()
            .filter(|e| matches!(e, ReconcileEvent::MissingDay { .. }))
            .collect();
        assert_eq!(
            missing,
            vec![&ReconcileEvent::MissingDay {
                file: "RUT_20210316.txt".to_string(),
                date: date(2021, 3, 16),
            }]
        );

        let unmatched: Vec<_> = events
            .iter()
            .filter(|e| matches!(e, ReconcileEvent::NoReferenceEntry { .. }))
            .collect();
        assert_eq!(
            unmatched,
            vec![&ReconcileEvent::NoReferenceEntry {
                date: date(2021, 3, 18)
            }]
        );
    }

    #[test]
    fn test_missing_reference_aborts_before_discovery() {
        let root = tempfile::tempdir().unwrap();
        write_data(root.path(), None, &[("RUT_20210315.txt", "3/15/2021,10:00:00,1\n")]);

        let config = ReconcileConfig::new("RUT", root.path()).unwrap();
        let expected = config.reference_path();
        let mut events = Vec::new();
        let err = Reconciler::new(config).run(&mut events).unwrap_err();

        assert!(matches!(err, BarcheckError::ReferenceFileNotFound { path } if path == expected));
        assert!(events.is_empty());
    }

    #[test]
    fn test_no_intraday_files() {
        let root = tempfile::tempdir().unwrap();
        write_data(root.path(), Some("Date,Open,High,Low,Close\n"), &[]);

        let config = ReconcileConfig::new("RUT", root.path()).unwrap();
        let mut events = Vec::new();
        let err = Reconciler::new(config).run(&mut events).unwrap_err();

        assert!(matches!(err, BarcheckError::NoIntradayFilesFound { .. }));
        assert!(!events.iter().any(|e| matches!(e, ReconcileEvent::Processing { .. })));
    }

    #[test]
    fn test_reference_override_path() {
        let root = tempfile::tempdir().unwrap();
        write_data(root.path(), None, &[("RUT_20210315.txt", "3/15/2021,10:00:00,100.00\n")]);
        let reference = root.path().join("vendor.csv");
        fs::write(&reference, "Date,Open,High,Low,Close\n3/15/2021,100,100,100,100\n").unwrap();

        let config = ReconcileConfig::new("RUT", root.path())
            .unwrap()
            .with_reference_path(&reference);
        let mut events = Vec::new();
        Reconciler::new(config).run(&mut events).unwrap();

        assert_eq!(
            comparisons(&events),
            vec!["20210315: opendiff=0.00 highdiff=0.00 lowdiff=0.00 closediff=0.00"]
        );
    }
}
