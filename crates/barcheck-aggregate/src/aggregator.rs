//! Streaming intraday-to-daily bar aggregation.

use barcheck_types::{
    Bar, LineDiagnostic, LineIssue, decode_record, parse_line_date, parse_price, parse_time,
    record_line,
};
use chrono::{NaiveDate, NaiveTime};
use csv::{ByteRecord, StringRecord};
use rust_decimal::Decimal;

use crate::IntradayTick;

/// Start of the regular trading session (09:30 local time).
///
/// Ticks strictly before this time are pre-market activity and never
/// contribute to the daily bar.
pub const REGULAR_SESSION_OPEN: NaiveTime = match NaiveTime::from_hms_opt(9, 30, 0) {
    Some(time) => time,
    None => panic!("invalid session open"),
};

/// Minimum number of fields on an intraday line: date, time, price.
const MIN_FIELDS: usize = 3;

/// What happened to an accepted line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineOutcome {
    /// The tick was folded into the bar.
    Retained,
    /// The tick precedes the session open and was dropped silently.
    PreSession,
}

/// Streaming aggregator for one trading day's intraday file.
///
/// Lines are pushed in file order. Lines that cannot be used produce a
/// [`LineDiagnostic`] and leave the bar untouched; the caller decides where
/// to report it.
#[derive(Debug)]
pub struct DailyAggregator {
    source: String,
    date: NaiveDate,
    line_no: usize,
    current_bar: Option<BarBuilder>,
}

impl DailyAggregator {
    /// Creates an aggregator for the file `source` whose ticks must all fall on `date`.
    #[must_use]
    pub fn new(source: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            source: source.into(),
            date,
            line_no: 0,
            current_bar: None,
        }
    }

    /// Returns the expected trading day.
    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.date
    }

    /// Returns the file name diagnostics are attributed to.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns the number of ticks folded into the bar so far.
    #[must_use]
    pub fn tick_count(&self) -> u32 {
        self.current_bar.as_ref().map_or(0, |b| b.tick_count)
    }

    /// Processes the next record of the file.
    ///
    /// Diagnostics carry the record's 1-based line number; a record built
    /// by hand is numbered one past the previous record.
    ///
    /// # Errors
    ///
    /// Returns a diagnostic if the record is not UTF-8, has too few fields,
    /// an unparseable field, or a date other than the expected trading day.
    /// The record is skipped.
    pub fn push_record(&mut self, record: ByteRecord) -> Result<LineOutcome, LineDiagnostic> {
        self.line_no = record_line(&record).unwrap_or(self.line_no + 1);
        let parsed = decode_record(record).and_then(|r| parse_tick_record(&r, self.date));
        match parsed {
            Ok(Some(tick)) => Ok(self.push_tick(tick)),
            Ok(None) => Ok(LineOutcome::PreSession),
            Err(issue) => Err(LineDiagnostic::new(self.source.as_str(), self.line_no, issue)),
        }
    }

    /// Folds an already parsed tick into the bar, honoring the session cutoff.
    pub fn push_tick(&mut self, tick: IntradayTick) -> LineOutcome {
        if tick.time < REGULAR_SESSION_OPEN {
            return LineOutcome::PreSession;
        }

        match self.current_bar.as_mut() {
            Some(builder) => builder.update(tick.price),
            None => self.current_bar = Some(BarBuilder::new(tick.price)),
        }
        LineOutcome::Retained
    }

    /// Finishes aggregation.
    ///
    /// Returns `None` if no tick was retained: such a day has no bar and
    /// must not be compared.
    #[must_use]
    pub fn finish(self) -> Option<Bar> {
        let date = self.date;
        self.current_bar.map(|b| b.finish(date))
    }
}

/// Parses one `date,time,price[,...]` intraday record expected on `date`.
///
/// Returns `Ok(None)` for a tick before [`REGULAR_SESSION_OPEN`]. The price
/// is only parsed once the date and time checks have passed, so a
/// pre-session line is never reported for a bad price.
///
/// # Errors
///
/// Returns the first problem found on the record.
pub fn parse_tick_record(
    record: &StringRecord,
    date: NaiveDate,
) -> Result<Option<IntradayTick>, LineIssue> {
    if record.len() < MIN_FIELDS {
        return Err(LineIssue::TooFewFields {
            found: record.len(),
            expected: MIN_FIELDS,
        });
    }

    let found = parse_line_date(&record[0])?;
    if found != date {
        return Err(LineIssue::DateMismatch {
            found,
            expected: date,
        });
    }

    let time = parse_time(&record[1])?;
    if time < REGULAR_SESSION_OPEN {
        return Ok(None);
    }

    let price = parse_price("tick", &record[2])?;
    Ok(Some(IntradayTick::new(time, price)))
}

/// Builder for the daily bar.
#[derive(Debug)]
struct BarBuilder {
    open: Decimal,
    high: Decimal,
    low: Decimal,
    close: Decimal,
    tick_count: u32,
}

impl BarBuilder {
    /// Creates a new builder from the first retained price.
    const fn new(price: Decimal) -> Self {
        Self {
            open: price,
            high: price,
            low: price,
            close: price,
            tick_count: 1,
        }
    }

    /// Updates the builder with a later price.
    fn update(&mut self, price: Decimal) {
        if price > self.high {
            self.high = price;
        } else if price < self.low {
            self.low = price;
        }
        self.close = price;
        self.tick_count += 1;
    }

    /// Finishes building and returns the bar.
    const fn finish(self, date: NaiveDate) -> Bar {
        Bar::new(date, self.open, self.high, self.low, self.close)
    }
}
