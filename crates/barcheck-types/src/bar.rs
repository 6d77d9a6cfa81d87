//! Daily OHLC bar representation.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::fmt;

use crate::FILE_DATE_FORMAT;

/// One trading day's OHLC bar.
///
/// Used both for rows of the reference series and for bars derived from
/// intraday ticks. Prices are exact decimals so that differences between
/// the two sources never pick up binary floating point noise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bar {
    /// Trading day.
    pub date: NaiveDate,
    /// Opening price.
    pub open: Decimal,
    /// Highest price of the day.
    pub high: Decimal,
    /// Lowest price of the day.
    pub low: Decimal,
    /// Closing price.
    pub close: Decimal,
}

impl Bar {
    /// Creates a new bar.
    #[must_use]
    pub const fn new(
        date: NaiveDate,
        open: Decimal,
        high: Decimal,
        low: Decimal,
        close: Decimal,
    ) -> Self {
        Self {
            date,
            open,
            high,
            low,
            close,
        }
    }

    /// Returns true if `low <= open, close <= high`.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.low <= self.open.min(self.close) && self.open.max(self.close) <= self.high
    }

    /// Returns `self - derived` for each price field.
    ///
    /// `self` is the reference bar; the result carries the reference date.
    /// Returns `None` if any difference overflows the decimal range.
    #[must_use]
    pub fn diff(&self, derived: &Self) -> Option<BarDiff> {
        Some(BarDiff {
            date: self.date,
            open: self.open.checked_sub(derived.open)?,
            high: self.high.checked_sub(derived.high)?,
            low: self.low.checked_sub(derived.low)?,
            close: self.close.checked_sub(derived.close)?,
        })
    }
}

/// Field-wise difference `reference - derived` for one trading day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BarDiff {
    /// Trading day being compared.
    pub date: NaiveDate,
    /// Open difference.
    pub open: Decimal,
    /// High difference.
    pub high: Decimal,
    /// Low difference.
    pub low: Decimal,
    /// Close difference.
    pub close: Decimal,
}

impl fmt::Display for BarDiff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: opendiff={:.2} highdiff={:.2} lowdiff={:.2} closediff={:.2}",
            self.date.format(FILE_DATE_FORMAT),
            cents(self.open),
            cents(self.high),
            cents(self.low),
            cents(self.close),
        )
    }
}

/// Rounds half-even to two places, folding negative zero into zero.
fn cents(value: Decimal) -> Decimal {
    let rounded = value.round_dp(2);
    if rounded.is_zero() {
        Decimal::ZERO
    } else {
        rounded
    }
}
