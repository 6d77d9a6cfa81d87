//! Intraday tick representation.

use chrono::NaiveTime;
use rust_decimal::Decimal;

/// A single intraday price observation.
///
/// Ticks are never retained; each one is folded into the running bar and dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntradayTick {
    /// Local time of day of the trade.
    pub time: NaiveTime,
    /// Trade price.
    pub price: Decimal,
}

impl IntradayTick {
    /// Creates a new tick.
    #[must_use]
    pub const fn new(time: NaiveTime, price: Decimal) -> Self {
        Self { time, price }
    }
}
