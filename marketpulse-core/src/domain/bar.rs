//! Bar — the fundamental market data unit.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// OHLCV bar for a single instrument over one time interval.
///
/// Bars are immutable once created: the engine never mutates one, and every
/// downstream record (annotation, analysis, backtest) is derived by value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Bar {
    /// Returns true if any OHLC field is non-finite.
    pub fn is_void(&self) -> bool {
        !(self.open.is_finite()
            && self.high.is_finite()
            && self.low.is_finite()
            && self.close.is_finite())
    }

    /// Basic OHLC sanity check: high >= low, high/low bracket open and close.
    pub fn is_sane(&self) -> bool {
        if self.is_void() {
            return false;
        }
        self.high >= self.low
            && self.high >= self.open
            && self.high >= self.close
            && self.low <= self.open
            && self.low <= self.close
            && self.open > 0.0
            && self.close > 0.0
    }
}

/// MACD triple: momentum line, its smoothed signal line, and their difference.
///
/// Invariant: `histogram == macd - signal` exactly (computed as the pointwise
/// difference, never stored independently).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Macd {
    pub macd: f64,
    pub signal: f64,
    pub histogram: f64,
}

/// A bar plus the indicator values computed from it and its history.
///
/// An indicator field is `Some` iff the bar's index in its sequence is at
/// least that indicator's minimum lookback: 49 for `ma50`, 199 for `ma200`,
/// 14 for `rsi`, and 0 for `macd` and `atr` (both are defined from the first
/// bar by their recurrences).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedBar {
    pub bar: Bar,
    pub ma50: Option<f64>,
    pub ma200: Option<f64>,
    pub rsi: Option<f64>,
    pub macd: Option<Macd>,
    pub atr: Option<f64>,
}

impl AnnotatedBar {
    /// Wrap a bar with no indicator values (insufficient history for all).
    pub fn bare(bar: Bar) -> Self {
        Self {
            bar,
            ma50: None,
            ma200: None,
            rsi: None,
            macd: None,
            atr: None,
        }
    }
}
