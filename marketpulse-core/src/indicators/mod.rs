//! Indicator library — pure numeric functions over oldest-first sequences.
//!
//! Each indicator computes a full series in one pass with `f64::NAN` marking
//! the warm-up prefix. `annotate` runs all of them over a bar sequence and
//! slices the series into per-bar `Option` fields, which is the shared
//! groundwork for both the classifier and the backtest simulator.

pub mod atr;
pub mod ema;
pub mod macd;
pub mod rsi;
pub mod sma;

pub use atr::{atr_series, true_range};
pub use ema::ema_series;
pub use macd::{macd_series, MACD_FAST, MACD_SIGNAL, MACD_SLOW};
pub use rsi::rsi_series;
pub use sma::sma_series;

use crate::domain::{AnnotatedBar, Bar};

/// Short (fast) trailing simple average period.
pub const MA_SHORT: usize = 50;
/// Long (slow) trailing simple average period.
pub const MA_LONG: usize = 200;
/// RSI smoothing period.
pub const RSI_PERIOD: usize = 14;
/// ATR averaging period.
pub const ATR_PERIOD: usize = 14;

/// Annotate a bar sequence with every indicator the engine computes.
///
/// An indicator field on the result is `Some` iff the bar's index is at
/// least that indicator's minimum lookback (ma50: 49, ma200: 199, rsi: 14,
/// macd and atr: 0). Bars must be supplied oldest-first; ordering is the
/// caller's contract and is not validated here.
pub fn annotate(bars: &[Bar]) -> Vec<AnnotatedBar> {
    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();

    let ma50 = sma_series(&closes, MA_SHORT);
    let ma200 = sma_series(&closes, MA_LONG);
    let rsi = rsi_series(&closes, RSI_PERIOD);
    let macd = macd_series(&closes);
    let atr = atr_series(bars, ATR_PERIOD);

    bars.iter()
        .enumerate()
        .map(|(i, bar)| AnnotatedBar {
            bar: bar.clone(),
            ma50: defined(ma50[i]),
            ma200: defined(ma200[i]),
            rsi: defined(rsi[i]),
            macd: Some(macd[i]),
            atr: defined(atr[i]),
        })
        .collect()
}

/// NaN warm-up marker to absent field.
fn defined(v: f64) -> Option<f64> {
    (!v.is_nan()).then_some(v)
}

/// Create synthetic bars from close prices for testing.
///
/// Generates plausible OHLV: open = prev_close (or close for the first bar),
/// high = max(open, close) + 0.5, low = min(open, close) - 0.5.
#[cfg(test)]
pub fn make_bars(closes: &[f64]) -> Vec<Bar> {
    use chrono::{Duration, TimeZone, Utc};
    let base = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            Bar {
                timestamp: base + Duration::minutes(i as i64),
                open,
                high: open.max(close) + 0.5,
                low: open.min(close) - 0.5,
                close,
                volume: 1000.0,
            }
        })
        .collect()
}

/// Create bars from explicit (open, high, low, close) tuples for testing.
#[cfg(test)]
pub fn make_ohlc_bars(data: &[(f64, f64, f64, f64)]) -> Vec<Bar> {
    use chrono::{Duration, TimeZone, Utc};
    let base = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();
    data.iter()
        .enumerate()
        .map(|(i, &(open, high, low, close))| Bar {
            timestamp: base + Duration::minutes(i as i64),
            open,
            high,
            low,
            close,
            volume: 1000.0,
        })
        .collect()
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
