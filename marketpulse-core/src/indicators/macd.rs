//! Moving Average Convergence Divergence (MACD).
//!
//! Line = EMA(close, 12) - EMA(close, 26), pointwise.
//! Signal = EMA(line, 9). Histogram = line - signal, pointwise.
//! Periods are fixed at 12/26/9. Because the EMA seeds from its first input,
//! the whole triple is defined from index 0.

use crate::domain::Macd;

use super::ema::ema_series;

pub const MACD_FAST: usize = 12;
pub const MACD_SLOW: usize = 26;
pub const MACD_SIGNAL: usize = 9;

/// Compute the MACD series for `closes`.
///
/// Returns one `Macd` per input element; empty input yields an empty vector.
pub fn macd_series(closes: &[f64]) -> Vec<Macd> {
    let fast = ema_series(closes, MACD_FAST);
    let slow = ema_series(closes, MACD_SLOW);

    let line: Vec<f64> = fast.iter().zip(&slow).map(|(f, s)| f - s).collect();
    let signal = ema_series(&line, MACD_SIGNAL);

    line.iter()
        .zip(&signal)
        .map(|(&macd, &signal)| Macd {
            macd,
            signal,
            histogram: macd - signal,
        })
        .collect()
}
