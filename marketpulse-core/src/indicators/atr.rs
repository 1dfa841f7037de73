//! Average True Range (ATR).
//!
//! True Range: TR[0] = high[0] - low[0] (no previous close);
//! TR[t] = max(high-low, |high-prev_close|, |low-prev_close|).
//! ATR is a running simple average of TR: while fewer than `period` ranges
//! exist it averages everything seen so far, afterwards it is a
//! sliding-window mean of the last `period` ranges. Defined from index 0.

use crate::domain::Bar;

/// Compute the True Range series for `bars`.
pub fn true_range(bars: &[Bar]) -> Vec<f64> {
    let n = bars.len();
    let mut tr = Vec::with_capacity(n);

    if n == 0 {
        return tr;
    }

    tr.push(bars[0].high - bars[0].low);

    for i in 1..n {
        let h = bars[i].high;
        let l = bars[i].low;
        let pc = bars[i - 1].close;
        tr.push((h - l).max((h - pc).abs()).max((l - pc).abs()));
    }

    tr
}

/// Compute the ATR series for `bars`.
///
/// Returns a vector of the same length as `bars`, defined at every index.
/// Non-negative whenever bars are sane (high >= low).
pub fn atr_series(bars: &[Bar], period: usize) -> Vec<f64> {
    let tr = true_range(bars);
    let n = tr.len();
    let mut result = Vec::with_capacity(n);

    if period == 0 {
        result.resize(n, f64::NAN);
        return result;
    }

    let mut sum = 0.0;
    for i in 0..n {
        if i < period {
            sum += tr[i];
            result.push(sum / (i + 1) as f64);
        } else {
            // Slide the window: drop the range leaving it, add the new one.
            sum += tr[i] - tr[i - period];
            result.push(sum / period as f64);
        }
    }

    result
}
