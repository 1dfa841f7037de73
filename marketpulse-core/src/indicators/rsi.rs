//! Relative Strength Index (RSI).
//!
//! Wilder smoothing of average gains and losses:
//! avg[i] = (avg[i-1] * (period - 1) + x[i]) / period.
//! RSI = 100 - 100 / (1 + avg_gain / avg_loss).
//! Lookback: period (needs period + 1 closes).
//! Edge case: avg_loss == 0 → RSI = 100 (capped, never a division by zero).

/// Compute the RSI series for `closes`.
///
/// Returns a vector of the same length as `closes`; the first `period`
/// entries are `f64::NAN` (warm-up). The seed averages cover the first
/// `period` price differences; every later index extends the smoothing
/// recurrence by one difference, so the value at index i is identical to
/// recomputing RSI over the prefix `closes[..=i]` from scratch.
pub fn rsi_series(closes: &[f64], period: usize) -> Vec<f64> {
    let n = closes.len();
    let mut result = vec![f64::NAN; n];

    if period == 0 || n < period + 1 {
        return result;
    }

    let p = period as f64;

    // Seed: plain averages over the first `period` differences.
    let mut avg_gain = 0.0;
    let mut avg_loss = 0.0;
    for i in 1..=period {
        let change = closes[i] - closes[i - 1];
        if change > 0.0 {
            avg_gain += change;
        } else {
            avg_loss -= change;
        }
    }
    avg_gain /= p;
    avg_loss /= p;
    result[period] = rsi_value(avg_gain, avg_loss);

    for i in (period + 1)..n {
        let change = closes[i] - closes[i - 1];
        let gain = change.max(0.0);
        let loss = (-change).max(0.0);

        avg_gain = (avg_gain * (p - 1.0) + gain) / p;
        avg_loss = (avg_loss * (p - 1.0) + loss) / p;

        result[i] = rsi_value(avg_gain, avg_loss);
    }

    result
}

fn rsi_value(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        100.0
    } else {
        let rs = avg_gain / avg_loss;
        100.0 - 100.0 / (1.0 + rs)
    }
}
