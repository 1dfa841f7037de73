//! Exponential Moving Average (EMA).
//!
//! Recursive: EMA[t] = value[t] * k + EMA[t-1] * (1 - k), k = 2 / (period + 1).
//! Seed: EMA[0] = value[0]. One output per input element — unlike the SMA,
//! there is no warm-up gap.

/// Compute the EMA series for `values`.
///
/// Returns a vector of the same length as `values`, defined at every index.
/// Empty input yields an empty vector.
pub fn ema_series(values: &[f64], period: usize) -> Vec<f64> {
    let mut result = Vec::with_capacity(values.len());
    let Some(&first) = values.first() else {
        return result;
    };

    let k = 2.0 / (period as f64 + 1.0);
    let mut prev = first;
    result.push(prev);

    for &v in &values[1..] {
        prev = v * k + prev * (1.0 - k);
        result.push(prev);
    }

    result
}
