//! Simple Moving Average (SMA).
//!
//! Arithmetic mean of the trailing `period` values.
//! Lookback: period - 1 (first valid value at index period-1).

/// Compute the SMA series for `values`.
///
/// Returns a vector of the same length as `values`; the first `period - 1`
/// entries are `f64::NAN` (warm-up). Each defined entry is the mean of the
/// window ending at that index, computed directly over the window rather
/// than by rolling subtraction, so the value at index `period - 1` of an
/// exactly-`period`-long input is bit-identical to the mean of the whole
/// input.
pub fn sma_series(values: &[f64], period: usize) -> Vec<f64> {
    let n = values.len();
    let mut result = vec![f64::NAN; n];

    if period == 0 || n < period {
        return result;
    }

    for i in (period - 1)..n {
        let window = &values[i + 1 - period..=i];
        result[i] = window.iter().sum::<f64>() / period as f64;
    }

    result
}
