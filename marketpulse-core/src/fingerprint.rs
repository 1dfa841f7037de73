//! Run fingerprinting.
//!
//! A BLAKE3 digest over the strategy selector and the raw bar series lets a
//! caller assert that two runs saw byte-identical inputs, which together
//! with the simulator's determinism makes results reproducible by
//! construction.

use crate::backtest::Strategy;
use crate::domain::Bar;

/// Hex fingerprint of a (strategy, bar sequence) pair.
///
/// Hashes each bar field in little-endian bit representation, so any change
/// to any input — including a sign flip or a NaN payload — changes the
/// digest.
pub fn run_fingerprint(bars: &[Bar], strategy: Strategy) -> String {
    let mut hasher = blake3::Hasher::new();
    hasher.update(strategy.as_str().as_bytes());
    for bar in bars {
        hasher.update(&bar.timestamp.timestamp_millis().to_le_bytes());
        hasher.update(&bar.open.to_le_bytes());
        hasher.update(&bar.high.to_le_bytes());
        hasher.update(&bar.low.to_le_bytes());
        hasher.update(&bar.close.to_le_bytes());
        hasher.update(&bar.volume.to_le_bytes());
    }
    hasher.finalize().to_hex().to_string()
}
