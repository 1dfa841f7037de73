//! Synthetic bar generator — a seeded random walk.
//!
//! Produces deterministic, plausible-looking OHLCV sequences for demos and
//! tests. The walk is geometric: each close moves by drift plus a uniform
//! shock scaled by volatility, and highs/lows bracket the open/close range
//! with a volatility-scaled wick.

use chrono::{DateTime, Duration, TimeZone, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::domain::Bar;

/// Parameters for the synthetic walk.
#[derive(Debug, Clone)]
pub struct SyntheticConfig {
    pub start_price: f64,
    /// Per-bar fractional drift.
    pub drift: f64,
    /// Per-bar fractional shock scale.
    pub volatility: f64,
    pub bars: usize,
    pub seed: u64,
    pub start_time: DateTime<Utc>,
    pub interval: Duration,
}

impl Default for SyntheticConfig {
    fn default() -> Self {
        Self {
            start_price: 1.1000,
            drift: 0.0,
            volatility: 0.0004,
            bars: 300,
            seed: 42,
            start_time: Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap(),
            interval: Duration::minutes(1),
        }
    }
}

/// Generate a bar sequence from the walk. Identical configs (including the
/// seed) produce identical sequences.
pub fn generate(config: &SyntheticConfig) -> Vec<Bar> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut bars = Vec::with_capacity(config.bars);
    let mut prev_close = config.start_price;

    for i in 0..config.bars {
        let shock = rng.gen_range(-1.0..1.0) * config.volatility;
        let open = prev_close;
        let close = (open * (1.0 + config.drift + shock)).max(f64::MIN_POSITIVE);
        let wick = rng.gen_range(0.0..config.volatility) * open;
        let high = open.max(close) + wick;
        let low = (open.min(close) - wick).max(f64::MIN_POSITIVE);
        let volume = rng.gen_range(500.0..5000.0);

        bars.push(Bar {
            timestamp: config.start_time + config.interval * i as i32,
            open,
            high,
            low,
            close,
            volume,
        });
        prev_close = close;
    }

    bars
}
