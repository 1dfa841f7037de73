//! Market analysis record — the classifier's output.

use serde::{Deserialize, Serialize};

use super::bar::Macd;
use super::instrument::Instrument;

/// Direction of the prevailing trend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Trend {
    Bullish,
    Bearish,
    Neutral,
}

/// Classifier label driving which signal strategy is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MarketCondition {
    Trending,
    Ranging,
    Volatile,
}

/// Trading signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Signal {
    Buy,
    Sell,
    Hold,
}

/// One classification of the market from the latest annotated bar pair.
///
/// Ephemeral: recomputed on every call, never cached. The indicator fields
/// are `None` in the insufficient-history (degenerate) form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketAnalysis {
    pub symbol: String,
    pub price: f64,
    pub ma50: Option<f64>,
    pub ma200: Option<f64>,
    pub rsi: Option<f64>,
    pub macd: Option<Macd>,
    pub atr: Option<f64>,
    pub trend: Trend,
    pub condition: MarketCondition,
    pub signal: Signal,
    /// Integer score in [0, 99]; signals below 75 are gated to Hold.
    pub confidence: u8,
}

impl MarketAnalysis {
    /// The degenerate record emitted while the long moving average is still
    /// warming up: neutral trend, ranging condition, Hold at zero confidence.
    pub fn insufficient_history(instrument: &Instrument, price: f64) -> Self {
        Self {
            symbol: instrument.symbol().to_string(),
            price,
            ma50: None,
            ma200: None,
            rsi: None,
            macd: None,
            atr: None,
            trend: Trend::Neutral,
            condition: MarketCondition::Ranging,
            signal: Signal::Hold,
            confidence: 0,
        }
    }
}
