//! Candidate strategies and their per-bar signal rules.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{AnnotatedBar, Signal, Trend};

/// Strategy selector for the backtest simulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Buy on a golden cross of ma50 over ma200, sell on the death cross.
    MaCrossover,
    /// Buy oversold (RSI < 30), sell overbought (RSI > 70).
    Rsi,
    /// RSI extremes taken only in the direction of the MA trend.
    Combined,
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [Strategy::MaCrossover, Strategy::Rsi, Strategy::Combined];

    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::MaCrossover => "ma_crossover",
            Strategy::Rsi => "rsi",
            Strategy::Combined => "combined",
        }
    }

    /// Evaluate this strategy's signal at one bar.
    ///
    /// Callers guarantee `ma50`, `ma200`, `rsi` on the current bar and
    /// `ma50` on the previous one (the simulator's skip guard). A previous
    /// bar whose `ma200` is still warming up simply cannot produce a
    /// crossover, mirroring how an undefined comparison never fires.
    pub fn signal(
        &self,
        ma50: f64,
        ma200: f64,
        rsi: f64,
        trend: Trend,
        prev: &AnnotatedBar,
    ) -> Signal {
        match self {
            Strategy::MaCrossover => {
                let (Some(prev_ma50), Some(prev_ma200)) = (prev.ma50, prev.ma200) else {
                    return Signal::Hold;
                };
                if prev_ma50 < prev_ma200 && ma50 > ma200 {
                    Signal::Buy
                } else if prev_ma50 > prev_ma200 && ma50 < ma200 {
                    Signal::Sell
                } else {
                    Signal::Hold
                }
            }
            Strategy::Rsi => {
                if rsi < 30.0 {
                    Signal::Buy
                } else if rsi > 70.0 {
                    Signal::Sell
                } else {
                    Signal::Hold
                }
            }
            Strategy::Combined => {
                if trend == Trend::Bullish && rsi < 30.0 {
                    Signal::Buy
                } else if trend == Trend::Bearish && rsi > 70.0 {
                    Signal::Sell
                } else {
                    Signal::Hold
                }
            }
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("unknown strategy '{0}': expected ma_crossover, rsi, or combined")]
pub struct ParseStrategyError(String);

impl FromStr for Strategy {
    type Err = ParseStrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "ma_crossover" => Ok(Strategy::MaCrossover),
            "rsi" => Ok(Strategy::Rsi),
            "combined" => Ok(Strategy::Combined),
            _ => Err(ParseStrategyError(s.to_string())),
        }
    }
}
