//! Backtest aggregates and the closed-trade ledger.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::Signal;

use super::strategy::Strategy;

/// One realized (closed) trade.
///
/// `direction` is the signal that closed the position: a Buy entry here
/// means a short was covered, a Sell means a long was liquidated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClosedTrade {
    pub timestamp: DateTime<Utc>,
    pub direction: Signal,
    pub exit_price: f64,
    pub pnl: f64,
}

/// Aggregate result of replaying one strategy over a bar sequence.
///
/// Built fresh on every run — no state carries between invocations. Only
/// realized trades are counted; a position still open at the end of the
/// sequence contributes nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestResult {
    pub strategy: Strategy,
    pub total_trades: usize,
    pub wins: usize,
    pub losses: usize,
    /// Percent of closed trades with positive PnL; 0 when nothing closed.
    pub win_rate: f64,
    /// Final balance minus the starting balance, in currency units.
    pub profit: f64,
    /// Worst peak-to-trough decline of the running balance, in percent.
    pub max_drawdown: f64,
    pub history: Vec<ClosedTrade>,
}

impl BacktestResult {
    pub fn empty(strategy: Strategy) -> Self {
        Self {
            strategy,
            total_trades: 0,
            wins: 0,
            losses: 0,
            win_rate: 0.0,
            profit: 0.0,
            max_drawdown: 0.0,
            history: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_result_is_all_zero() {
        let r = BacktestResult::empty(Strategy::Rsi);
        assert_eq!(r.total_trades, 0);
        assert_eq!(r.win_rate, 0.0);
        assert_eq!(r.profit, 0.0);
        assert_eq!(r.max_drawdown, 0.0);
        assert!(r.history.is_empty());
    }

    #[test]
    fn result_serialization_roundtrip() {
        let r = BacktestResult::empty(Strategy::MaCrossover);
        let json = serde_json::to_string(&r).unwrap();
        let deser: BacktestResult = serde_json::from_str(&json).unwrap();
        assert_eq!(r, deser);
        assert!(json.contains("\"ma_crossover\""));
    }
}
