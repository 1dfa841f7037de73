//! Position-based backtest simulator.
//!
//! Replays an annotated bar sequence oldest-first, maintaining a single open
//! position with stop-and-reverse transitions: an opposing signal closes the
//! current position at the bar close (realizing PnL) and opens the reverse
//! one at the same price. A signal in the direction already held is a no-op
//! (no pyramiding), and Hold never changes the position. Whatever is still
//! open when the sequence ends stays unrealized and is excluded from the
//! result.

use crate::domain::{AnnotatedBar, Position, Signal, Trend};

use super::result::{BacktestResult, ClosedTrade};
use super::strategy::Strategy;

/// Starting account balance, in currency units.
pub const INITIAL_BALANCE: f64 = 10_000.0;
/// PnL per unit of price movement (standard-lot pip scaling).
pub const PIP_VALUE: f64 = 10_000.0;

/// Replay `bars` under one strategy and aggregate the realized outcome.
///
/// Bars whose `ma50`, `ma200`, or `rsi` is still warming up are skipped, as
/// is any bar whose predecessor lacks `ma50`. The run is a pure function of
/// its inputs: identical sequences produce bit-identical results.
pub fn run_backtest(bars: &[AnnotatedBar], strategy: Strategy) -> BacktestResult {
    let mut position = Position::Flat;
    let mut balance = INITIAL_BALANCE;
    let mut peak_balance = INITIAL_BALANCE;
    let mut max_drawdown = 0.0f64;
    let mut wins = 0usize;
    let mut losses = 0usize;
    let mut history = Vec::new();

    for i in 1..bars.len() {
        let current = &bars[i];
        let previous = &bars[i - 1];

        let (Some(ma50), Some(ma200), Some(rsi)) = (current.ma50, current.ma200, current.rsi)
        else {
            continue;
        };
        if previous.ma50.is_none() {
            continue;
        }

        // Binary trend: the backtester never sits on the fence.
        let trend = if ma50 > ma200 {
            Trend::Bullish
        } else {
            Trend::Bearish
        };

        let signal = strategy.signal(ma50, ma200, rsi, trend, previous);
        let close = current.bar.close;

        match signal {
            Signal::Buy if !position.is_long() => {
                if let Position::Short { entry } = position {
                    let pnl = (entry - close) * PIP_VALUE;
                    balance += pnl;
                    if pnl > 0.0 {
                        wins += 1;
                    } else {
                        losses += 1;
                    }
                    history.push(ClosedTrade {
                        timestamp: current.bar.timestamp,
                        direction: Signal::Buy,
                        exit_price: close,
                        pnl,
                    });
                }
                position = Position::Long { entry: close };
            }
            Signal::Sell if !position.is_short() => {
                if let Position::Long { entry } = position {
                    let pnl = (close - entry) * PIP_VALUE;
                    balance += pnl;
                    if pnl > 0.0 {
                        wins += 1;
                    } else {
                        losses += 1;
                    }
                    history.push(ClosedTrade {
                        timestamp: current.bar.timestamp,
                        direction: Signal::Sell,
                        exit_price: close,
                        pnl,
                    });
                }
                position = Position::Short { entry: close };
            }
            _ => {}
        }

        peak_balance = peak_balance.max(balance);
        let drawdown = (peak_balance - balance) / peak_balance * 100.0;
        max_drawdown = max_drawdown.max(drawdown);
    }

    let total_trades = wins + losses;
    let win_rate = if total_trades == 0 {
        0.0
    } else {
        wins as f64 / total_trades as f64 * 100.0
    };

    BacktestResult {
        strategy,
        total_trades,
        wins,
        losses,
        win_rate,
        profit: balance - INITIAL_BALANCE,
        max_drawdown,
        history,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Bar, Macd};
    use chrono::{Duration, TimeZone, Utc};

    /// Build fully-annotated bars from (close, ma50, ma200, rsi) rows.
    fn annotated(rows: &[(f64, f64, f64, f64)]) -> Vec<AnnotatedBar> {
        let base = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();
        rows.iter()
            .enumerate()
            .map(|(i, &(close, ma50, ma200, rsi))| AnnotatedBar {
                bar: Bar {
                    timestamp: base + Duration::minutes(i as i64),
                    open: close,
                    high: close + 0.001,
                    low: close - 0.001,
                    close,
                    volume: 1000.0,
                },
                ma50: Some(ma50),
                ma200: Some(ma200),
                rsi: Some(rsi),
                macd: Some(Macd {
                    macd: 0.0,
                    signal: 0.0,
                    histogram: 0.0,
                }),
                atr: Some(0.001),
            })
            .collect()
    }

    #[test]
    fn single_golden_cross_opens_long_and_closes_nothing() {
        // One upward crossover at index 2, never reversed.
        let bars = annotated(&[
            (1.100, 1.090, 1.100, 50.0),
            (1.101, 1.095, 1.100, 50.0),
            (1.102, 1.105, 1.100, 50.0), // golden cross
            (1.103, 1.106, 1.100, 50.0),
            (1.104, 1.107, 1.100, 50.0),
        ]);
        let result = run_backtest(&bars, Strategy::MaCrossover);
        assert_eq!(result.total_trades, 0);
        assert_eq!(result.profit, 0.0);
        assert!(result.history.is_empty());
        assert_eq!(result.max_drawdown, 0.0);
    }

    #[test]
    fn crossover_round_trip_realizes_pnl() {
        // Golden cross at index 2 (enter long at 1.102), death cross at
        // index 4 (exit at 1.110): pnl = (1.110 - 1.102) * 10000 = 80.
        let bars = annotated(&[
            (1.100, 1.090, 1.100, 50.0),
            (1.101, 1.095, 1.100, 50.0),
            (1.102, 1.105, 1.100, 50.0),
            (1.106, 1.106, 1.100, 50.0),
            (1.110, 1.095, 1.100, 50.0), // death cross
        ]);
        let result = run_backtest(&bars, Strategy::MaCrossover);
        assert_eq!(result.total_trades, 1);
        assert_eq!(result.wins, 1);
        assert_eq!(result.losses, 0);
        assert_eq!(result.win_rate, 100.0);
        assert!((result.profit - 80.0).abs() < 1e-9);
        assert_eq!(result.history.len(), 1);
        let trade = &result.history[0];
        assert_eq!(trade.direction, Signal::Sell);
        assert_eq!(trade.exit_price, 1.110);
        // The reversal leaves a short open; it is not force-closed.
        assert!((trade.pnl - 80.0).abs() < 1e-9);
    }

    #[test]
    fn rsi_sell_with_no_long_opens_short_without_history() {
        // RSI rises through 70 once: one transition to short, no ledger entry.
        let bars = annotated(&[
            (1.100, 1.10, 1.09, 50.0),
            (1.101, 1.10, 1.09, 55.0),
            (1.102, 1.10, 1.09, 65.0),
            (1.103, 1.10, 1.09, 72.0), // sell fires here
            (1.104, 1.10, 1.09, 74.0), // already short: no-op
        ]);
        let result = run_backtest(&bars, Strategy::Rsi);
        assert_eq!(result.total_trades, 0);
        assert!(result.history.is_empty());
        assert_eq!(result.profit, 0.0);
    }

    #[test]
    fn rsi_no_reentry_while_long() {
        // Two consecutive oversold bars: a single entry, no pyramiding.
        let bars = annotated(&[
            (1.100, 1.10, 1.09, 50.0),
            (1.099, 1.10, 1.09, 25.0), // enter long
            (1.098, 1.10, 1.09, 22.0), // still oversold: no-op
            (1.105, 1.10, 1.09, 75.0), // reverse: close long, open short
        ]);
        let result = run_backtest(&bars, Strategy::Rsi);
        assert_eq!(result.total_trades, 1);
        // Entry at 1.099, exit at 1.105: pnl = 0.006 * 10000 = 60.
        assert!((result.history[0].pnl - 60.0).abs() < 1e-9);
        assert_eq!(result.history[0].direction, Signal::Sell);
    }

    #[test]
    fn losing_short_updates_drawdown() {
        // Short at 1.100, covered at 1.110: pnl = -100, balance dips to 9900.
        let bars = annotated(&[
            (1.100, 1.10, 1.09, 50.0),
            (1.100, 1.10, 1.09, 72.0), // enter short
            (1.105, 1.10, 1.09, 50.0),
            (1.110, 1.10, 1.09, 25.0), // cover and reverse long
        ]);
        let result = run_backtest(&bars, Strategy::Rsi);
        assert_eq!(result.total_trades, 1);
        assert_eq!(result.losses, 1);
        assert_eq!(result.win_rate, 0.0);
        assert!((result.profit - -100.0).abs() < 1e-9);
        assert!((result.max_drawdown - 1.0).abs() < 1e-9); // 100 / 10000
        assert_eq!(result.history[0].direction, Signal::Buy);
    }

    #[test]
    fn warmup_bars_are_skipped() {
        let mut bars = annotated(&[
            (1.100, 1.10, 1.09, 25.0),
            (1.100, 1.10, 1.09, 25.0),
            (1.100, 1.10, 1.09, 25.0),
        ]);
        // Strip the long MA everywhere: nothing is tradable.
        for b in &mut bars {
            b.ma200 = None;
        }
        let result = run_backtest(&bars, Strategy::Rsi);
        assert_eq!(result, BacktestResult::empty(Strategy::Rsi));
    }

    #[test]
    fn combined_ignores_oversold_in_downtrend() {
        let bars = annotated(&[
            (1.100, 1.09, 1.10, 50.0),
            (1.099, 1.09, 1.10, 25.0), // oversold but trend bearish: no buy
            (1.098, 1.09, 1.10, 22.0),
        ]);
        let result = run_backtest(&bars, Strategy::Combined);
        assert_eq!(result.total_trades, 0);
        assert!(result.history.is_empty());
    }

    #[test]
    fn backtest_is_idempotent() {
        let bars = annotated(&[
            (1.100, 1.10, 1.09, 50.0),
            (1.099, 1.10, 1.09, 25.0),
            (1.105, 1.10, 1.09, 75.0),
            (1.102, 1.10, 1.09, 28.0),
            (1.108, 1.10, 1.09, 73.0),
        ]);
        let first = run_backtest(&bars, Strategy::Rsi);
        let second = run_backtest(&bars, Strategy::Rsi);
        assert_eq!(first, second);
    }

    #[test]
    fn wins_plus_losses_equals_total() {
        let bars = annotated(&[
            (1.100, 1.10, 1.09, 50.0),
            (1.099, 1.10, 1.09, 25.0),
            (1.105, 1.10, 1.09, 75.0),
            (1.102, 1.10, 1.09, 28.0),
            (1.095, 1.10, 1.09, 72.0),
        ]);
        let result = run_backtest(&bars, Strategy::Rsi);
        assert_eq!(result.wins + result.losses, result.total_trades);
        assert!(result.max_drawdown >= 0.0);
    }

    #[test]
    fn empty_and_single_bar_sequences() {
        assert_eq!(
            run_backtest(&[], Strategy::Combined),
            BacktestResult::empty(Strategy::Combined)
        );
        let bars = annotated(&[(1.1, 1.10, 1.09, 25.0)]);
        assert_eq!(
            run_backtest(&bars, Strategy::Rsi),
            BacktestResult::empty(Strategy::Rsi)
        );
    }
}
