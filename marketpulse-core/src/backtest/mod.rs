//! Backtest simulator — strategy replay over annotated bar sequences.

pub mod result;
pub mod simulator;
pub mod strategy;

pub use result::{BacktestResult, ClosedTrade};
pub use simulator::{run_backtest, INITIAL_BALANCE, PIP_VALUE};
pub use strategy::{ParseStrategyError, Strategy};
