//! marketpulse core — indicator library, market classifier, backtest simulator.
//!
//! The engine is a deterministic function of its inputs:
//! - Domain types (bars, annotated bars, analysis and backtest records)
//! - Indicator library (SMA, EMA, RSI, MACD, ATR) over oldest-first series
//! - Market classifier and adaptive signal generator with confidence gating
//! - Position-based backtest simulator with a realized-trades-only ledger
//! - Bar sources (CSV ingestion, seeded synthetic walk) and run fingerprints
//!
//! Everything past ingestion is synchronous, I/O-free, and allocation-local
//! per call, so independent analyses can run concurrently without locking.

pub mod backtest;
pub mod classifier;
pub mod data;
pub mod domain;
pub mod fingerprint;
pub mod indicators;
