//! marketpulse CLI — analyze and backtest commands.
//!
//! Commands:
//! - `analyze` — annotate a bar sequence and classify the latest market state
//! - `backtest` — replay one strategy (or all three in parallel) and report
//!   the realized statistics plus the run fingerprint
//!
//! Bars come from a CSV file (`--csv`) or the seeded synthetic walk, and a
//! TOML config (`--config`) can fill in anything the flags leave unset.

mod config;

use anyhow::{bail, Result};
use clap::{Args, Parser, Subcommand};
use rayon::prelude::*;

use marketpulse_core::backtest::{run_backtest, BacktestResult, Strategy};
use marketpulse_core::classifier::analyze;
use marketpulse_core::data::{generate, load_bars, SyntheticConfig};
use marketpulse_core::domain::{Bar, Instrument, MarketAnalysis};
use marketpulse_core::fingerprint::run_fingerprint;
use marketpulse_core::indicators::annotate;

use config::RunConfig;

#[derive(Parser)]
#[command(
    name = "marketpulse",
    about = "marketpulse CLI — adaptive signal and backtesting engine"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify the latest market state from a bar sequence.
    Analyze {
        #[command(flatten)]
        input: InputArgs,

        /// Print the analysis record as JSON.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Replay candidate strategies over a bar sequence.
    Backtest {
        #[command(flatten)]
        input: InputArgs,

        /// Strategy: ma_crossover, rsi, combined, or all.
        #[arg(long, default_value = "all")]
        strategy: String,

        /// Include the closed-trade ledger in the output.
        #[arg(long, default_value_t = false)]
        trades: bool,

        /// Print results as JSON.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

#[derive(Args)]
struct InputArgs {
    /// CSV bar file (timestamp,open,high,low,close,volume). When absent,
    /// a seeded synthetic walk is generated instead.
    #[arg(long)]
    csv: Option<std::path::PathBuf>,

    /// Instrument symbol, for labeling and display precision.
    #[arg(long)]
    symbol: Option<String>,

    /// Synthetic walk: number of bars.
    #[arg(long)]
    bars: Option<usize>,

    /// Synthetic walk: RNG seed.
    #[arg(long)]
    seed: Option<u64>,

    /// Synthetic walk: starting price.
    #[arg(long)]
    start_price: Option<f64>,

    /// Synthetic walk: per-bar drift.
    #[arg(long)]
    drift: Option<f64>,

    /// Synthetic walk: per-bar volatility.
    #[arg(long)]
    volatility: Option<f64>,

    /// TOML config file supplying anything the flags leave unset.
    #[arg(long)]
    config: Option<std::path::PathBuf>,
}

/// Fully-resolved input: flags over config file over defaults.
struct ResolvedInput {
    bars: Vec<Bar>,
    instrument: Instrument,
    strategy_name: Option<String>,
}

impl InputArgs {
    fn resolve(self) -> Result<ResolvedInput> {
        let file_config = match &self.config {
            Some(path) => RunConfig::load(path)?,
            None => RunConfig::default(),
        };

        let symbol = self
            .symbol
            .or(file_config.symbol)
            .unwrap_or_else(|| "EURUSD".to_string());

        let csv = self.csv.or(file_config.data.csv);
        let bars = match csv {
            Some(path) => load_bars(&path)?,
            None => {
                let defaults = SyntheticConfig::default();
                generate(&SyntheticConfig {
                    start_price: self
                        .start_price
                        .or(file_config.data.start_price)
                        .unwrap_or(defaults.start_price),
                    drift: self.drift.or(file_config.data.drift).unwrap_or(defaults.drift),
                    volatility: self
                        .volatility
                        .or(file_config.data.volatility)
                        .unwrap_or(defaults.volatility),
                    bars: self.bars.or(file_config.data.bars).unwrap_or(defaults.bars),
                    seed: self.seed.or(file_config.data.seed).unwrap_or(defaults.seed),
                    ..defaults
                })
            }
        };

        Ok(ResolvedInput {
            bars,
            instrument: Instrument::new(symbol),
            strategy_name: file_config.strategy,
        })
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze { input, json } => cmd_analyze(input, json),
        Commands::Backtest {
            input,
            strategy,
            trades,
            json,
        } => cmd_backtest(input, strategy, trades, json),
    }
}

fn cmd_analyze(input: InputArgs, json: bool) -> Result<()> {
    let resolved = input.resolve()?;
    let annotated = annotate(&resolved.bars);

    let analysis = match annotated.len() {
        0 => bail!("no bars to analyze"),
        1 => analyze(&annotated[0], &annotated[0], &resolved.instrument),
        n => analyze(&annotated[n - 1], &annotated[n - 2], &resolved.instrument),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
    } else {
        print_analysis(&analysis, &resolved.instrument);
    }
    Ok(())
}

fn cmd_backtest(input: InputArgs, strategy: String, trades: bool, json: bool) -> Result<()> {
    let resolved = input.resolve()?;
    // A flag-level strategy beats the config file; "all" stays the default.
    let name = if strategy == "all" {
        resolved.strategy_name.unwrap_or(strategy)
    } else {
        strategy
    };

    let selected: Vec<Strategy> = if name == "all" {
        Strategy::ALL.to_vec()
    } else {
        vec![name.parse()?]
    };

    let annotated = annotate(&resolved.bars);
    let results: Vec<(BacktestResult, String)> = selected
        .par_iter()
        .map(|&s| {
            (
                run_backtest(&annotated, s),
                run_fingerprint(&resolved.bars, s),
            )
        })
        .collect();

    if json {
        let records: Vec<serde_json::Value> = results
            .iter()
            .map(|(result, fingerprint)| {
                let mut value = serde_json::to_value(result).unwrap_or_default();
                if !trades {
                    if let Some(object) = value.as_object_mut() {
                        object.remove("history");
                    }
                }
                serde_json::json!({ "fingerprint": fingerprint, "result": value })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&records)?);
    } else {
        for (result, fingerprint) in &results {
            print_result(result, fingerprint, trades, &resolved.instrument);
        }
    }
    Ok(())
}

fn print_analysis(analysis: &MarketAnalysis, instrument: &Instrument) {
    let fmt_opt = |v: Option<f64>| {
        v.map(|v| instrument.format_price(v))
            .unwrap_or_else(|| "-".to_string())
    };

    println!("{} @ {}", analysis.symbol, instrument.format_price(analysis.price));
    println!("  ma50:       {}", fmt_opt(analysis.ma50));
    println!("  ma200:      {}", fmt_opt(analysis.ma200));
    println!(
        "  rsi:        {}",
        analysis
            .rsi
            .map(|v| format!("{v:.1}"))
            .unwrap_or_else(|| "-".to_string())
    );
    if let Some(m) = analysis.macd {
        println!(
            "  macd:       {:.6} signal {:.6} histogram {:.6}",
            m.macd, m.signal, m.histogram
        );
    }
    println!("  atr:        {}", fmt_opt(analysis.atr));
    println!("  trend:      {:?}", analysis.trend);
    println!("  condition:  {:?}", analysis.condition);
    println!(
        "  signal:     {:?} (confidence {})",
        analysis.signal, analysis.confidence
    );
}

fn print_result(
    result: &BacktestResult,
    fingerprint: &str,
    trades: bool,
    instrument: &Instrument,
) {
    println!("strategy {} [{}]", result.strategy, &fingerprint[..16]);
    println!(
        "  trades {} (wins {} / losses {}), win rate {:.1}%",
        result.total_trades, result.wins, result.losses, result.win_rate
    );
    println!(
        "  profit {:.2}, max drawdown {:.2}%",
        result.profit, result.max_drawdown
    );
    if trades {
        for t in &result.history {
            println!(
                "  {} {:?} exit {} pnl {:.2}",
                t.timestamp,
                t.direction,
                instrument.format_price(t.exit_price),
                t.pnl
            );
        }
    }
}
